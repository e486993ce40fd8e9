//! Page fetcher that normalizes evidence pages to markdown text

use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

use super::{ContentExtractor, ExtractedContent, extract_domain, html_to_markdown};
use async_trait::async_trait;

const USER_AGENT: &str = "claimlens-agent/1.0";

/// Upper bound on normalized page text. Keeps assessor payloads bounded;
/// evidence past this point adds tokens, not signal.
const MAX_CONTENT_CHARS: usize = 6_000;

pub struct PageContentExtractor {
    client: Client,
    timeout: Duration,
}

impl PageContentExtractor {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            timeout,
        }
    }

    /// Extract title from <title> or <meta property="og:title">
    fn extract_title(document: &Html) -> Option<String> {
        if let Ok(selector) = Selector::parse("title")
            && let Some(el) = document.select(&selector).next()
        {
            let title = el.text().collect::<String>().trim().to_string();
            if !title.is_empty() {
                return Some(title);
            }
        }

        // Fallback to og:title
        if let Ok(selector) = Selector::parse("meta[property=\"og:title\"]")
            && let Some(el) = document.select(&selector).next()
        {
            return el.value().attr("content").map(|s| s.trim().to_string());
        }

        None
    }

    fn truncate_chars(text: String, max: usize) -> String {
        if text.chars().count() <= max {
            return text;
        }
        text.chars().take(max).collect()
    }

    fn from_html(url: &Url, raw: &str) -> ExtractedContent {
        let document = Html::parse_document(raw);
        let title = Self::extract_title(&document);
        let text = Self::truncate_chars(html_to_markdown(raw), MAX_CONTENT_CHARS);
        let success = !text.trim().is_empty();

        ExtractedContent {
            text,
            title,
            domain: extract_domain(url),
            success,
        }
    }
}

#[async_trait]
impl ContentExtractor for PageContentExtractor {
    async fn extract(&self, url: &Url) -> ExtractedContent {
        tracing::debug!(url = %url, "Fetching evidence page");

        let response = match self
            .client
            .get(url.as_str())
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Page fetch failed");
                return ExtractedContent::failed(url);
            }
        };

        if !response.status().is_success() {
            tracing::debug!(url = %url, status = %response.status(), "Page fetch returned non-success status");
            return ExtractedContent::failed(url);
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "text/html".to_string());

        let raw = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Failed to read page body");
                return ExtractedContent::failed(url);
            }
        };

        // JSON endpoints are not readable evidence prose
        if content_type.contains("application/json") {
            return ExtractedContent::failed(url);
        }

        if content_type.contains("text/markdown") || content_type.contains("text/plain") {
            let text = Self::truncate_chars(raw, MAX_CONTENT_CHARS);
            let success = !text.trim().is_empty();
            return ExtractedContent {
                text,
                title: None,
                domain: extract_domain(url),
                success,
            };
        }

        Self::from_html(url, &raw)
    }
}

impl Default for PageContentExtractor {
    fn default() -> Self {
        Self::new(Duration::from_secs(4))
    }
}
