//! Search providers and page content extraction for evidence gathering

mod page_extract;
mod web_search;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use url::Url;

use crate::model::{GatherConfig, SearchConfig};

pub use page_extract::PageContentExtractor;
pub use web_search::WebSearchProvider;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Not found: {0}")]
    NotFound(String),
}

/// One result row from a search provider
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub url: Url,
    pub title: String,
    pub snippet: String,
}

/// Result of a page content extraction. Extraction failures are reported
/// through `success`, never as errors; a failed page still yields the hit's
/// snippet downstream.
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    pub text: String,
    pub title: Option<String>,
    pub domain: String,
    pub success: bool,
}

impl ExtractedContent {
    pub fn failed(url: &Url) -> Self {
        Self {
            text: String::new(),
            title: None,
            domain: extract_domain(url),
            success: false,
        }
    }
}

/// Trait for search providers
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run one query and return up to `max_results` hits
    async fn search(&self, query: &str, max_results: usize)
    -> Result<Vec<SearchHit>, SearchError>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Trait for page content extractors
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    /// Fetch and normalize the page behind `url`
    async fn extract(&self, url: &Url) -> ExtractedContent;
}

/// Factory minting fresh provider/extractor pairs. Each gather worker
/// calls this once at task start and owns the result for the task's
/// lifetime, so no connection pool or parser state is shared across
/// workers.
pub trait EvidenceSources: Send + Sync {
    fn search_provider(&self) -> Box<dyn SearchProvider>;
    fn content_extractor(&self) -> Box<dyn ContentExtractor>;
}

/// Production factory backed by the configured search endpoint.
pub struct WebEvidenceSources {
    search: SearchConfig,
    gather: GatherConfig,
}

impl WebEvidenceSources {
    pub fn new(search: SearchConfig, gather: GatherConfig) -> Self {
        Self { search, gather }
    }
}

impl EvidenceSources for WebEvidenceSources {
    fn search_provider(&self) -> Box<dyn SearchProvider> {
        Box::new(WebSearchProvider::new(&self.search))
    }

    fn content_extractor(&self) -> Box<dyn ContentExtractor> {
        Box::new(PageContentExtractor::new(self.gather.extraction_timeout()))
    }
}

/// Compute SHA256 hash of URL + title
pub(crate) fn compute_hash(url: &str, title: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hasher.update(title.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Extract a bare lowercase domain from a URL, without any www prefix
pub(crate) fn extract_domain(url: &Url) -> String {
    url.host_str()
        .map(|h| h.trim_start_matches("www.").to_lowercase())
        .unwrap_or_default()
}

/// Convert HTML to Markdown
pub(crate) fn html_to_markdown(html: &str) -> String {
    htmd::convert(html).unwrap_or_else(|_| html.to_string())
}
