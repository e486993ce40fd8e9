//! Search client for SearxNG-compatible JSON endpoints

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{SearchError, SearchHit, SearchProvider};
use crate::model::SearchConfig;

const USER_AGENT: &str = "claimlens-agent/1.0";

pub struct WebSearchProvider {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct SearxResponse {
    #[serde(default)]
    results: Vec<SearxResult>,
}

#[derive(Debug, Deserialize)]
struct SearxResult {
    url: String,
    #[serde(default)]
    title: String,
    /// Searx calls the snippet "content"
    #[serde(default)]
    content: String,
}

impl WebSearchProvider {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            endpoint: config.endpoint.clone(),
        }
    }

    fn to_hits(body: SearxResponse, max_results: usize) -> Vec<SearchHit> {
        body.results
            .into_iter()
            .filter_map(|r| {
                // Rows without a parseable URL are useless downstream
                let url = Url::parse(&r.url).ok()?;
                Some(SearchHit {
                    url,
                    title: r.title,
                    snippet: r.content,
                })
            })
            .take(max_results)
            .collect()
    }
}

#[async_trait]
impl SearchProvider for WebSearchProvider {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, SearchError> {
        tracing::debug!(query = %query, endpoint = %self.endpoint, "Running search query");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("format", "json")])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(SearchError::NotFound(self.endpoint.clone()));
        }

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!(query = %query, "Search request rate limited");
            return Err(SearchError::RateLimited);
        }

        if !response.status().is_success() {
            return Err(SearchError::ParseError(format!(
                "HTTP {}: {}",
                response.status(),
                self.endpoint
            )));
        }

        let body: SearxResponse = response.json().await?;
        Ok(Self::to_hits(body, max_results))
    }

    fn name(&self) -> &str {
        "web_search"
    }
}

impl Default for WebSearchProvider {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}
