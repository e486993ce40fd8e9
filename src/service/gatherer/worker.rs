//! Gather worker that owns a private resource bundle

use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;

use super::rate_limit::TokenBucket;
use crate::model::{EvidenceCandidate, SearchQuery};
use crate::search::{
    ContentExtractor, EvidenceSources, ExtractedContent, SearchError, SearchHit, SearchProvider,
    compute_hash,
};

/// Resources owned by one worker for the duration of one gather task.
/// Minted from the factory at task start and dropped at task end; no
/// provider, extractor, or limiter is ever shared between workers.
pub(super) struct WorkerBundle {
    provider: Box<dyn SearchProvider>,
    extractor: Box<dyn ContentExtractor>,
    limiter: TokenBucket,
    extraction_timeout: Duration,
}

impl WorkerBundle {
    pub(super) fn new(
        sources: &dyn EvidenceSources,
        rpm: u32,
        extraction_timeout: Duration,
    ) -> Self {
        Self {
            provider: sources.search_provider(),
            extractor: sources.content_extractor(),
            limiter: TokenBucket::new(rpm),
            extraction_timeout,
        }
    }

    /// Work through the assigned queries until they run out or the
    /// deadline passes. The deadline is checked between queries and
    /// between extractions; individual calls carry their own timeouts.
    pub(super) async fn run(
        mut self,
        worker_id: usize,
        queries: Vec<SearchQuery>,
        results_per_query: usize,
        deadline: Instant,
    ) -> Vec<EvidenceCandidate> {
        let mut candidates = Vec::new();

        for query in queries {
            if Instant::now() >= deadline {
                tracing::debug!(
                    worker = worker_id,
                    query_id = query.id,
                    "Deadline reached, leaving remaining queries unsearched"
                );
                break;
            }

            if tokio::time::timeout_at(deadline, self.limiter.acquire())
                .await
                .is_err()
            {
                tracing::debug!(worker = worker_id, "Deadline reached while rate limited");
                break;
            }

            let search = self.provider.search(&query.text, results_per_query);
            let hits = match tokio::time::timeout(query.timeout, search).await {
                Ok(Ok(hits)) => hits,
                Ok(Err(e)) => {
                    log_search_error(worker_id, &query, &e);
                    continue;
                }
                Err(_) => {
                    tracing::debug!(
                        worker = worker_id,
                        query_id = query.id,
                        "Search query timed out"
                    );
                    continue;
                }
            };

            tracing::debug!(
                worker = worker_id,
                query_id = query.id,
                hits = hits.len(),
                "Search query returned hits"
            );

            for hit in hits {
                if Instant::now() >= deadline {
                    break;
                }
                if let Some(candidate) = self.extract_candidate(hit, query.id, deadline).await {
                    candidates.push(candidate);
                }
            }
        }

        candidates
    }

    async fn extract_candidate(
        &mut self,
        hit: SearchHit,
        query_id: usize,
        deadline: Instant,
    ) -> Option<EvidenceCandidate> {
        if tokio::time::timeout_at(deadline, self.limiter.acquire())
            .await
            .is_err()
        {
            return None;
        }

        let extract = self.extractor.extract(&hit.url);
        let content = match tokio::time::timeout(self.extraction_timeout, extract).await {
            Ok(content) => content,
            Err(_) => {
                tracing::debug!(url = %hit.url, "Content extraction timed out");
                ExtractedContent::failed(&hit.url)
            }
        };

        // A failed extraction still yields a candidate from the snippet
        let text = if content.success && !content.text.trim().is_empty() {
            content.text
        } else {
            hit.snippet.clone()
        };

        if text.trim().is_empty() {
            tracing::debug!(url = %hit.url, "Skipping hit with no usable text");
            return None;
        }

        let title = if hit.title.is_empty() {
            content.title.unwrap_or_default()
        } else {
            hit.title
        };

        Some(EvidenceCandidate {
            id: compute_hash(hit.url.as_str(), &title),
            text,
            source_domain: content.domain,
            url: hit.url,
            title,
            extracted_at: Utc::now(),
            query_id,
        })
    }
}

fn log_search_error(worker_id: usize, query: &SearchQuery, error: &SearchError) {
    match error {
        SearchError::RateLimited => {
            tracing::warn!(
                worker = worker_id,
                query_id = query.id,
                "Search provider rate limited"
            );
        }
        SearchError::NotFound(endpoint) => {
            tracing::warn!(
                worker = worker_id,
                endpoint = %endpoint,
                "Search endpoint not found"
            );
        }
        _ => {
            tracing::warn!(
                worker = worker_id,
                query_id = query.id,
                error = %error,
                "Search query failed"
            );
        }
    }
}
