//! Bounded worker pool for evidence gathering
//!
//! Queries are distributed round-robin over at most `max_workers`
//! concurrent workers. Each worker owns its own search provider, content
//! extractor, and rate limiter for the lifetime of its task, so workers
//! never contend on shared resources. Individual query failures are
//! recovered and logged; only a completely empty harvest fails the stage.

mod rate_limit;
mod worker;

use std::sync::Arc;

use futures::future::join_all;
use tokio::time::Instant;

use crate::model::{EvidenceCandidate, GatherConfig, SearchQuery, SearchStrategy};
use crate::search::EvidenceSources;

#[derive(Debug, thiserror::Error)]
pub enum GatherError {
    #[error("no evidence gathered: every query failed or returned nothing")]
    NoEvidence,
}

pub struct EvidenceGatherer {
    config: GatherConfig,
    sources: Arc<dyn EvidenceSources>,
}

impl EvidenceGatherer {
    pub fn new(config: GatherConfig, sources: Arc<dyn EvidenceSources>) -> Self {
        Self { config, sources }
    }

    /// Run the strategy's queries and collect raw evidence candidates.
    ///
    /// The stage stops at the earlier of the caller's deadline and its own
    /// stage timeout. Work finished by then is kept; work not started is
    /// dropped.
    pub async fn gather(
        &self,
        strategy: &SearchStrategy,
        deadline: Instant,
    ) -> Result<Vec<EvidenceCandidate>, GatherError> {
        if strategy.queries.is_empty() {
            return Err(GatherError::NoEvidence);
        }

        let worker_count = self.config.max_workers.min(strategy.queries.len()).max(1);
        let stage_deadline = deadline.min(Instant::now() + self.config.stage_timeout());

        let mut assignments: Vec<Vec<SearchQuery>> = vec![Vec::new(); worker_count];
        for (i, query) in strategy.queries.iter().enumerate() {
            assignments[i % worker_count].push(query.clone());
        }

        tracing::debug!(
            queries = strategy.queries.len(),
            workers = worker_count,
            "Dispatching gather workers"
        );

        let tasks = assignments
            .into_iter()
            .enumerate()
            .map(|(worker_id, queries)| {
                let bundle = worker::WorkerBundle::new(
                    self.sources.as_ref(),
                    self.config.requests_per_minute,
                    self.config.extraction_timeout(),
                );
                let results_per_query = self.config.results_per_query;
                async move {
                    bundle
                        .run(worker_id, queries, results_per_query, stage_deadline)
                        .await
                }
            });

        let harvests = join_all(tasks).await;
        let candidates: Vec<EvidenceCandidate> = harvests.into_iter().flatten().collect();

        tracing::info!(
            candidates = candidates.len(),
            queries = strategy.queries.len(),
            "Evidence gathering finished"
        );

        if candidates.is_empty() {
            return Err(GatherError::NoEvidence);
        }

        Ok(candidates)
    }
}
