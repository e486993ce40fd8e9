//! Multi-assessor consensus
//!
//! The same claim and evidence pool go to every assessor on the panel
//! concurrently. Individual failures and timeouts are dropped; fewer than
//! two surviving verdicts makes consensus unavailable, which is fatal for
//! the claim. Single-assessor results are never accepted.

use std::sync::Arc;

use futures::future::join_all;

use crate::assessor::AssessorClient;
use crate::model::{AssessorScore, ConsensusConfig, ConsensusResult, EvidencePool};

const MIN_ASSESSORS: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum ConsensusError {
    #[error("consensus unavailable: only {responded} of at least {required} assessors responded")]
    Unavailable { responded: usize, required: usize },
}

pub struct ConsensusEngine {
    config: ConsensusConfig,
    panel: Vec<Arc<dyn AssessorClient>>,
}

impl ConsensusEngine {
    pub fn new(config: ConsensusConfig, panel: Vec<Arc<dyn AssessorClient>>) -> Self {
        Self { config, panel }
    }

    /// Collect independent verdicts and aggregate them.
    ///
    /// The consensus score is the confidence-weighted mean of the trust
    /// estimates, scaled by pool quality so weak evidence cannot carry a
    /// confident-sounding score. The aggregate is symmetric in panel order.
    pub async fn assess(
        &self,
        claim_text: &str,
        pool: &EvidencePool,
    ) -> Result<ConsensusResult, ConsensusError> {
        let timeout = self.config.assessor_timeout();

        let tasks = self.panel.iter().map(|assessor| {
            let assessor = assessor.clone();
            async move {
                let id = assessor.id().to_string();
                match tokio::time::timeout(timeout, assessor.assess(claim_text, pool)).await {
                    Ok(Ok(verdict)) => Some(AssessorScore {
                        assessor: id,
                        trust_estimate: verdict.trust_estimate,
                        confidence: verdict.confidence,
                        reasoning: verdict.reasoning,
                    }),
                    Ok(Err(error)) => {
                        tracing::warn!(assessor = %id, error = %error, "Assessor failed");
                        None
                    }
                    Err(_) => {
                        tracing::warn!(
                            assessor = %id,
                            timeout_ms = timeout.as_millis() as u64,
                            "Assessor timed out"
                        );
                        None
                    }
                }
            }
        });

        let scores: Vec<AssessorScore> = join_all(tasks).await.into_iter().flatten().collect();

        if scores.len() < MIN_ASSESSORS {
            return Err(ConsensusError::Unavailable {
                responded: scores.len(),
                required: MIN_ASSESSORS,
            });
        }

        let disagreement_level = disagreement(&scores);
        let consensus_score = quality_weighted_score(&scores, pool.aggregate_quality);
        let uncertainty_indicators = self.uncertainty_indicators(disagreement_level, pool);

        tracing::info!(
            assessors = scores.len(),
            disagreement = disagreement_level,
            consensus = consensus_score,
            "Consensus reached"
        );

        Ok(ConsensusResult {
            scores,
            disagreement_level,
            consensus_score,
            uncertainty_indicators,
        })
    }

    fn uncertainty_indicators(&self, disagreement: f64, pool: &EvidencePool) -> Vec<String> {
        let mut indicators = Vec::new();
        if disagreement > self.config.disagreement_threshold {
            indicators.push("high assessor disagreement".to_string());
        }
        if pool.len() < self.config.min_pool_size {
            indicators.push("limited evidence pool".to_string());
        }
        if pool.methodology_diversity < self.config.min_diversity {
            indicators.push("low methodology diversity".to_string());
        }
        if pool.is_empty() {
            indicators.push("no supporting evidence found".to_string());
        }
        indicators
    }
}

fn disagreement(scores: &[AssessorScore]) -> f64 {
    let max = scores.iter().map(|s| s.trust_estimate).fold(f64::MIN, f64::max);
    let min = scores.iter().map(|s| s.trust_estimate).fold(f64::MAX, f64::min);
    max - min
}

fn quality_weighted_score(scores: &[AssessorScore], aggregate_quality: f64) -> f64 {
    let total_confidence: f64 = scores.iter().map(|s| s.confidence).sum();
    let base = if total_confidence > 0.0 {
        scores
            .iter()
            .map(|s| s.trust_estimate * s.confidence)
            .sum::<f64>()
            / total_confidence
    } else {
        // all assessors declined to state confidence; fall back to a
        // plain mean rather than dividing by zero
        scores.iter().map(|s| s.trust_estimate).sum::<f64>() / scores.len() as f64
    };
    base * (aggregate_quality / 100.0)
}
