//! Evidence validation and pool assembly
//!
//! Scores every raw candidate for relevance, drops weak matches, and
//! assembles the final evidence pool: deduplicated, relevance-ranked,
//! capped, with stance assigned per entry and aggregate metrics computed
//! over the survivors. An empty pool is a valid outcome, not an error.

pub(crate) mod scoring;
pub(crate) mod sources;

use std::collections::HashSet;
use std::sync::Arc;

use crate::assessor::AssessorClient;
use crate::model::{
    ClaimInterpretation, EvidenceCandidate, EvidencePool, MethodologyType, ProcessedEvidence,
    SearchStrategy, Stance, ValidatorConfig,
};

pub struct EvidenceValidator {
    config: ValidatorConfig,
    stance_classifier: Option<Arc<dyn AssessorClient>>,
}

impl EvidenceValidator {
    pub fn new(
        config: ValidatorConfig,
        stance_classifier: Option<Arc<dyn AssessorClient>>,
    ) -> Self {
        Self {
            config,
            stance_classifier,
        }
    }

    /// Score, filter, rank and annotate candidates into an evidence pool.
    ///
    /// Candidates below the relevance floor are discarded, duplicates by
    /// `(url, title)` keep their first occurrence, and the pool is capped
    /// to the highest-relevance entries in descending order (ties keep
    /// discovery order).
    pub async fn validate(
        &self,
        claim_text: &str,
        interpretation: &ClaimInterpretation,
        strategy: &SearchStrategy,
        candidates: Vec<EvidenceCandidate>,
    ) -> EvidencePool {
        let total = candidates.len();

        let mut scored: Vec<(EvidenceCandidate, f64)> = candidates
            .into_iter()
            .map(|candidate| {
                let relevance = scoring::relevance(
                    claim_text,
                    interpretation,
                    &candidate.text,
                    &candidate.source_domain,
                );
                (candidate, relevance)
            })
            .filter(|(_, relevance)| *relevance >= self.config.relevance_floor)
            .collect();

        let mut seen = HashSet::new();
        scored.retain(|(candidate, _)| {
            seen.insert((candidate.url.to_string(), candidate.title.clone()))
        });

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(self.config.max_pool_size);

        let mut entries = Vec::with_capacity(scored.len());
        for (candidate, relevance) in scored {
            let methodology = sources::classify_methodology(&candidate.source_domain)
                .or_else(|| query_methodology(strategy, candidate.query_id))
                .unwrap_or(MethodologyType::DirectClaim);
            let methodology_quality = sources::source_quality(&candidate.source_domain);
            let stance = self.stance_of(claim_text, &candidate).await;

            entries.push(ProcessedEvidence {
                candidate,
                stance,
                relevance,
                methodology_quality,
                methodology,
            });
        }

        let aggregate_quality = if entries.is_empty() {
            0.0
        } else {
            entries.iter().map(|e| e.methodology_quality).sum::<f64>() / entries.len() as f64
        };
        let distinct: HashSet<MethodologyType> = entries.iter().map(|e| e.methodology).collect();
        let methodology_diversity = distinct.len() as f64 / MethodologyType::ALL.len() as f64;
        // a pool that claims breadth must actually span methodologies;
        // tiny or empty pools are compliant by not claiming anything
        let ifcn_compliant = entries.len() < 2 || distinct.len() >= 2;

        tracing::info!(
            candidates = total,
            pooled = entries.len(),
            aggregate_quality,
            methodology_diversity,
            "Evidence pool assembled"
        );

        EvidencePool {
            entries,
            aggregate_quality,
            methodology_diversity,
            ifcn_compliant,
        }
    }

    async fn stance_of(&self, claim_text: &str, candidate: &EvidenceCandidate) -> Stance {
        let Some(classifier) = &self.stance_classifier else {
            return Stance::Neutral;
        };
        match classifier.classify_stance(claim_text, &candidate.text).await {
            Ok(stance) => stance,
            Err(error) => {
                tracing::warn!(
                    url = %candidate.url,
                    error = %error,
                    "Stance classification failed, defaulting to neutral"
                );
                Stance::Neutral
            }
        }
    }
}

fn query_methodology(strategy: &SearchStrategy, query_id: usize) -> Option<MethodologyType> {
    strategy
        .queries
        .iter()
        .find(|q| q.id == query_id)
        .map(|q| q.methodology)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessor::{AssessorError, AssessorVerdict};
    use crate::model::SearchQuery;
    use crate::service::interpreter::ClaimInterpreter;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::time::Duration;
    use url::Url;

    struct ScriptedStance {
        fail: bool,
    }

    #[async_trait]
    impl AssessorClient for ScriptedStance {
        fn id(&self) -> &str {
            "scripted"
        }

        async fn assess(
            &self,
            _claim: &str,
            _pool: &EvidencePool,
        ) -> Result<AssessorVerdict, AssessorError> {
            Err(AssessorError::AssessmentFailed("not used here".to_string()))
        }

        async fn classify_stance(
            &self,
            _claim: &str,
            evidence_text: &str,
        ) -> Result<Stance, AssessorError> {
            if self.fail {
                return Err(AssessorError::StanceFailed("scripted outage".to_string()));
            }
            if evidence_text.contains("confirms") {
                Ok(Stance::Supporting)
            } else if evidence_text.contains("refutes") {
                Ok(Stance::Contradicting)
            } else {
                Ok(Stance::Neutral)
            }
        }
    }

    fn make_candidate(url: &str, title: &str, text: &str, query_id: usize) -> EvidenceCandidate {
        let url = Url::parse(url).unwrap();
        let source_domain = url.host_str().unwrap().to_string();
        EvidenceCandidate {
            id: format!("{url}#{title}"),
            text: text.to_string(),
            url,
            source_domain,
            title: title.to_string(),
            extracted_at: Utc::now(),
            query_id,
        }
    }

    fn make_strategy() -> SearchStrategy {
        let queries = vec![
            SearchQuery {
                id: 0,
                text: "vaccines autism".to_string(),
                methodology: MethodologyType::DirectClaim,
                priority: 3,
                timeout: Duration::from_secs(5),
            },
            SearchQuery {
                id: 1,
                text: "vaccines autism peer reviewed study".to_string(),
                methodology: MethodologyType::PeerReviewedStudy,
                priority: 2,
                timeout: Duration::from_secs(5),
            },
        ];
        SearchStrategy::new(queries, Vec::new())
    }

    fn validator(max_pool_size: usize) -> EvidenceValidator {
        let config = ValidatorConfig {
            max_pool_size,
            ..ValidatorConfig::default()
        };
        EvidenceValidator::new(config, Some(Arc::new(ScriptedStance { fail: false })))
    }

    #[tokio::test]
    async fn test_empty_candidates_yield_vacuous_pool() {
        let interpretation = ClaimInterpreter::new().interpret("Vaccines cause autism");
        let pool = validator(10)
            .validate("Vaccines cause autism", &interpretation, &make_strategy(), vec![])
            .await;

        assert!(pool.is_empty());
        assert!(pool.ifcn_compliant);
        assert_eq!(pool.aggregate_quality, 0.0);
        assert_eq!(pool.methodology_diversity, 0.0);
    }

    #[tokio::test]
    async fn test_off_subject_evidence_is_dropped() {
        let claim = "Climate change policies will destroy the economy";
        let interpretation = ClaimInterpreter::new().interpret(claim);
        let candidates = vec![
            make_candidate(
                "https://blog.example.com/carbon-tax",
                "Carbon tax impact",
                "Peer reviewed study finds carbon tax policies reduce GDP growth \
                 and impose economic cost on the economy",
                0,
            ),
            make_candidate(
                "https://blog.example.com/hurricane",
                "Hurricane season",
                "Hurricane damage cost the economy billions in 2023",
                0,
            ),
        ];

        let pool = validator(10)
            .validate(claim, &interpretation, &make_strategy(), candidates)
            .await;

        assert_eq!(pool.len(), 1);
        assert_eq!(pool.entries[0].candidate.title, "Carbon tax impact");
    }

    #[tokio::test]
    async fn test_pool_is_ranked_deduplicated_and_capped() {
        let claim = "Vaccines cause autism";
        let interpretation = ClaimInterpreter::new().interpret(claim);
        let candidates = vec![
            make_candidate("https://reuters.com/a", "Wire story", "vaccines autism evidence", 0),
            make_candidate("https://nature.com/b", "Journal study", "vaccines autism evidence", 1),
            make_candidate("https://reuters.com/a", "Wire story", "vaccines autism evidence", 1),
            make_candidate("https://oddsite.example", "Blog post", "vaccines autism evidence", 0),
        ];

        let pool = validator(2)
            .validate(claim, &interpretation, &make_strategy(), candidates)
            .await;

        // duplicate wire story collapses, blog post falls off the cap,
        // journal outranks wire on source quality
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.entries[0].candidate.source_domain, "nature.com");
        assert_eq!(pool.entries[1].candidate.source_domain, "reuters.com");
        assert!(pool.entries[0].relevance > pool.entries[1].relevance);

        assert_eq!(pool.entries[0].methodology, MethodologyType::PeerReviewedStudy);
        assert_eq!(pool.entries[1].methodology, MethodologyType::DirectClaim);
        assert_eq!(pool.aggregate_quality, 85.0);
        assert_eq!(pool.methodology_diversity, 2.0 / 7.0);
        assert!(pool.ifcn_compliant);
    }

    #[tokio::test]
    async fn test_single_methodology_pool_is_not_compliant() {
        let claim = "Vaccines cause autism";
        let interpretation = ClaimInterpreter::new().interpret(claim);
        let candidates = vec![
            make_candidate("https://site-a.example", "A", "vaccines autism evidence", 0),
            make_candidate("https://site-b.example", "B", "vaccines autism evidence", 0),
            make_candidate("https://site-c.example", "C", "vaccines autism evidence", 0),
        ];

        let pool = validator(10)
            .validate(claim, &interpretation, &make_strategy(), candidates)
            .await;

        assert_eq!(pool.len(), 3);
        assert!(pool.entries.iter().all(|e| e.methodology == MethodologyType::DirectClaim));
        assert!(!pool.ifcn_compliant);
    }

    #[tokio::test]
    async fn test_query_methodology_backfills_unknown_domains() {
        let claim = "Vaccines cause autism";
        let interpretation = ClaimInterpreter::new().interpret(claim);
        let candidates = vec![make_candidate(
            "https://obscure-journal.example",
            "Study",
            "vaccines autism evidence",
            1,
        )];

        let pool = validator(10)
            .validate(claim, &interpretation, &make_strategy(), candidates)
            .await;

        assert_eq!(pool.entries[0].methodology, MethodologyType::PeerReviewedStudy);
    }

    #[tokio::test]
    async fn test_stance_comes_from_classifier() {
        let claim = "Vaccines cause autism";
        let interpretation = ClaimInterpreter::new().interpret(claim);
        let candidates = vec![
            make_candidate(
                "https://site-a.example",
                "A",
                "study confirms vaccines autism link claimed here",
                0,
            ),
            make_candidate(
                "https://site-b.example",
                "B",
                "study refutes vaccines autism link claimed here",
                0,
            ),
        ];

        let pool = validator(10)
            .validate(claim, &interpretation, &make_strategy(), candidates)
            .await;

        assert_eq!(pool.len(), 2);
        let stances: Vec<Stance> = pool.entries.iter().map(|e| e.stance).collect();
        assert!(stances.contains(&Stance::Supporting));
        assert!(stances.contains(&Stance::Contradicting));
    }

    #[tokio::test]
    async fn test_classifier_failure_defaults_to_neutral() {
        let claim = "Vaccines cause autism";
        let interpretation = ClaimInterpreter::new().interpret(claim);
        let candidates = vec![make_candidate(
            "https://site-a.example",
            "A",
            "vaccines autism evidence",
            0,
        )];

        let config = ValidatorConfig::default();
        let validator =
            EvidenceValidator::new(config, Some(Arc::new(ScriptedStance { fail: true })));
        let pool = validator
            .validate(claim, &interpretation, &make_strategy(), candidates)
            .await;

        assert_eq!(pool.entries[0].stance, Stance::Neutral);
    }
}
