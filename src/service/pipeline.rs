//! Pipeline orchestration
//!
//! Drives one claim through interpret, plan, gather, validate, consensus
//! and scoring under a single wall-clock deadline. Stage failures never
//! escape: every claim ends in a `TrustResult`, degraded ones carry a
//! zero score and a note naming what went wrong.

use std::sync::Arc;

use futures::future::join_all;
use tokio::time::{Instant, timeout_at};

use crate::assessor::AssessorClient;
use crate::model::{
    Claim, ClaimInterpretation, EvidencePool, PipelineConfig, SearchStrategy, TrustResult,
};
use crate::search::EvidenceSources;
use crate::service::consensus::{ConsensusEngine, ConsensusError};
use crate::service::gatherer::{EvidenceGatherer, GatherError};
use crate::service::interpreter::ClaimInterpreter;
use crate::service::strategist::MethodologySearchStrategist;
use crate::service::trust::TrustScoringEngine;
use crate::service::validator::EvidenceValidator;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("evidence gathering failed: {0}")]
    Gathering(#[from] GatherError),
    #[error("consensus failed: {0}")]
    Consensus(#[from] ConsensusError),
    #[error("deadline exceeded during {stage}")]
    Timeout { stage: &'static str },
}

pub struct PipelineOrchestrator {
    config: PipelineConfig,
    interpreter: ClaimInterpreter,
    strategist: MethodologySearchStrategist,
    gatherer: EvidenceGatherer,
    validator: EvidenceValidator,
    consensus: ConsensusEngine,
    scorer: TrustScoringEngine,
}

impl PipelineOrchestrator {
    pub fn new(
        config: PipelineConfig,
        sources: Arc<dyn EvidenceSources>,
        panel: Vec<Arc<dyn AssessorClient>>,
    ) -> Self {
        let interpreter = ClaimInterpreter::new();
        let strategist = MethodologySearchStrategist::new(config.strategy.clone());
        let gatherer = EvidenceGatherer::new(config.gather.clone(), sources);
        let validator = EvidenceValidator::new(config.validator.clone(), panel.first().cloned());
        let consensus = ConsensusEngine::new(config.consensus.clone(), panel);
        let scorer = TrustScoringEngine::new();

        Self {
            config,
            interpreter,
            strategist,
            gatherer,
            validator,
            consensus,
            scorer,
        }
    }

    /// Verify one claim end to end. Never errors; a claim whose pipeline
    /// fails a stage comes back as a terminal zero-score result.
    pub async fn process(&self, claim_text: &str) -> TrustResult {
        let interpretation = self.interpreter.interpret(claim_text);
        let strategy = self.strategist.build_strategy(claim_text, &interpretation);
        self.run(Claim::new(claim_text), interpretation, strategy).await
    }

    /// Verify one claim with a caller-supplied query plan instead of the
    /// strategist's.
    pub async fn process_with_strategy(
        &self,
        claim_text: &str,
        strategy: SearchStrategy,
    ) -> TrustResult {
        let interpretation = self.interpreter.interpret(claim_text);
        self.run(Claim::new(claim_text), interpretation, strategy).await
    }

    /// Verify a batch of claims, a bounded number at a time. Results come
    /// back in input order.
    pub async fn process_batch(&self, claims: &[String]) -> Vec<TrustResult> {
        let chunk_size = self.config.batch_concurrency.max(1);
        let mut results = Vec::with_capacity(claims.len());
        for chunk in claims.chunks(chunk_size) {
            let batch = chunk.iter().map(|text| self.process(text));
            results.extend(join_all(batch).await);
        }
        results
    }

    async fn run(
        &self,
        claim: Claim,
        interpretation: ClaimInterpretation,
        strategy: SearchStrategy,
    ) -> TrustResult {
        let started = Instant::now();
        let deadline = started + self.config.claim_deadline();

        tracing::info!(
            claim = %claim.id,
            queries = strategy.total_query_count,
            "Pipeline started"
        );

        let candidates = match self.gatherer.gather(&strategy, deadline).await {
            Ok(candidates) => candidates,
            Err(error) => {
                return self.degrade(claim, EvidencePool::empty(), PipelineError::Gathering(error));
            }
        };

        let validation = self
            .validator
            .validate(&claim.text, &interpretation, &strategy, candidates);
        let pool = match timeout_at(deadline, validation).await {
            Ok(pool) => pool,
            Err(_) => {
                return self.degrade(
                    claim,
                    EvidencePool::empty(),
                    PipelineError::Timeout { stage: "validation" },
                );
            }
        };

        let consensus = match timeout_at(deadline, self.consensus.assess(&claim.text, &pool)).await
        {
            Ok(Ok(consensus)) => consensus,
            Ok(Err(error)) => return self.degrade(claim, pool, PipelineError::Consensus(error)),
            Err(_) => {
                return self.degrade(claim, pool, PipelineError::Timeout { stage: "consensus" });
            }
        };

        let result = self.scorer.score(claim, consensus, pool);
        tracing::info!(
            claim = %result.claim.id,
            score = result.score,
            grade = %result.grade,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Pipeline finished"
        );
        result
    }

    fn degrade(&self, claim: Claim, pool: EvidencePool, error: PipelineError) -> TrustResult {
        tracing::warn!(claim = %claim.id, error = %error, "Pipeline degraded to terminal result");
        self.scorer.terminal(claim, pool, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessor::{AssessorError, AssessorVerdict};
    use crate::model::{ConfidenceLabel, EvidenceGrade, MethodologyType, SearchQuery, Stance};
    use crate::search::{
        ContentExtractor, ExtractedContent, SearchError, SearchHit, SearchProvider,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;
    use url::Url;

    // search provider scripted by claim topic: astronomy queries find
    // journal-grade orbit sources, vaccine queries find health bodies,
    // anything else finds nothing
    struct ScriptedProvider {
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl SearchProvider for ScriptedProvider {
        async fn search(
            &self,
            query: &str,
            _max_results: usize,
        ) -> Result<Vec<SearchHit>, SearchError> {
            self.seen.lock().unwrap().push(query.to_string());

            let query = query.to_lowercase();
            let hosts: &[&str] = if query.contains("earth") {
                &["nature.com", "nejm.org", "cochrane.org", "who.int"]
            } else if query.contains("vaccines") {
                &["cdc.gov", "who.int", "cochrane.org"]
            } else {
                return Ok(Vec::new());
            };

            let marker = if query.contains("earth") { "orbit" } else { "vax" };
            Ok(hosts
                .iter()
                .map(|host| SearchHit {
                    url: Url::parse(&format!("https://{host}/{marker}")).unwrap(),
                    title: format!("{marker} coverage from {host}"),
                    snippet: String::new(),
                })
                .collect())
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    struct ScriptedExtractor;

    #[async_trait]
    impl ContentExtractor for ScriptedExtractor {
        async fn extract(&self, url: &Url) -> ExtractedContent {
            let text = if url.path().contains("orbit") {
                "Observations confirm the earth orbits the sun every year"
            } else if url.path().contains("vax") {
                "large studies refute the vaccines autism link"
            } else {
                return ExtractedContent::failed(url);
            };
            ExtractedContent {
                text: text.to_string(),
                title: None,
                domain: url.host_str().unwrap_or_default().to_string(),
                success: true,
            }
        }
    }

    struct ScriptedSources {
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedSources {
        fn new() -> Self {
            Self {
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl EvidenceSources for ScriptedSources {
        fn search_provider(&self) -> Box<dyn SearchProvider> {
            Box::new(ScriptedProvider {
                seen: self.seen.clone(),
            })
        }

        fn content_extractor(&self) -> Box<dyn ContentExtractor> {
            Box::new(ScriptedExtractor)
        }
    }

    // assessor scripted by claim text: sees through the vaccine claim,
    // endorses the astronomy claim
    struct ScriptedAssessor {
        id: String,
        truthful_estimate: f64,
        false_estimate: f64,
        confidence: f64,
        stance_delay: Option<Duration>,
        fail: bool,
    }

    #[async_trait]
    impl AssessorClient for ScriptedAssessor {
        fn id(&self) -> &str {
            &self.id
        }

        async fn assess(
            &self,
            claim: &str,
            _pool: &EvidencePool,
        ) -> Result<AssessorVerdict, AssessorError> {
            if self.fail {
                return Err(AssessorError::AssessmentFailed("scripted outage".to_string()));
            }
            let estimate = if claim.contains("Vaccines") {
                self.false_estimate
            } else {
                self.truthful_estimate
            };
            Ok(AssessorVerdict {
                trust_estimate: estimate,
                confidence: self.confidence,
                reasoning: vec![format!("{} verdict", self.id)],
            })
        }

        async fn classify_stance(
            &self,
            _claim: &str,
            evidence_text: &str,
        ) -> Result<Stance, AssessorError> {
            if let Some(delay) = self.stance_delay {
                tokio::time::sleep(delay).await;
            }
            if evidence_text.contains("confirm") {
                Ok(Stance::Supporting)
            } else if evidence_text.contains("refute") {
                Ok(Stance::Contradicting)
            } else {
                Ok(Stance::Neutral)
            }
        }
    }

    fn make_assessor(
        id: &str,
        truthful: f64,
        falsy: f64,
        confidence: f64,
    ) -> Arc<ScriptedAssessor> {
        Arc::new(ScriptedAssessor {
            id: id.to_string(),
            truthful_estimate: truthful,
            false_estimate: falsy,
            confidence,
            stance_delay: None,
            fail: false,
        })
    }

    fn make_panel() -> Vec<Arc<dyn AssessorClient>> {
        vec![
            make_assessor("model-a", 97.0, 15.0, 90.0),
            make_assessor("model-b", 95.0, 10.0, 85.0),
        ]
    }

    fn orchestrator() -> PipelineOrchestrator {
        PipelineOrchestrator::new(
            PipelineConfig::default(),
            Arc::new(ScriptedSources::new()),
            make_panel(),
        )
    }

    #[tokio::test]
    async fn test_well_supported_claim_scores_high() {
        let result = orchestrator().process("The Earth orbits the Sun").await;

        assert_eq!(result.score, 89);
        assert_eq!(result.grade, EvidenceGrade::AMinus);
        assert_eq!(result.confidence, ConfidenceLabel::High);
        assert!(result.notes.is_empty());
        assert_eq!(result.evidence.len(), 4);
        assert!(result.consensus.is_some());
        assert!(
            result
                .evidence
                .entries
                .iter()
                .all(|e| e.stance == Stance::Supporting)
        );
    }

    #[tokio::test]
    async fn test_refuted_claim_scores_low_with_confidence() {
        let result = orchestrator().process("Vaccines cause autism").await;

        assert!(result.score < 20, "score {}", result.score);
        assert_eq!(result.grade, EvidenceGrade::F);
        // assessors agree, so the low verdict is still a confident one
        assert_eq!(result.confidence, ConfidenceLabel::High);
        assert_eq!(result.evidence.len(), 3);
        assert!(
            result
                .evidence
                .entries
                .iter()
                .all(|e| e.stance == Stance::Contradicting)
        );
    }

    #[tokio::test]
    async fn test_no_search_results_is_terminal_not_error() {
        let result = orchestrator().process("Unfindable nonsense claim").await;

        assert_eq!(result.score, 0);
        assert_eq!(result.grade, EvidenceGrade::F);
        assert_eq!(result.confidence, ConfidenceLabel::Low);
        assert!(result.evidence.is_empty());
        assert!(result.consensus.is_none());
        assert!(result.notes[0].contains("gathering failed"), "{:?}", result.notes);
    }

    #[tokio::test]
    async fn test_consensus_unavailable_keeps_gathered_evidence() {
        let broken = Arc::new(ScriptedAssessor {
            id: "broken".to_string(),
            truthful_estimate: 0.0,
            false_estimate: 0.0,
            confidence: 0.0,
            stance_delay: None,
            fail: true,
        });
        let panel: Vec<Arc<dyn AssessorClient>> =
            vec![make_assessor("model-a", 97.0, 15.0, 90.0), broken];
        let orchestrator = PipelineOrchestrator::new(
            PipelineConfig::default(),
            Arc::new(ScriptedSources::new()),
            panel,
        );

        let result = orchestrator.process("The Earth orbits the Sun").await;

        assert_eq!(result.score, 0);
        assert_eq!(result.grade, EvidenceGrade::F);
        assert!(result.notes[0].contains("consensus failed"), "{:?}", result.notes);
        // the pool survives into the terminal result
        assert_eq!(result.evidence.len(), 4);
        assert!(result.consensus.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_cuts_off_slow_validation() {
        let slow = Arc::new(ScriptedAssessor {
            id: "slow".to_string(),
            truthful_estimate: 97.0,
            false_estimate: 15.0,
            confidence: 90.0,
            stance_delay: Some(Duration::from_secs(300)),
            fail: false,
        });
        let panel: Vec<Arc<dyn AssessorClient>> =
            vec![slow, make_assessor("model-b", 95.0, 10.0, 85.0)];
        let orchestrator = PipelineOrchestrator::new(
            PipelineConfig::default(),
            Arc::new(ScriptedSources::new()),
            panel,
        );

        let started = Instant::now();
        let result = orchestrator.process("The Earth orbits the Sun").await;

        assert_eq!(result.score, 0);
        assert_eq!(result.confidence, ConfidenceLabel::Low);
        assert!(
            result.notes[0].contains("deadline exceeded during validation"),
            "{:?}",
            result.notes
        );
        // the run ended at the claim deadline, not after the slow call
        let elapsed = Instant::now().duration_since(started);
        assert!(elapsed < Duration::from_secs(30), "elapsed {elapsed:?}");
    }

    #[tokio::test]
    async fn test_irrelevant_evidence_ends_with_empty_pool_verdict() {
        // queries resolve, but every page is about something else
        struct OffTopicExtractor;

        #[async_trait]
        impl ContentExtractor for OffTopicExtractor {
            async fn extract(&self, url: &Url) -> ExtractedContent {
                ExtractedContent {
                    text: "a long article about gardening techniques".to_string(),
                    title: None,
                    domain: url.host_str().unwrap_or_default().to_string(),
                    success: true,
                }
            }
        }

        struct OffTopicSources {
            seen: Arc<Mutex<Vec<String>>>,
        }

        impl EvidenceSources for OffTopicSources {
            fn search_provider(&self) -> Box<dyn SearchProvider> {
                Box::new(ScriptedProvider {
                    seen: self.seen.clone(),
                })
            }

            fn content_extractor(&self) -> Box<dyn ContentExtractor> {
                Box::new(OffTopicExtractor)
            }
        }

        let orchestrator = PipelineOrchestrator::new(
            PipelineConfig::default(),
            Arc::new(OffTopicSources {
                seen: Arc::new(Mutex::new(Vec::new())),
            }),
            make_panel(),
        );

        let result = orchestrator.process("Vaccines cause autism").await;

        assert_eq!(result.score, 0);
        assert_eq!(result.grade, EvidenceGrade::F);
        assert_eq!(result.confidence, ConfidenceLabel::Low);
        assert!(result.evidence.is_empty());
        // consensus still ran and flagged the empty pool
        assert!(result.consensus.is_some());
        assert!(
            result
                .notes
                .contains(&"no supporting evidence found".to_string()),
            "{:?}",
            result.notes
        );
    }

    #[tokio::test]
    async fn test_process_with_strategy_uses_only_given_queries() {
        let sources = Arc::new(ScriptedSources::new());
        let seen = sources.seen.clone();
        let orchestrator =
            PipelineOrchestrator::new(PipelineConfig::default(), sources, make_panel());

        let strategy = SearchStrategy::new(
            vec![SearchQuery {
                id: 0,
                text: "earth orbit observations".to_string(),
                methodology: MethodologyType::PeerReviewedStudy,
                priority: 3,
                timeout: Duration::from_secs(5),
            }],
            Vec::new(),
        );

        let result = orchestrator
            .process_with_strategy("The Earth orbits the Sun", strategy)
            .await;

        assert!(result.score > 80);
        let queries = seen.lock().unwrap();
        assert_eq!(*queries, vec!["earth orbit observations".to_string()]);
    }

    #[tokio::test]
    async fn test_default_process_fans_out_multiple_queries() {
        let sources = Arc::new(ScriptedSources::new());
        let seen = sources.seen.clone();
        let orchestrator =
            PipelineOrchestrator::new(PipelineConfig::default(), sources, make_panel());

        orchestrator.process("The Earth orbits the Sun").await;

        let queries = seen.lock().unwrap();
        assert!(queries.len() >= 2, "queries {queries:?}");
        assert!(queries.len() <= 12);
    }

    #[tokio::test]
    async fn test_batch_preserves_input_order() {
        let claims = vec![
            "The Earth orbits the Sun".to_string(),
            "Vaccines cause autism".to_string(),
        ];
        let results = orchestrator().process_batch(&claims).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].claim.text, "The Earth orbits the Sun");
        assert_eq!(results[1].claim.text, "Vaccines cause autism");
        assert!(results[0].score > results[1].score);
    }

    #[tokio::test]
    async fn test_repeat_runs_are_stable() {
        let orchestrator = orchestrator();
        let first = orchestrator.process("The Earth orbits the Sun").await;
        let second = orchestrator.process("The Earth orbits the Sun").await;

        assert_eq!(first.score, second.score);
        assert_eq!(first.grade, second.grade);
        assert_eq!(first.confidence, second.confidence);
    }
}
