//! AI assessor clients used for consensus scoring and stance classification
//!
//! The panel is resolved from configuration once at startup; pipeline code
//! only ever sees the `AssessorClient` trait.

mod openai;
mod prompts;

use std::sync::Arc;

use async_trait::async_trait;

use crate::model::{AssessorKind, EvidencePool, PipelineConfig, Stance};

pub use openai::OpenAiAssessor;

#[derive(Debug, thiserror::Error)]
pub enum AssessorError {
    #[error("No API key configured for assessor backend")]
    MissingApiKey,

    #[error("Assessment call failed: {0}")]
    AssessmentFailed(String),

    #[error("Stance classification failed: {0}")]
    StanceFailed(String),
}

/// One assessor's verdict on a claim given an evidence pool
#[derive(Debug, Clone)]
pub struct AssessorVerdict {
    /// 0-100 trust estimate
    pub trust_estimate: f64,
    /// 0-100 self-reported confidence
    pub confidence: f64,
    pub reasoning: Vec<String>,
}

/// Trait for AI assessors
#[async_trait]
pub trait AssessorClient: Send + Sync {
    /// Stable identifier, recorded on every score this assessor produces
    fn id(&self) -> &str;

    /// Independently assess the claim against the validated evidence pool
    async fn assess(
        &self,
        claim: &str,
        pool: &EvidencePool,
    ) -> Result<AssessorVerdict, AssessorError>;

    /// Classify whether one piece of evidence supports or contradicts the claim
    async fn classify_stance(
        &self,
        claim: &str,
        evidence_text: &str,
    ) -> Result<Stance, AssessorError>;
}

/// Resolve the configured assessor panel to concrete clients.
///
/// Called once at startup; the selection never changes mid-run.
pub fn build_panel(config: &PipelineConfig) -> Result<Vec<Arc<dyn AssessorClient>>, AssessorError> {
    let mut panel: Vec<Arc<dyn AssessorClient>> = Vec::with_capacity(config.assessors.len());

    for assessor in &config.assessors {
        match assessor.kind {
            AssessorKind::OpenAi => {
                let api_key = config
                    .openai_api_key
                    .as_deref()
                    .ok_or(AssessorError::MissingApiKey)?;
                panel.push(Arc::new(OpenAiAssessor::new(api_key, &assessor.model)));
            }
        }
    }

    tracing::info!(panel_size = panel.len(), "Assessor panel initialized");
    Ok(panel)
}
