//! OpenAI-backed assessor using structured extraction

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::providers::openai;

use super::prompts::{
    ASSESSOR_SYSTEM_PROMPT, STANCE_SYSTEM_PROMPT, build_assessment_prompt, build_stance_prompt,
};
use super::{AssessorClient, AssessorError, AssessorVerdict};
use crate::model::{EvidencePool, Stance};

/// Verdict shape extracted from the model
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
struct ExtractedVerdict {
    #[schemars(description = "Trust estimate for the claim, 0-100")]
    trust_estimate: f64,
    #[schemars(description = "Confidence in the estimate, 0-100")]
    confidence: f64,
    #[schemars(description = "Short concrete reasoning steps behind the estimate")]
    reasoning: Vec<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
struct ExtractedStance {
    stance: ExtractedStanceKind,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
enum ExtractedStanceKind {
    Supporting,
    Contradicting,
    Neutral,
}

impl From<ExtractedStanceKind> for Stance {
    fn from(kind: ExtractedStanceKind) -> Self {
        match kind {
            ExtractedStanceKind::Supporting => Stance::Supporting,
            ExtractedStanceKind::Contradicting => Stance::Contradicting,
            ExtractedStanceKind::Neutral => Stance::Neutral,
        }
    }
}

/// Assessor backed by one OpenAI model. Two instances with different
/// models make two independent panel members.
pub struct OpenAiAssessor {
    client: openai::Client,
    model: String,
    id: String,
}

impl OpenAiAssessor {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            client: openai::Client::new(api_key),
            model: model.to_string(),
            id: format!("openai:{model}"),
        }
    }
}

#[async_trait]
impl AssessorClient for OpenAiAssessor {
    fn id(&self) -> &str {
        &self.id
    }

    async fn assess(
        &self,
        claim: &str,
        pool: &EvidencePool,
    ) -> Result<AssessorVerdict, AssessorError> {
        let prompt = build_assessment_prompt(claim, pool);
        let prompt_length = prompt.len();

        tracing::debug!(
            assessor = %self.id,
            model = %self.model,
            pool_size = pool.len(),
            prompt_length = prompt_length,
            "Initiating OpenAI API call for claim assessment"
        );

        let start_time = std::time::Instant::now();

        // temperature=0.0 and seed keep repeated assessments reproducible
        let extractor = self
            .client
            .extractor::<ExtractedVerdict>(&self.model)
            .preamble(ASSESSOR_SYSTEM_PROMPT)
            .additional_params(serde_json::json!({
                "temperature": 0.0,
                "seed": 42
            }))
            .build();

        let extracted = match extractor.extract(&prompt).await {
            Ok(result) => {
                let elapsed = start_time.elapsed();
                tracing::info!(
                    assessor = %self.id,
                    model = %self.model,
                    elapsed_ms = elapsed.as_millis(),
                    prompt_length = prompt_length,
                    "OpenAI API call for claim assessment completed successfully"
                );
                result
            }
            Err(e) => {
                let elapsed = start_time.elapsed();
                tracing::error!(
                    assessor = %self.id,
                    model = %self.model,
                    elapsed_ms = elapsed.as_millis(),
                    prompt_length = prompt_length,
                    error = %e,
                    "OpenAI API call for claim assessment failed"
                );
                return Err(AssessorError::AssessmentFailed(e.to_string()));
            }
        };

        Ok(AssessorVerdict {
            trust_estimate: extracted.trust_estimate.clamp(0.0, 100.0),
            confidence: extracted.confidence.clamp(0.0, 100.0),
            reasoning: extracted.reasoning,
        })
    }

    async fn classify_stance(
        &self,
        claim: &str,
        evidence_text: &str,
    ) -> Result<Stance, AssessorError> {
        let prompt = build_stance_prompt(claim, evidence_text);

        let extractor = self
            .client
            .extractor::<ExtractedStance>(&self.model)
            .preamble(STANCE_SYSTEM_PROMPT)
            .additional_params(serde_json::json!({
                "temperature": 0.0,
                "seed": 42
            }))
            .build();

        match extractor.extract(&prompt).await {
            Ok(result) => Ok(result.stance.into()),
            Err(e) => {
                tracing::debug!(
                    assessor = %self.id,
                    error = %e,
                    "Stance classification call failed"
                );
                Err(AssessorError::StanceFailed(e.to_string()))
            }
        }
    }
}
