use serde::{Deserialize, Serialize};

/// One assessor's independent reading of the evidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessorScore {
    /// Stable identifier of the assessor that produced this score.
    pub assessor: String,
    /// 0-100 trust estimate for the claim.
    pub trust_estimate: f64,
    /// 0-100 self-reported confidence in the estimate.
    pub confidence: f64,
    pub reasoning: Vec<String>,
}

// Aggregated multi-assessor outcome. Only built when at least two
// assessors responded; a thinner panel is a stage failure, never a
// single-assessor result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub scores: Vec<AssessorScore>,
    /// Spread between the highest and lowest trust estimate.
    pub disagreement_level: f64,
    /// Confidence-weighted estimate, scaled by evidence pool quality.
    pub consensus_score: f64,
    pub uncertainty_indicators: Vec<String>,
}
