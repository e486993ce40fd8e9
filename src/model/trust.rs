use crate::model::claim::Claim;
use crate::model::consensus::ConsensusResult;
use crate::model::evidence::EvidencePool;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade on the twelve-step academic scale. Serialized exactly as
/// the letter, "A+" through "F"; consumers key on these strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvidenceGrade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl fmt::Display for EvidenceGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EvidenceGrade::APlus => "A+",
            EvidenceGrade::A => "A",
            EvidenceGrade::AMinus => "A-",
            EvidenceGrade::BPlus => "B+",
            EvidenceGrade::B => "B",
            EvidenceGrade::BMinus => "B-",
            EvidenceGrade::CPlus => "C+",
            EvidenceGrade::C => "C",
            EvidenceGrade::CMinus => "C-",
            EvidenceGrade::DPlus => "D+",
            EvidenceGrade::D => "D",
            EvidenceGrade::F => "F",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLabel {
    High,
    Medium,
    Low,
}

// Terminal verdict for one claim. Every pipeline run produces one of
// these, including runs that failed a stage.
// - score: 0-100 trust score
// - grade: letter grade derived from the score
// - confidence: coarse label derived from disagreement and pool size
// - notes: degradation reasons, empty on a clean run
// - consensus: absent when the consensus stage never completed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustResult {
    pub claim: Claim,
    pub score: u8,
    pub grade: EvidenceGrade,
    pub confidence: ConfidenceLabel,
    pub notes: Vec<String>,
    pub evidence: EvidencePool,
    pub consensus: Option<ConsensusResult>,
    pub generated_at: DateTime<Utc>,
}
