//! Trust scoring
//!
//! Pure and deterministic: consensus plus pool in, graded result out.
//! Disagreement among assessors is penalized directly, the grade comes
//! from a fixed threshold table, and the confidence label reflects how
//! much the verdict itself can be trusted, not whether the claim is true.

use chrono::Utc;

use crate::model::{
    Claim, ConfidenceLabel, ConsensusResult, EvidenceGrade, EvidencePool, TrustResult,
};

const DISAGREEMENT_PENALTY: f64 = 0.3;
const HIGH_MAX_DISAGREEMENT: f64 = 10.0;
const HIGH_MIN_POOL: usize = 3;
const LOW_MIN_DISAGREEMENT: f64 = 25.0;

// ordered highest to lowest, first match wins; anything below D is F
const GRADE_THRESHOLDS: &[(f64, EvidenceGrade)] = &[
    (97.0, EvidenceGrade::APlus),
    (90.0, EvidenceGrade::A),
    (87.0, EvidenceGrade::AMinus),
    (80.0, EvidenceGrade::BPlus),
    (77.0, EvidenceGrade::B),
    (73.0, EvidenceGrade::BMinus),
    (70.0, EvidenceGrade::CPlus),
    (67.0, EvidenceGrade::C),
    (63.0, EvidenceGrade::CMinus),
    (60.0, EvidenceGrade::DPlus),
    (50.0, EvidenceGrade::D),
];

#[derive(Default)]
pub struct TrustScoringEngine;

impl TrustScoringEngine {
    pub fn new() -> Self {
        Self
    }

    /// Convert a consensus into the final graded result. The consensus
    /// score is penalized by `disagreement × 0.3`, clamped to [0, 100]
    /// and rounded; grade and confidence derive from the rounded score
    /// and the pool.
    pub fn score(
        &self,
        claim: Claim,
        consensus: ConsensusResult,
        evidence: EvidencePool,
    ) -> TrustResult {
        let penalized =
            consensus.consensus_score - consensus.disagreement_level * DISAGREEMENT_PENALTY;
        let score = penalized.clamp(0.0, 100.0).round() as u8;
        let grade = grade_of(score);
        let confidence = confidence_of(consensus.disagreement_level, &evidence);
        let notes = consensus.uncertainty_indicators.clone();

        tracing::debug!(score, grade = %grade, confidence = ?confidence, "Claim scored");

        TrustResult {
            claim,
            score,
            grade,
            confidence,
            notes,
            evidence,
            consensus: Some(consensus),
            generated_at: Utc::now(),
        }
    }

    /// Result for a claim whose pipeline could not reach consensus:
    /// zero score, failing grade, low confidence, and a note saying why.
    pub fn terminal(&self, claim: Claim, evidence: EvidencePool, note: String) -> TrustResult {
        TrustResult {
            claim,
            score: 0,
            grade: EvidenceGrade::F,
            confidence: ConfidenceLabel::Low,
            notes: vec![note],
            evidence,
            consensus: None,
            generated_at: Utc::now(),
        }
    }
}

fn grade_of(score: u8) -> EvidenceGrade {
    let score = f64::from(score);
    for (threshold, grade) in GRADE_THRESHOLDS {
        if score >= *threshold {
            return *grade;
        }
    }
    EvidenceGrade::F
}

fn confidence_of(disagreement: f64, pool: &EvidencePool) -> ConfidenceLabel {
    if disagreement < HIGH_MAX_DISAGREEMENT && pool.len() >= HIGH_MIN_POOL {
        ConfidenceLabel::High
    } else if disagreement > LOW_MIN_DISAGREEMENT || pool.is_empty() {
        ConfidenceLabel::Low
    } else {
        ConfidenceLabel::Medium
    }
}
