use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A claim submitted for verification. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    pub id: Uuid,
    pub text: String,
    pub received_at: DateTime<Utc>,
}

impl Claim {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            received_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Causal,
    Comparative,
    Descriptive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalAspect {
    Past,
    Present,
    Future,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertaintyLevel {
    Definitive,
    Probable,
    Speculative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionType {
    Causal,
    Correlational,
    Descriptive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimScope {
    Universal,
    Particular,
    Conditional,
}

/// Subject domains the interpreter can classify a claim into. Ordering is
/// the tie-break priority when keyword hits are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimDomain {
    Health,
    Science,
    Climate,
    Economics,
    Politics,
    Technology,
    History,
    General,
}

impl ClaimDomain {
    /// Lower value wins ties. `General` never outranks a matched domain.
    pub fn priority(&self) -> u8 {
        match self {
            ClaimDomain::Health => 0,
            ClaimDomain::Science => 1,
            ClaimDomain::Climate => 2,
            ClaimDomain::Economics => 3,
            ClaimDomain::Politics => 4,
            ClaimDomain::Technology => 5,
            ClaimDomain::History => 6,
            ClaimDomain::General => 7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainClassification {
    pub domain: ClaimDomain,
    /// 0-100. Scales with keyword hit count, capped below certainty.
    pub confidence: f64,
    pub matched_keywords: Vec<String>,
}

// Structured reading of a claim produced by the interpreter.
// - subject/object: the entities the claim relates ("unspecified" when absent)
// - relationship: how the claim connects them
// - temporal: the tense the claim speaks in
// - certainty: how strongly the claim asserts itself
// - assertion: the logical kind of the assertion
// - scope: how broadly the claim quantifies
// - qualifiers: hedge words found in the text
// - domain: subject-domain classification with evidence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimInterpretation {
    pub subject: String,
    pub object: String,
    pub relationship: RelationshipType,
    pub temporal: TemporalAspect,
    pub certainty: CertaintyLevel,
    pub assertion: AssertionType,
    pub scope: ClaimScope,
    pub qualifiers: Vec<String>,
    pub domain: DomainClassification,
}
