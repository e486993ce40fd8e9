use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Evidence methodology a query is aimed at, or that a piece of evidence
/// was judged to come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodologyType {
    PeerReviewedStudy,
    SystematicReview,
    GovernmentReport,
    ExpertAnalysis,
    FactCheck,
    InvestigativeReport,
    DirectClaim,
}

impl MethodologyType {
    pub const ALL: [MethodologyType; 7] = [
        MethodologyType::PeerReviewedStudy,
        MethodologyType::SystematicReview,
        MethodologyType::GovernmentReport,
        MethodologyType::ExpertAnalysis,
        MethodologyType::FactCheck,
        MethodologyType::InvestigativeReport,
        MethodologyType::DirectClaim,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Position within the strategy. Stable across a run.
    pub id: usize,
    pub text: String,
    pub methodology: MethodologyType,
    /// Higher survives trimming longer.
    pub priority: u8,
    pub timeout: Duration,
}

// Bounded, ordered search plan for one claim.
// - queries: primary, then methodology-qualified, then counter-evidence
// - total_query_count: always equals queries.len(), kept for the wire format
// - audit_trail: one entry per budget/exemption decision taken while planning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchStrategy {
    pub queries: Vec<SearchQuery>,
    pub total_query_count: usize,
    pub audit_trail: Vec<String>,
}

impl SearchStrategy {
    pub fn new(queries: Vec<SearchQuery>, audit_trail: Vec<String>) -> Self {
        Self {
            total_query_count: queries.len(),
            queries,
            audit_trail,
        }
    }
}
