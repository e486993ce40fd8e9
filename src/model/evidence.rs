use crate::model::strategy::MethodologyType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Raw evidence pulled off the web, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceCandidate {
    /// Content hash of url + title, used for identity and dedup.
    pub id: String,
    pub text: String,
    pub url: Url,
    pub source_domain: String,
    pub title: String,
    pub extracted_at: DateTime<Utc>,
    /// Id of the strategy query that produced this candidate.
    pub query_id: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    Supporting,
    Contradicting,
    Neutral,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedEvidence {
    pub candidate: EvidenceCandidate,
    pub stance: Stance,
    /// 0-100 composite relevance. Entries below the floor never reach a pool.
    pub relevance: f64,
    /// 0-100 methodological rigor of the source.
    pub methodology_quality: f64,
    pub methodology: MethodologyType,
}

// Validated evidence for one claim.
// - entries: relevance-descending, deduplicated by (url, title), capped
// - aggregate_quality: mean methodology_quality of the entries
// - methodology_diversity: distinct methodology types / total possible
// - ifcn_compliant: whether the pool satisfies methodology-first sourcing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidencePool {
    pub entries: Vec<ProcessedEvidence>,
    pub aggregate_quality: f64,
    pub methodology_diversity: f64,
    pub ifcn_compliant: bool,
}

impl EvidencePool {
    /// Pool with nothing in it. A valid, scoreable state, not an error.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            aggregate_quality: 0.0,
            methodology_diversity: 0.0,
            ifcn_compliant: true,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
