//! Methodology-first claim verification.
//!
//! A claim moves through a fixed pipeline: interpretation (pure text
//! heuristics), search strategy planning, bounded parallel evidence
//! gathering, relevance validation and pool assembly, multi-assessor
//! consensus, and trust scoring. The output is always a `TrustResult`
//! with a 0-100 score, a letter grade and a confidence label; failed
//! stages degrade to a terminal zero-score result instead of erroring.
//!
//! Wire it up with a `PipelineConfig` (see `PipelineConfig::from_env`),
//! an `EvidenceSources` factory such as `WebEvidenceSources`, and an
//! assessor panel from `build_panel`, then hand claims to
//! `PipelineOrchestrator::process`.

pub mod assessor;
pub mod model;
pub mod search;
pub mod service;

pub use assessor::build_panel;
pub use model::{PipelineConfig, TrustResult};
pub use search::WebEvidenceSources;
pub use service::PipelineOrchestrator;
