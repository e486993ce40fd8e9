pub mod consensus;
pub mod gatherer;
pub mod interpreter;
pub mod pipeline;
pub mod strategist;
pub mod trust;
pub mod validator;

pub use consensus::ConsensusEngine;
pub use gatherer::EvidenceGatherer;
pub use interpreter::ClaimInterpreter;
pub use pipeline::PipelineOrchestrator;
pub use strategist::MethodologySearchStrategist;
pub use trust::TrustScoringEngine;
pub use validator::EvidenceValidator;
