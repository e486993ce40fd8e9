pub mod claim;
pub mod config;
pub mod consensus;
pub mod evidence;
pub mod strategy;
pub mod trust;

pub use claim::*;
pub use config::{
    AssessorConfig, AssessorKind, ConsensusConfig, GatherConfig, PipelineConfig, SearchConfig,
    StrategyConfig, ValidatorConfig,
};
pub use consensus::*;
pub use evidence::*;
pub use strategy::*;
pub use trust::*;
