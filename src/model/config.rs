use crate::model::claim::ClaimDomain;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

const ENV_CONFIG_PATH: &str = "CLAIMLENS_CONFIG_PATH";
const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
const ENV_SEARCH_ENDPOINT: &str = "CLAIMLENS_SEARCH_URL";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Query planning limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Hard budget for one strategy. Never exceeded, binding at 12.
    pub max_total_queries: usize,
    /// Cap applied to each query group before the global trim.
    pub max_group_queries: usize,
    /// Per-query search timeout carried on each SearchQuery.
    pub query_timeout_secs: u64,
    /// Domains where counter-evidence framing is skipped entirely.
    pub rebuttal_exempt_domains: Vec<ClaimDomain>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            max_total_queries: 12,
            max_group_queries: 4,
            query_timeout_secs: 5,
            rebuttal_exempt_domains: Vec::new(),
        }
    }
}

impl StrategyConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

/// Evidence gathering limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatherConfig {
    /// Worker pool ceiling. The pool never grows past this, binding at 6.
    pub max_workers: usize,
    /// Wall-clock budget for the whole gather stage.
    pub stage_timeout_secs: u64,
    /// Results requested from the search provider per query.
    pub results_per_query: usize,
    /// Per-page content extraction timeout.
    pub extraction_timeout_secs: u64,
    /// Token bucket refill rate for each worker's private limiter.
    pub requests_per_minute: u32,
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            max_workers: 6,
            stage_timeout_secs: 12,
            results_per_query: 8,
            extraction_timeout_secs: 4,
            requests_per_minute: 30,
        }
    }
}

impl GatherConfig {
    pub fn stage_timeout(&self) -> Duration {
        Duration::from_secs(self.stage_timeout_secs)
    }

    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }
}

/// Evidence validation thresholds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Minimum composite relevance for pool admission.
    pub relevance_floor: f64,
    /// Pool cap after sorting and dedup.
    pub max_pool_size: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            relevance_floor: 50.0,
            max_pool_size: 10,
        }
    }
}

/// Consensus stage thresholds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsensusConfig {
    /// Per-assessor call timeout.
    pub assessor_timeout_secs: u64,
    /// Disagreement above this raises an uncertainty indicator.
    pub disagreement_threshold: f64,
    /// Pools smaller than this raise an uncertainty indicator.
    pub min_pool_size: usize,
    /// Methodology diversity below this raises an uncertainty indicator.
    pub min_diversity: f64,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            assessor_timeout_secs: 8,
            disagreement_threshold: 25.0,
            min_pool_size: 3,
            min_diversity: 0.4,
        }
    }
}

impl ConsensusConfig {
    pub fn assessor_timeout(&self) -> Duration {
        Duration::from_secs(self.assessor_timeout_secs)
    }
}

/// Search backend endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// SearxNG-compatible JSON search endpoint.
    pub endpoint: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8888/search".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessorKind {
    OpenAi,
}

/// One assessor slot in the consensus panel. The panel is resolved to
/// concrete clients once, at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct AssessorConfig {
    pub kind: AssessorKind,
    pub model: String,
}

fn default_assessors() -> Vec<AssessorConfig> {
    vec![
        AssessorConfig {
            kind: AssessorKind::OpenAi,
            model: "gpt-4o".to_string(),
        },
        AssessorConfig {
            kind: AssessorKind::OpenAi,
            model: "gpt-4o-mini".to_string(),
        },
    ]
}

/// YAML configuration file structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub claim_deadline_secs: u64,
    pub batch_concurrency: usize,
    pub strategy: StrategyConfig,
    pub gather: GatherConfig,
    pub validator: ValidatorConfig,
    pub consensus: ConsensusConfig,
    pub search: SearchConfig,
    pub assessors: Vec<AssessorConfig>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            claim_deadline_secs: 15,
            batch_concurrency: 4,
            strategy: StrategyConfig::default(),
            gather: GatherConfig::default(),
            validator: ValidatorConfig::default(),
            consensus: ConsensusConfig::default(),
            search: SearchConfig::default(),
            assessors: default_assessors(),
        }
    }
}

/// Pipeline configuration. Built once at startup and passed through the
/// orchestrator's constructor; no component reads the environment.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub claim_deadline_secs: u64,
    pub batch_concurrency: usize,
    pub strategy: StrategyConfig,
    pub gather: GatherConfig,
    pub validator: ValidatorConfig,
    pub consensus: ConsensusConfig,
    pub search: SearchConfig,
    pub assessors: Vec<AssessorConfig>,
    pub openai_api_key: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_file_contents(ConfigFile::default(), None)
    }
}

impl PipelineConfig {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();
        let api_key = std::env::var(ENV_OPENAI_API_KEY).ok();

        let mut config = Self::from_file_contents(file, api_key);
        if let Ok(endpoint) = std::env::var(ENV_SEARCH_ENDPOINT) {
            config.search.endpoint = endpoint;
        }
        config
    }

    fn from_file_contents(file: ConfigFile, openai_api_key: Option<String>) -> Self {
        Self {
            claim_deadline_secs: file.claim_deadline_secs,
            batch_concurrency: file.batch_concurrency,
            strategy: file.strategy,
            gather: file.gather,
            validator: file.validator,
            consensus: file.consensus,
            search: file.search,
            assessors: file.assessors,
            openai_api_key,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                // Handle empty file
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn claim_deadline(&self) -> Duration {
        Duration::from_secs(self.claim_deadline_secs)
    }
}
