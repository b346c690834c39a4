//! Tunables for the bulk byte engines.

use super::{parse_env_bool, parse_env_var, Config};
use crate::error::{BulkError, Result};
use crate::string::SearchAlgorithm;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Element count (in the current word width) above which a bitwise transform fans out
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 2048;

/// Minimum number of words each parallel worker must receive
pub const DEFAULT_MIN_ITEMS_PER_WORKER: usize = 128;

/// Configuration shared by the bulk byte engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkOpsConfig {
    /// Word count above which the bitwise transform splits work across workers
    pub parallel_threshold: usize,
    /// Worker count is `min(max_workers, words / min_items_per_worker)`
    pub min_items_per_worker: usize,
    /// Upper bound on workers; `0` uses the detected parallelism
    pub max_workers: usize,
    /// Allow the data-parallel fast path
    pub enable_parallel: bool,
    /// Process buffers in descending word widths; `false` forces bytewise mode
    pub enable_word_tiering: bool,
    /// Substring search algorithm; `Auto` selects by needle length
    pub search_algorithm: SearchAlgorithm,
}

impl Default for BulkOpsConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            min_items_per_worker: DEFAULT_MIN_ITEMS_PER_WORKER,
            max_workers: 0,
            enable_parallel: true,
            enable_word_tiering: true,
            search_algorithm: SearchAlgorithm::Auto,
        }
    }
}

impl BulkOpsConfig {
    /// Create a new configuration builder.
    pub fn builder() -> BulkOpsConfigBuilder {
        BulkOpsConfigBuilder::new()
    }

    /// Sequential configuration: tiered word mode without worker fan-out.
    pub fn sequential() -> Self {
        Self {
            enable_parallel: false,
            ..Self::default()
        }
    }
}

impl Config for BulkOpsConfig {
    fn validate(&self) -> Result<()> {
        if self.parallel_threshold == 0 {
            return Err(BulkError::configuration("parallel_threshold must be at least 1"));
        }
        if self.min_items_per_worker == 0 {
            return Err(BulkError::configuration("min_items_per_worker must be at least 1"));
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.parallel_threshold =
            parse_env_var(&format!("{}PARALLEL_THRESHOLD", prefix), config.parallel_threshold);
        config.min_items_per_worker =
            parse_env_var(&format!("{}MIN_ITEMS_PER_WORKER", prefix), config.min_items_per_worker);
        config.max_workers = parse_env_var(&format!("{}MAX_WORKERS", prefix), config.max_workers);
        config.enable_parallel =
            parse_env_bool(&format!("{}ENABLE_PARALLEL", prefix), config.enable_parallel);
        config.enable_word_tiering =
            parse_env_bool(&format!("{}ENABLE_WORD_TIERING", prefix), config.enable_word_tiering);
        config.search_algorithm =
            parse_env_var(&format!("{}SEARCH_ALGORITHM", prefix), config.search_algorithm);
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        // Fan out earlier and across every detected worker
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD / 4,
            min_items_per_worker: DEFAULT_MIN_ITEMS_PER_WORKER / 2,
            max_workers: 0,
            ..Self::default()
        }
    }

    fn memory_preset() -> Self {
        Self::sequential()
    }

    fn realtime_preset() -> Self {
        // Fan out only for buffers big enough to amortize the join
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD * 16,
            min_items_per_worker: DEFAULT_MIN_ITEMS_PER_WORKER * 16,
            ..Self::default()
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)
            .map_err(|e| BulkError::configuration(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| BulkError::configuration(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

/// Builder for [`BulkOpsConfig`].
#[derive(Debug, Clone)]
pub struct BulkOpsConfigBuilder {
    config: BulkOpsConfig,
}

impl BulkOpsConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            config: BulkOpsConfig::default(),
        }
    }

    /// Set the word count above which work is split across workers.
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.config.parallel_threshold = threshold;
        self
    }

    /// Set the minimum number of words per worker.
    pub fn min_items_per_worker(mut self, items: usize) -> Self {
        self.config.min_items_per_worker = items;
        self
    }

    /// Cap the number of workers (`0` = detected parallelism).
    pub fn max_workers(mut self, workers: usize) -> Self {
        self.config.max_workers = workers;
        self
    }

    /// Enable or disable the data-parallel fast path.
    pub fn enable_parallel(mut self, enable: bool) -> Self {
        self.config.enable_parallel = enable;
        self
    }

    /// Enable or disable tiered word mode.
    pub fn enable_word_tiering(mut self, enable: bool) -> Self {
        self.config.enable_word_tiering = enable;
        self
    }

    /// Select the substring search algorithm.
    pub fn search_algorithm(mut self, algorithm: SearchAlgorithm) -> Self {
        self.config.search_algorithm = algorithm;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<BulkOpsConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for BulkOpsConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
