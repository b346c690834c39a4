//! Configuration APIs for bulkbytes
//!
//! The engines are stateless between calls; the only tunables are the
//! thresholds that decide between sequential and parallel execution and the
//! search algorithm preference. They live in [`BulkOpsConfig`], a plain value
//! handed to an engine at construction time. There is no global mutable
//! configuration: the free functions in [`crate::memory`] and [`crate::string`]
//! always use [`BulkOpsConfig::default`].
//!
//! ```rust
//! use bulkbytes::config::{BulkOpsConfig, Config};
//! use bulkbytes::memory::BitwiseTransformEngine;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BulkOpsConfig::builder()
//!     .parallel_threshold(4096)
//!     .max_workers(4)
//!     .build()?;
//! let engine = BitwiseTransformEngine::with_config(config)?;
//! let mut data = vec![0xFFu8; 16];
//! engine.xor(&mut data, &[0x0F; 16])?;
//! assert!(data.iter().all(|&b| b == 0xF0));
//! # Ok(())
//! # }
//! ```
//!
//! Configurations can also be initialized from environment variables
//! (`BULKBYTES_` prefix by default) or loaded from JSON files.

use crate::error::Result;
use std::env;
use std::fmt;
use std::path::Path;

pub mod bulk_ops;

pub use bulk_ops::{BulkOpsConfig, BulkOpsConfigBuilder};

/// Default prefix for configuration environment variables
pub const ENV_PREFIX: &str = "BULKBYTES_";

/// Common configuration trait providing validation, environment initialization,
/// and preset management functionality.
pub trait Config: Clone + fmt::Debug {
    /// Validate the configuration for correctness and consistency.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables using [`ENV_PREFIX`].
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    /// Initialize configuration from environment variables with a custom prefix.
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Configuration tuned for maximum throughput on large buffers.
    fn performance_preset() -> Self;

    /// Configuration that avoids spawning workers.
    fn memory_preset() -> Self;

    /// Configuration with predictable per-call latency.
    fn realtime_preset() -> Self;

    /// Balanced configuration, identical to the default.
    fn balanced_preset() -> Self
    where
        Self: Default,
    {
        Self::default()
    }

    /// Save configuration to a JSON file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Load and validate configuration from a JSON file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

/// Parse an environment variable, falling back to `default` when it is unset
/// or cannot be parsed.
pub fn parse_env_var<T>(var_name: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    match env::var(var_name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("Ignoring unparsable value {:?} for {}", raw, var_name);
                default
            }
        },
        Err(_) => default,
    }
}

/// Parse a boolean environment variable.
///
/// Accepts "true", "1", "yes", "on" (case-insensitive) as true,
/// everything else as false.
pub fn parse_env_bool(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .map(|s| {
            let s = s.to_lowercase();
            matches!(s.trim(), "true" | "1" | "yes" | "on")
        })
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_var_fallback() {
        let value: usize = parse_env_var("BULKBYTES_TEST_UNSET_VARIABLE", 17);
        assert_eq!(value, 17);
    }

    #[test]
    fn test_parse_env_var_set() {
        env::set_var("BULKBYTES_TEST_PARSE_NUMBER", " 4096 ");
        let value: usize = parse_env_var("BULKBYTES_TEST_PARSE_NUMBER", 1);
        assert_eq!(value, 4096);

        env::set_var("BULKBYTES_TEST_PARSE_NUMBER_BAD", "lots");
        let value: usize = parse_env_var("BULKBYTES_TEST_PARSE_NUMBER_BAD", 1);
        assert_eq!(value, 1);
    }

    #[test]
    fn test_parse_env_bool() {
        env::set_var("BULKBYTES_TEST_BOOL_ON", "On");
        env::set_var("BULKBYTES_TEST_BOOL_OFF", "nope");
        assert!(parse_env_bool("BULKBYTES_TEST_BOOL_ON", false));
        assert!(!parse_env_bool("BULKBYTES_TEST_BOOL_OFF", true));
        assert!(parse_env_bool("BULKBYTES_TEST_BOOL_UNSET", true));
    }
}
