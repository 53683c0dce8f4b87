//! Environment variable configuration source.

use super::ConfigSource;
use crate::core::RawEntry;
use crate::error::{ConfigError, Result};
use config::Environment;
use std::collections::BTreeMap;

/// Environment variable configuration source.
///
/// Every variable starting with `<prefix>_` becomes an entry whose key is
/// the rest of the variable name. The binder matches keys ignoring case, so
/// `KCL_MAXRECORDS=500` overrides `maxRecords`.
///
/// # Examples
///
/// ```rust
/// use kcl_configurator::sources::EnvSource;
///
/// // KCL_STREAMNAME=orders -> streamName = orders
/// let source = EnvSource::new("KCL");
/// ```
pub struct EnvSource {
    prefix: String,
    priority: i32,
}

impl EnvSource {
    /// Create a new environment variable source.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Prefix for environment variables (e.g., "KCL")
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            priority: 300, // Env vars have highest priority by default
        }
    }

    /// Set the priority for this source.
    ///
    /// Higher priority sources override lower priority ones.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl ConfigSource for EnvSource {
    fn load(&self) -> Result<Vec<RawEntry>> {
        // Values stay as text; coercion is the binder's job.
        let env_source = Environment::with_prefix(&self.prefix).try_parsing(false);

        let config = config::Config::builder()
            .add_source(env_source)
            .build()
            .map_err(|e| {
                ConfigError::LoadError(format!("Failed to load environment variables: {}", e))
            })?;

        let map = config
            .try_deserialize::<BTreeMap<String, String>>()
            .map_err(|e| {
                ConfigError::LoadError(format!("Failed to read environment variables: {}", e))
            })?;

        Ok(map
            .into_iter()
            .map(|(key, value)| RawEntry::new(key, value))
            .collect())
    }

    fn name(&self) -> String {
        format!("env:{}_*", self.prefix)
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
