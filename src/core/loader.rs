//! Collects property entries from multiple sources.

use super::parser::RawEntry;
use crate::error::{ConfigError, Result};
use crate::sources::ConfigSource;
use tracing::debug;

/// Loads and concatenates entries from multiple sources.
///
/// Sources are read in ascending priority order and their entries appended
/// one after another. Because the binder lets the last occurrence of a key
/// win, a higher priority source overrides a lower one key by key.
pub struct ConfigLoader {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a configuration source.
    pub fn add_source(&mut self, source: Box<dyn ConfigSource>) {
        self.sources.push(source);
    }

    /// Load every source and return the combined entries.
    ///
    /// Sources with equal priority keep the order they were added in.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No sources were added
    /// - Any source fails to load
    pub fn load(&self) -> Result<Vec<RawEntry>> {
        if self.sources.is_empty() {
            return Err(ConfigError::LoadError(
                "No configuration sources specified".to_string(),
            ));
        }

        let mut entries = Vec::new();
        for source in self.sorted_sources() {
            let loaded = source.load().map_err(|e| {
                ConfigError::LoadError(format!("Failed to load source '{}': {}", source.name(), e))
            })?;
            debug!(source = %source.name(), entries = loaded.len(), "loaded configuration source");
            entries.extend(loaded);
        }

        Ok(entries)
    }

    /// Get the list of source names in the order they are applied.
    pub fn source_names(&self) -> Vec<String> {
        self.sorted_sources().iter().map(|s| s.name()).collect()
    }

    fn sorted_sources(&self) -> Vec<&dyn ConfigSource> {
        let mut sorted: Vec<&dyn ConfigSource> = self.sources.iter().map(|s| s.as_ref()).collect();
        sorted.sort_by_key(|s| s.priority());
        sorted
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
