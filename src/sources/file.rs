//! File-based configuration source.

use super::ConfigSource;
use crate::core::{RawEntry, parse_reader};
use crate::error::{ConfigError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// A `key = value` property file on disk.
///
/// The file is read when the source is loaded, not when it is created.
///
/// # Examples
///
/// ```rust,no_run
/// use kcl_configurator::sources::FileSource;
///
/// let source = FileSource::new("conf/worker.properties");
/// ```
pub struct FileSource {
    path: PathBuf,
    priority: i32,
}

impl FileSource {
    /// Create a new file source with the default priority (100).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            priority: 100,
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

impl ConfigSource for FileSource {
    fn load(&self) -> Result<Vec<RawEntry>> {
        if !self.path.exists() {
            return Err(ConfigError::LoadError(format!(
                "Configuration file not found: {}",
                self.path.display()
            )));
        }

        let file = File::open(&self.path)?;
        Ok(parse_reader(BufReader::new(file))?)
    }

    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
