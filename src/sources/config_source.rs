//! Configuration source trait.

use crate::core::RawEntry;
use crate::error::Result;

/// Trait for configuration sources.
///
/// Implement this trait to feed property entries from somewhere other than
/// the built-in sources (a secrets store, a command line, a test fixture).
pub trait ConfigSource: Send + Sync {
    /// Load the source as an ordered list of entries.
    ///
    /// Order matters: when a key occurs more than once, the last occurrence
    /// wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read.
    fn load(&self) -> Result<Vec<RawEntry>>;

    /// Get a human-readable name for this source (for logging/debugging).
    fn name(&self) -> String;

    /// Get the priority of this source (higher = takes precedence).
    ///
    /// Default priorities:
    /// - Environment variables: 300
    /// - Property files: 100, 110, 120, ... in the order they were added
    /// - In-memory text: 100
    fn priority(&self) -> i32 {
        100
    }
}
