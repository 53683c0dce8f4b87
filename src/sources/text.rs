//! In-memory configuration source.

use super::ConfigSource;
use crate::core::{RawEntry, parse_properties};
use crate::error::Result;
use std::io::Read;

/// A property document held in memory.
///
/// # Examples
///
/// ```rust
/// use kcl_configurator::sources::{ConfigSource, TextSource};
///
/// let source = TextSource::new("streamName = orders\napplicationName = billing");
/// assert_eq!(source.load().unwrap().len(), 2);
/// ```
pub struct TextSource {
    text: String,
    name: String,
    priority: i32,
}

impl TextSource {
    /// Create a source from a document.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            name: "inline".to_string(),
            priority: 100,
        }
    }

    /// Read a whole document from `reader`.
    ///
    /// # Errors
    ///
    /// Returns an IO error if reading fails or the input is not UTF-8.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::new(text))
    }

    /// Name the source for logs and error messages.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the priority for this source.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl ConfigSource for TextSource {
    fn load(&self) -> Result<Vec<RawEntry>> {
        Ok(parse_properties(&self.text))
    }

    fn name(&self) -> String {
        format!("text:{}", self.name)
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reader() {
        let source = TextSource::from_reader("a = 1\nb = 2".as_bytes()).unwrap();
        assert_eq!(source.load().unwrap().len(), 2);
    }

    #[test]
    fn test_from_reader_rejects_invalid_utf8() {
        let bytes: &[u8] = &[0xff, 0xfe];
        assert!(TextSource::from_reader(bytes).is_err());
    }

    #[test]
    fn test_name_and_priority() {
        let source = TextSource::new("").with_name("stdin").with_priority(150);
        assert_eq!(source.name(), "text:stdin");
        assert_eq!(source.priority(), 150);
    }
}
