//! Line-oriented `key = value` property parser.

use std::io::BufRead;

/// One `key = value` pair taken from a non-blank input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Trimmed key, exactly as written (case is preserved)
    pub key: String,
    /// Trimmed value, exactly as written
    pub value: String,
}

impl RawEntry {
    /// Create a new entry. Both parts are trimmed.
    pub fn new(key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        Self {
            key: key.as_ref().trim().to_string(),
            value: value.as_ref().trim().to_string(),
        }
    }
}

/// Parse a single line.
///
/// Returns `None` for blank lines, lines without `=`, and lines whose key is
/// empty after trimming. The line is split on the first `=` only, so values
/// may themselves contain `=`.
pub fn parse_line(line: &str) -> Option<RawEntry> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some(RawEntry::new(key, value))
}

/// Parse a whole document into entries, preserving input order.
///
/// Malformed lines are skipped; parsing never fails.
///
/// # Examples
///
/// ```rust
/// use kcl_configurator::core::parse_properties;
///
/// let entries = parse_properties("streamName = a\n\nnot a setting\napplicationName=b");
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[0].key, "streamName");
/// assert_eq!(entries[1].value, "b");
/// ```
pub fn parse_properties(text: &str) -> Vec<RawEntry> {
    text.lines().filter_map(parse_line).collect()
}

/// Parse entries from a buffered reader.
///
/// # Errors
///
/// Returns an IO error if the reader fails or yields invalid UTF-8.
pub fn parse_reader<R: BufRead>(reader: R) -> std::io::Result<Vec<RawEntry>> {
    let mut entries = Vec::new();
    for line in reader.lines() {
        if let Some(entry) = parse_line(&line?) {
            entries.push(entry);
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_trims_key_and_value() {
        let entry = parse_line("  streamName   =   my-stream  ").unwrap();
        assert_eq!(entry, RawEntry::new("streamName", "my-stream"));
    }

    #[test]
    fn test_splits_on_first_equals() {
        let entry = parse_line("kinesisEndpoint = https://host/?a=b").unwrap();
        assert_eq!(entry.key, "kinesisEndpoint");
        assert_eq!(entry.value, "https://host/?a=b");
    }

    #[test]
    fn test_skips_blank_and_malformed_lines() {
        let entries = parse_properties("\n   \nno separator here\n= orphan value\na = 1\n");
        assert_eq!(entries, vec![RawEntry::new("a", "1")]);
    }

    #[test]
    fn test_empty_value_is_kept() {
        let entry = parse_line("workerId =").unwrap();
        assert_eq!(entry.value, "");
    }

    #[test]
    fn test_preserves_order_and_duplicates() {
        let entries = parse_properties("a = 1\r\nb = 2\r\na = 3");
        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "a"]);
        assert_eq!(entries[2].value, "3");
    }

    #[test]
    fn test_no_comment_syntax() {
        let entry = parse_line("# streamName = commented").unwrap();
        assert_eq!(entry.key, "# streamName");
    }

    #[test]
    fn test_parse_reader() {
        let input = "streamName = a\napplicationName = b\n";
        let entries = parse_reader(input.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_parse_reader_invalid_utf8() {
        let input: &[u8] = &[b'a', b'=', 0xff, 0xfe, b'\n'];
        assert!(parse_reader(input).is_err());
    }

    proptest! {
        #[test]
        fn prop_entries_are_trimmed(text in "[ a-zA-Z0-9=\\n\\t]{0,200}") {
            for entry in parse_properties(&text) {
                prop_assert!(!entry.key.is_empty());
                prop_assert_eq!(entry.key.trim(), entry.key.as_str());
                prop_assert_eq!(entry.value.trim(), entry.value.as_str());
            }
        }

        #[test]
        fn prop_one_entry_per_line_with_key(
            lines in proptest::collection::vec(("[a-zA-Z]{1,12}", "[a-zA-Z0-9 ]{0,12}"), 0..20)
        ) {
            let text: Vec<String> = lines.iter().map(|(k, v)| format!("{k} = {v}")).collect();
            let entries = parse_properties(&text.join("\n"));
            prop_assert_eq!(entries.len(), lines.len());
            for (entry, (key, value)) in entries.iter().zip(lines.iter()) {
                prop_assert_eq!(&entry.key, key);
                prop_assert_eq!(entry.value.as_str(), value.trim());
            }
        }
    }
}
