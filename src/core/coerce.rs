//! Conversion of raw property text into typed field values.
//!
//! Every function here reports failure as `None`. Callers treat that as
//! "leave the field alone", so a typo in a value never aborts a bind.

use super::settings::SymbolicEnum;
use std::collections::BTreeSet;
use std::fmt;

/// The declared type of a bindable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Used verbatim
    String,
    /// Base-10 signed integer
    Int,
    /// `true` or `false`, any case
    Boolean,
    /// One of an enum's declared symbols, any case
    Enum,
    /// Comma-separated list unioned with a fixed base set
    StringSet,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Int => "integer",
            Self::Boolean => "boolean",
            Self::Enum => "enum symbol",
            Self::StringSet => "string set",
        };
        f.write_str(name)
    }
}

/// Parse a base-10 integer. Negative values are accepted as-is; text outside
/// the `i64` range is rejected.
pub fn coerce_int(text: &str) -> Option<i64> {
    text.parse::<i64>().ok()
}

/// Parse `true` or `false`, ignoring ASCII case. Anything else is rejected.
pub fn coerce_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Match an enum symbol, ignoring ASCII case.
pub fn coerce_enum<E: SymbolicEnum>(text: &str) -> Option<E> {
    E::from_symbol(text)
}

/// Split a comma-separated list and union it with `base`.
///
/// Pieces are trimmed and empty pieces dropped. This never fails.
pub fn coerce_string_set(text: &str, base: &[&str]) -> BTreeSet<String> {
    let mut set: BTreeSet<String> = base.iter().map(|d| d.to_string()).collect();
    set.extend(
        text.split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(str::to_string),
    );
    set
}

/// Split a comma-separated candidate list, keeping order and duplicates.
pub fn split_list(text: &str) -> Vec<&str> {
    text.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}
