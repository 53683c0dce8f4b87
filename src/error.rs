//! Error types for kcl-configurator.

/// Result type alias for kcl-configurator operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can abort a configuration bind.
///
/// Only structural problems end up here. A value that fails to coerce into its
/// field's type is logged and skipped, never reported as an error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required field was absent (or empty) after binding.
    #[error("Missing required configuration field: {field}")]
    MissingRequiredField {
        /// Canonical name of the missing field
        field: &'static str,
    },

    /// None of the listed credentials provider candidates could be constructed.
    #[error("Unable to construct any credentials provider from [{candidates}] (key '{key}')")]
    CredentialsResolution {
        /// The property key whose value was being resolved
        key: &'static str,
        /// The raw candidate list as written in the input
        candidates: String,
    },

    /// Failed to load configuration from a source.
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    /// A user-supplied validation hook rejected the bound configuration.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Create a missing-field error for the given canonical field name.
    pub fn missing(field: &'static str) -> Self {
        Self::MissingRequiredField { field }
    }
}

/// Rejection returned by a validation hook.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Free-form rejection.
    #[error("{0}")]
    Custom(String),

    /// One field holds a value the hook does not accept.
    #[error("field '{field}' is invalid: {reason}")]
    InvalidField {
        /// The canonical field name
        field: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl ValidationError {
    /// Create a free-form rejection.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Reject the value of `field`.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        ConfigError::ValidationError(err.to_string())
    }
}
