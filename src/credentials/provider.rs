//! The credentials provider contract.

use std::fmt;

/// Access credentials handed to the stream, lease and metrics clients.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Access key identifier
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
    /// Session token for temporary credentials
    pub session_token: Option<String>,
}

impl Credentials {
    /// Create long-term credentials without a session token.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    /// Attach a session token.
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Errors raised while building or using a credentials provider.
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    /// No factory is registered under the identifier.
    #[error("unknown credentials provider: {0}")]
    UnknownProvider(String),

    /// The factory ran but could not produce a provider.
    #[error("failed to construct credentials provider '{provider}': {reason}")]
    Construction {
        /// Identifier of the provider
        provider: String,
        /// Why construction failed
        reason: String,
    },

    /// The provider exists but could not produce credentials.
    #[error("failed to retrieve credentials from '{provider}': {reason}")]
    Retrieval {
        /// Name of the provider
        provider: String,
        /// Why retrieval failed
        reason: String,
    },

    /// IO error while reading a credentials source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CredentialsError {
    /// Create a construction error.
    pub fn construction(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Construction {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Create a retrieval error.
    pub fn retrieval(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Retrieval {
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}

/// Something that can supply credentials on demand.
///
/// Retrieval may touch the network or disk, so it is only ever called by
/// the consumer of a bound configuration, never while binding.
pub trait CredentialsProvider: Send + Sync {
    /// Produce the current credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if no credentials are available from this source.
    fn credentials(&self) -> Result<Credentials, CredentialsError>;

    /// Drop any cached state so the next call re-reads the source.
    fn refresh(&self) {}

    /// A human-readable name for logging.
    fn name(&self) -> &str;
}
