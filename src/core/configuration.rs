//! The bound worker configuration.

use super::settings::WorkerSettings;
use crate::credentials::CredentialsProvider;
use std::fmt;
use std::sync::Arc;

/// A fully bound worker configuration.
///
/// Holds the passive [`WorkerSettings`] plus the credentials providers chosen
/// for the stream, lease table and metrics clients. Unless overridden, all
/// three are the same provider.
#[derive(Clone)]
pub struct WorkerConfiguration {
    settings: WorkerSettings,
    kinesis_credentials: Arc<dyn CredentialsProvider>,
    dynamodb_credentials: Arc<dyn CredentialsProvider>,
    cloudwatch_credentials: Arc<dyn CredentialsProvider>,
}

impl WorkerConfiguration {
    pub(crate) fn new(
        settings: WorkerSettings,
        kinesis_credentials: Arc<dyn CredentialsProvider>,
        dynamodb_credentials: Option<Arc<dyn CredentialsProvider>>,
        cloudwatch_credentials: Option<Arc<dyn CredentialsProvider>>,
    ) -> Self {
        let dynamodb_credentials =
            dynamodb_credentials.unwrap_or_else(|| Arc::clone(&kinesis_credentials));
        let cloudwatch_credentials =
            cloudwatch_credentials.unwrap_or_else(|| Arc::clone(&kinesis_credentials));
        Self {
            settings,
            kinesis_credentials,
            dynamodb_credentials,
            cloudwatch_credentials,
        }
    }

    /// The bound settings.
    pub fn settings(&self) -> &WorkerSettings {
        &self.settings
    }

    /// Credentials for the stream client.
    pub fn kinesis_credentials_provider(&self) -> &Arc<dyn CredentialsProvider> {
        &self.kinesis_credentials
    }

    /// Credentials for the lease table client.
    pub fn dynamodb_credentials_provider(&self) -> &Arc<dyn CredentialsProvider> {
        &self.dynamodb_credentials
    }

    /// Credentials for the metrics client.
    pub fn cloudwatch_credentials_provider(&self) -> &Arc<dyn CredentialsProvider> {
        &self.cloudwatch_credentials
    }

    /// Shorthand for `settings().stream_name`.
    pub fn stream_name(&self) -> &str {
        &self.settings.stream_name
    }

    /// Shorthand for `settings().application_name`.
    pub fn application_name(&self) -> &str {
        &self.settings.application_name
    }

    /// Shorthand for `settings().worker_identifier`.
    pub fn worker_identifier(&self) -> &str {
        &self.settings.worker_identifier
    }

    /// Take the settings, dropping the providers.
    pub fn into_settings(self) -> WorkerSettings {
        self.settings
    }
}

impl fmt::Debug for WorkerConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerConfiguration")
            .field("settings", &self.settings)
            .field("kinesis_credentials", &self.kinesis_credentials.name())
            .field("dynamodb_credentials", &self.dynamodb_credentials.name())
            .field("cloudwatch_credentials", &self.cloudwatch_credentials.name())
            .finish()
    }
}
