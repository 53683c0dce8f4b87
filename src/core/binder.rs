//! Binds parsed property entries onto a [`WorkerConfiguration`].

use super::configuration::WorkerConfiguration;
use super::parser::{RawEntry, parse_properties, parse_reader};
use super::registry::{
    self, CLOUDWATCH_CREDENTIALS_PROVIDER_KEY, CREDENTIALS_PROVIDER_KEY,
    DYNAMODB_CREDENTIALS_PROVIDER_KEY,
};
use super::settings::{SymbolicEnum, WorkerSettings};
use super::validation;
use super::worker_id::WorkerIdGenerator;
use crate::credentials::{CredentialsProvider, CredentialsResolver, ProviderRegistry};
use crate::error::{ConfigError, Result};
use std::collections::HashSet;
use std::io::{BufReader, Read};
use std::sync::Arc;
use tracing::{debug, info, warn};

const CREDENTIALS_KEYS: [&str; 3] = [
    CREDENTIALS_PROVIDER_KEY,
    DYNAMODB_CREDENTIALS_PROVIDER_KEY,
    CLOUDWATCH_CREDENTIALS_PROVIDER_KEY,
];

/// One-shot binder from property entries to a worker configuration.
///
/// Each call to [`bind`](Self::bind) starts from [`WorkerSettings::default`]
/// and shares nothing with other calls except the worker identifier
/// generator.
///
/// # Examples
///
/// ```rust
/// use kcl_configurator::core::{ConfigBinder, default_worker_id_generator};
/// use kcl_configurator::credentials::ProviderRegistry;
///
/// let binder = ConfigBinder::new(
///     ProviderRegistry::with_builtins(),
///     default_worker_id_generator(),
/// );
///
/// let config = binder
///     .bind_str(
///         "streamName = orders\n\
///          applicationName = order-processor\n\
///          AWSCredentialsProvider = EnvironmentVariableCredentialsProvider\n\
///          maxRecords = 500",
///     )
///     .unwrap();
///
/// assert_eq!(config.stream_name(), "orders");
/// assert_eq!(config.settings().max_records, 500);
/// assert!(!config.worker_identifier().is_empty());
/// ```
#[derive(Clone)]
pub struct ConfigBinder {
    providers: ProviderRegistry,
    worker_ids: WorkerIdGenerator,
}

impl ConfigBinder {
    /// Create a binder with an explicit provider registry and worker
    /// identifier generator.
    pub fn new(providers: ProviderRegistry, worker_ids: WorkerIdGenerator) -> Self {
        Self {
            providers,
            worker_ids,
        }
    }

    /// The registry credentials candidates are resolved against.
    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    /// Bind a property document held in memory.
    ///
    /// # Errors
    ///
    /// See [`bind`](Self::bind).
    pub fn bind_str(&self, text: &str) -> Result<WorkerConfiguration> {
        self.bind(&parse_properties(text))
    }

    /// Read a property document and bind it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if reading fails, otherwise see
    /// [`bind`](Self::bind).
    pub fn bind_reader<R: Read>(&self, reader: R) -> Result<WorkerConfiguration> {
        let entries = parse_reader(BufReader::new(reader))?;
        self.bind(&entries)
    }

    /// Bind parsed entries.
    ///
    /// Entries are applied in order, so the last occurrence of a key wins.
    /// Unknown keys and values that do not coerce are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `AWSCredentialsProvider` is absent or empty
    /// - no candidate of a credentials key can be constructed
    /// - `streamName` or `applicationName` is absent or empty
    pub fn bind(&self, entries: &[RawEntry]) -> Result<WorkerConfiguration> {
        let mut settings = WorkerSettings::default();
        let mut bound: HashSet<&'static str> = HashSet::new();
        let mut credentials: [Option<&str>; 3] = [None; 3];

        for entry in entries {
            if let Some(slot) = CREDENTIALS_KEYS
                .iter()
                .position(|key| key.eq_ignore_ascii_case(&entry.key))
            {
                credentials[slot] = Some(entry.value.as_str());
                continue;
            }

            let Some(descriptor) = registry::lookup(&entry.key) else {
                debug!(key = %entry.key, "ignoring unrecognized configuration key");
                continue;
            };

            match descriptor.apply(&mut settings, &entry.value) {
                Ok(()) => {
                    if entry.value.is_empty() {
                        bound.remove(descriptor.name);
                    } else {
                        bound.insert(descriptor.name);
                    }
                    debug!(field = descriptor.name, value = %entry.value, "bound configuration field");
                }
                Err(rejected) => {
                    warn!(
                        field = rejected.field,
                        value = %entry.value,
                        expected = %rejected.expected,
                        "ignoring configuration value of the wrong type"
                    );
                }
            }
        }

        let [kinesis, dynamodb, cloudwatch] = credentials;
        let resolver = CredentialsResolver::new(&self.providers);

        let kinesis = match kinesis {
            Some(value) if !value.trim().is_empty() => {
                resolver.resolve(CREDENTIALS_PROVIDER_KEY, value)?
            }
            _ => return Err(ConfigError::missing(CREDENTIALS_PROVIDER_KEY)),
        };
        let dynamodb = self.resolve_optional(&resolver, DYNAMODB_CREDENTIALS_PROVIDER_KEY, dynamodb)?;
        let cloudwatch =
            self.resolve_optional(&resolver, CLOUDWATCH_CREDENTIALS_PROVIDER_KEY, cloudwatch)?;

        validation::check_required(&bound)?;
        validation::apply_defaults(&mut settings, &bound, &self.worker_ids);

        info!(
            stream = %settings.stream_name,
            application = %settings.application_name,
            worker_id = %settings.worker_identifier,
            initial_position = settings.initial_position_in_stream.symbol(),
            metrics_level = settings.metrics_level.symbol(),
            credentials = kinesis.name(),
            "bound worker configuration"
        );

        Ok(WorkerConfiguration::new(
            settings, kinesis, dynamodb, cloudwatch,
        ))
    }

    fn resolve_optional(
        &self,
        resolver: &CredentialsResolver<'_>,
        key: &'static str,
        value: Option<&str>,
    ) -> Result<Option<Arc<dyn CredentialsProvider>>> {
        match value {
            Some(value) if !value.trim().is_empty() => resolver.resolve(key, value).map(Some),
            _ => Ok(None),
        }
    }
}

impl std::fmt::Debug for ConfigBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigBinder")
            .field("providers", &self.providers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::{InitialPositionInStream, MetricsLevel};
    use crate::credentials::{Credentials, CredentialsError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Static;

    impl CredentialsProvider for Static {
        fn credentials(&self) -> std::result::Result<Credentials, CredentialsError> {
            Ok(Credentials::new("AKID", "secret"))
        }

        fn name(&self) -> &str {
            "Static"
        }
    }

    fn binder() -> ConfigBinder {
        let mut providers = ProviderRegistry::new();
        providers.register("Static", || Ok(Arc::new(Static) as Arc<dyn CredentialsProvider>));
        let counter = Arc::new(AtomicUsize::new(0));
        ConfigBinder::new(
            providers,
            Arc::new(move || format!("worker-{}", counter.fetch_add(1, Ordering::SeqCst))),
        )
    }

    const BASE: &str = "streamName = s\napplicationName = a\nAWSCredentialsProvider = Static\n";

    #[test]
    fn test_last_occurrence_wins() {
        let config = binder()
            .bind_str(&format!("{BASE}streamName = first\nstreamName = second"))
            .unwrap();
        assert_eq!(config.stream_name(), "second");
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let config = binder()
            .bind_str("STREAMNAME = s\napplicationname = a\nawscredentialsprovider = Static\nMaxRecords = 7")
            .unwrap();
        assert_eq!(config.stream_name(), "s");
        assert_eq!(config.settings().max_records, 7);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let config = binder()
            .bind_str(&format!(
                "{BASE}failoverTimeMillis = 100nf\nmetricsLevel = LOUD\ncleanupLeasesUponShardCompletion = maybe"
            ))
            .unwrap();
        let settings = config.settings();
        assert_eq!(settings.failover_time_millis, 10_000);
        assert_eq!(settings.metrics_level, MetricsLevel::Detailed);
        assert!(settings.cleanup_leases_upon_shard_completion);
    }

    #[test]
    fn test_bad_value_does_not_erase_earlier_good_one() {
        let config = binder()
            .bind_str(&format!("{BASE}maxRecords = 5\nmaxRecords = five"))
            .unwrap();
        assert_eq!(config.settings().max_records, 5);
    }

    #[test]
    fn test_enum_binding() {
        let config = binder()
            .bind_str(&format!("{BASE}initialPositionInStream = TriM_Horizon"))
            .unwrap();
        assert_eq!(
            config.settings().initial_position_in_stream,
            InitialPositionInStream::TrimHorizon
        );
    }

    #[test]
    fn test_empty_required_value_is_missing() {
        let err = binder()
            .bind_str(&format!("{BASE}streamName ="))
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::MissingRequiredField { field } if field == "streamName"));
    }

    #[test]
    fn test_empty_credentials_value_is_missing() {
        let err = binder()
            .bind_str("streamName = s\napplicationName = a\nAWSCredentialsProvider =")
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ConfigError::MissingRequiredField { field } if field == CREDENTIALS_PROVIDER_KEY
        ));
    }

    #[test]
    fn test_generated_worker_ids_differ_between_binds() {
        let binder = binder();
        let first = binder.bind_str(BASE).unwrap();
        let second = binder.bind_str(BASE).unwrap();
        assert_eq!(first.worker_identifier(), "worker-0");
        assert_eq!(second.worker_identifier(), "worker-1");
    }

    #[test]
    fn test_service_credentials_default_to_main_provider() {
        let config = binder().bind_str(BASE).unwrap();
        assert!(Arc::ptr_eq(
            config.kinesis_credentials_provider(),
            config.dynamodb_credentials_provider()
        ));
        assert!(Arc::ptr_eq(
            config.kinesis_credentials_provider(),
            config.cloudwatch_credentials_provider()
        ));
    }

    #[test]
    fn test_service_credentials_override_must_resolve() {
        let err = binder()
            .bind_str(&format!("{BASE}AWSCredentialsProviderDynamoDB = Nope"))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ConfigError::CredentialsResolution { key, .. } if key == DYNAMODB_CREDENTIALS_PROVIDER_KEY
        ));
    }

    #[test]
    fn test_bind_reader() {
        let config = binder().bind_reader(BASE.as_bytes()).unwrap();
        assert_eq!(config.application_name(), "a");
    }
}
