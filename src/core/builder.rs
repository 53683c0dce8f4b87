//! Builder for constructing WorkerConfiguration instances.

use crate::core::validation::Validator;
use crate::core::{
    ConfigBinder, ConfigLoader, WorkerConfiguration, WorkerIdGenerator,
    default_worker_id_generator,
};
use crate::credentials::{CredentialsError, CredentialsProvider, ProviderRegistry};
use crate::error::{ConfigError, Result, ValidationError};
use crate::sources::{ConfigSource, EnvSource, FileSource, TextSource};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

/// Builder for binding a `WorkerConfiguration` from one or more sources.
///
/// This is the composition point of the crate: it owns the provider
/// registry and supplies the process default worker identifier generator
/// unless another one is given.
///
/// # Examples
///
/// ```rust,no_run
/// use kcl_configurator::prelude::*;
///
/// # fn example() -> Result<()> {
/// let config = WorkerConfiguration::builder()
///     .with_file("conf/worker.properties")
///     .with_env_overrides("KCL")
///     .build()?;
///
/// println!("consuming {}", config.stream_name());
/// # Ok(())
/// # }
/// ```
pub struct WorkerConfigBuilder {
    file_paths: Vec<PathBuf>,
    env_prefix: Option<String>,
    custom_sources: Vec<Box<dyn ConfigSource>>,
    providers: ProviderRegistry,
    worker_ids: Option<WorkerIdGenerator>,
    validator: Option<Validator<WorkerConfiguration>>,
    read_error: Option<ConfigError>,
}

impl WorkerConfigBuilder {
    /// Create a new builder with the built-in credentials providers.
    pub fn new() -> Self {
        Self {
            file_paths: Vec::new(),
            env_prefix: None,
            custom_sources: Vec::new(),
            providers: ProviderRegistry::with_builtins(),
            worker_ids: None,
            validator: None,
            read_error: None,
        }
    }

    /// Add a property file.
    ///
    /// Files are added in the order they are specified. Later files have higher
    /// priority and will override earlier files.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_paths.push(path.into());
        self
    }

    /// Add an in-memory property document.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_source(TextSource::new(text))
    }

    /// Add a property document read from `reader`.
    ///
    /// The reader is drained immediately. A read failure is reported by
    /// [`build`](Self::build).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kcl_configurator::prelude::*;
    ///
    /// let input: &[u8] = b"streamName = s\napplicationName = a\n\
    ///     AWSCredentialsProvider = EnvironmentVariableCredentialsProvider";
    /// let config = WorkerConfiguration::builder().with_reader(input).build().unwrap();
    /// assert_eq!(config.stream_name(), "s");
    /// ```
    pub fn with_reader<R: Read>(mut self, reader: R) -> Self {
        match TextSource::from_reader(reader) {
            Ok(source) => self.with_source(source.with_name("reader")),
            Err(err) => {
                self.read_error.get_or_insert(err);
                self
            }
        }
    }

    /// Add environment variable overrides with the given prefix.
    ///
    /// Environment variables have the highest priority by default (300).
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use kcl_configurator::prelude::*;
    ///
    /// // KCL_FAILOVERTIMEMILLIS=20000 -> failoverTimeMillis = 20000
    /// let builder = WorkerConfiguration::builder()
    ///     .with_file("worker.properties")
    ///     .with_env_overrides("KCL");
    /// ```
    pub fn with_env_overrides(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Add a custom configuration source.
    pub fn with_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
        self.custom_sources.push(Box::new(source));
        self
    }

    /// Register a credentials provider factory under `id`.
    ///
    /// Registered identifiers can then be listed in `AWSCredentialsProvider`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kcl_configurator::prelude::*;
    /// use std::sync::Arc;
    ///
    /// struct Vault;
    ///
    /// impl CredentialsProvider for Vault {
    ///     fn credentials(&self) -> std::result::Result<Credentials, CredentialsError> {
    ///         Ok(Credentials::new("AKID", "from-vault"))
    ///     }
    ///
    ///     fn name(&self) -> &str {
    ///         "Vault"
    ///     }
    /// }
    ///
    /// let config = WorkerConfiguration::builder()
    ///     .with_credentials_provider("Vault", || Ok(Arc::new(Vault) as Arc<dyn CredentialsProvider>))
    ///     .with_text("streamName = s\napplicationName = a\nAWSCredentialsProvider = Vault")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.kinesis_credentials_provider().name(), "Vault");
    /// ```
    pub fn with_credentials_provider<F>(mut self, id: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> std::result::Result<Arc<dyn CredentialsProvider>, CredentialsError>
            + Send
            + Sync
            + 'static,
    {
        self.providers.register(id, factory);
        self
    }

    /// Replace the provider registry entirely.
    pub fn with_provider_registry(mut self, providers: ProviderRegistry) -> Self {
        self.providers = providers;
        self
    }

    /// Use `generator` instead of the process default for missing worker ids.
    pub fn with_worker_id_generator<F>(mut self, generator: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.worker_ids = Some(Arc::new(generator));
        self
    }

    /// Add a validation function run on the bound configuration.
    ///
    /// It runs after the required-field checks, so it can rely on them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kcl_configurator::prelude::*;
    ///
    /// let result = WorkerConfiguration::builder()
    ///     .with_text(
    ///         "streamName = s\napplicationName = a\n\
    ///          AWSCredentialsProvider = EnvironmentVariableCredentialsProvider\n\
    ///          maxRecords = 0",
    ///     )
    ///     .with_validation(|config: &WorkerConfiguration| {
    ///         if config.settings().max_records <= 0 {
    ///             return Err(ValidationError::invalid_field("maxRecords", "must be positive"));
    ///         }
    ///         Ok(())
    ///     })
    ///     .build();
    ///
    /// assert!(result.is_err());
    /// ```
    pub fn with_validation<F>(mut self, validator: F) -> Self
    where
        F: Fn(&WorkerConfiguration) -> std::result::Result<(), ValidationError>
            + Send
            + Sync
            + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Load every source, bind, and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No sources were added, or one fails to read or load
    /// - A required field or credentials key is missing
    /// - No credentials provider candidate can be constructed
    /// - The validation hook rejects the result
    pub fn build(self) -> Result<WorkerConfiguration> {
        if let Some(err) = self.read_error {
            return Err(err);
        }

        let mut loader = ConfigLoader::new();

        // Add file sources with increasing priority
        for (index, path) in self.file_paths.iter().enumerate() {
            let priority = 100 + (index as i32 * 10); // 100, 110, 120, etc.
            let source = FileSource::new(path).with_priority(priority);
            loader.add_source(Box::new(source));
        }

        for source in self.custom_sources {
            loader.add_source(source);
        }

        // Add environment variable source (highest priority)
        if let Some(prefix) = self.env_prefix {
            loader.add_source(Box::new(EnvSource::new(prefix)));
        }

        let entries = loader.load()?;

        let worker_ids = self.worker_ids.unwrap_or_else(default_worker_id_generator);
        let binder = ConfigBinder::new(self.providers, worker_ids);
        let config = binder.bind(&entries)?;

        if let Some(validator) = &self.validator {
            validator(&config)?;
        }

        Ok(config)
    }
}

impl Default for WorkerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkerConfiguration {
    /// Create a new builder for binding a worker configuration.
    pub fn builder() -> WorkerConfigBuilder {
        WorkerConfigBuilder::new()
    }
}
