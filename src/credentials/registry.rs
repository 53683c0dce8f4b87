//! Identifier-to-factory lookup for credentials providers.

use super::builtin::{EnvironmentVariableCredentialsProvider, ProfileCredentialsProvider};
use super::provider::{CredentialsError, CredentialsProvider};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Zero-argument constructor for a credentials provider.
pub type ProviderFactory =
    Arc<dyn Fn() -> Result<Arc<dyn CredentialsProvider>, CredentialsError> + Send + Sync>;

/// Registered credentials provider factories.
///
/// Identifiers are matched exactly. If that fails, the part after the last
/// `.` or `$` is tried, so qualified names like
/// `com.amazonaws.auth.EnvironmentVariableCredentialsProvider` still resolve.
///
/// # Examples
///
/// ```rust
/// use kcl_configurator::credentials::{
///     Credentials, CredentialsError, CredentialsProvider, ProviderRegistry,
/// };
/// use std::sync::Arc;
///
/// struct Fixed;
///
/// impl CredentialsProvider for Fixed {
///     fn credentials(&self) -> Result<Credentials, CredentialsError> {
///         Ok(Credentials::new("AKID", "secret"))
///     }
///
///     fn name(&self) -> &str {
///         "Fixed"
///     }
/// }
///
/// let mut registry = ProviderRegistry::with_builtins();
/// registry.register("Fixed", || Ok(Arc::new(Fixed) as Arc<dyn CredentialsProvider>));
/// assert!(registry.construct("Fixed").is_ok());
/// assert!(registry.construct("Missing").is_err());
/// ```
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    factories: HashMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in providers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(EnvironmentVariableCredentialsProvider::NAME, || {
            Ok(Arc::new(EnvironmentVariableCredentialsProvider::new()) as Arc<dyn CredentialsProvider>)
        });
        registry.register(ProfileCredentialsProvider::NAME, || {
            ProfileCredentialsProvider::from_env()
                .map(|provider| Arc::new(provider) as Arc<dyn CredentialsProvider>)
        });
        registry
    }

    /// Register a factory, replacing any previous one with the same identifier.
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Arc<dyn CredentialsProvider>, CredentialsError> + Send + Sync + 'static,
    {
        self.factories.insert(id.into(), Arc::new(factory));
    }

    /// Whether a factory would be found for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.factory(id).is_some()
    }

    /// Construct the provider registered under `id`.
    ///
    /// Only the factory runs; credentials are not retrieved.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError::UnknownProvider`] if nothing is registered
    /// under `id`, or whatever the factory returns.
    pub fn construct(&self, id: &str) -> Result<Arc<dyn CredentialsProvider>, CredentialsError> {
        let factory = self
            .factory(id)
            .ok_or_else(|| CredentialsError::UnknownProvider(id.to_string()))?;
        factory()
    }

    /// Registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    fn factory(&self, id: &str) -> Option<&ProviderFactory> {
        self.factories.get(id).or_else(|| {
            let short = id.rsplit(['.', '$']).next()?;
            if short == id {
                None
            } else {
                self.factories.get(short)
            }
        })
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.identifiers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::Credentials;

    struct Named(&'static str);

    impl CredentialsProvider for Named {
        fn credentials(&self) -> Result<Credentials, CredentialsError> {
            Ok(Credentials::new(self.0, "secret"))
        }

        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_builtins_registered() {
        let registry = ProviderRegistry::with_builtins();
        assert!(registry.contains("EnvironmentVariableCredentialsProvider"));
        assert!(registry.contains("ProfileCredentialsProvider"));
        assert!(!registry.contains("ABCD"));
    }

    #[test]
    fn test_qualified_name_falls_back_to_short_name() {
        let registry = ProviderRegistry::with_builtins();
        assert!(registry.contains("com.amazonaws.auth.EnvironmentVariableCredentialsProvider"));
        assert!(registry.contains("some.Outer$EnvironmentVariableCredentialsProvider"));
        assert!(!registry.contains("com.amazonaws.auth.Nope"));
    }

    #[test]
    fn test_exact_match_wins_over_short_name() {
        let mut registry = ProviderRegistry::new();
        registry.register("Named", || Ok(Arc::new(Named("short")) as Arc<dyn CredentialsProvider>));
        registry.register("pkg.Named", || {
            Ok(Arc::new(Named("qualified")) as Arc<dyn CredentialsProvider>)
        });
        assert_eq!(registry.construct("pkg.Named").unwrap().name(), "qualified");
        assert_eq!(registry.construct("other.Named").unwrap().name(), "short");
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = ProviderRegistry::new();
        registry.register("P", || Ok(Arc::new(Named("one")) as Arc<dyn CredentialsProvider>));
        registry.register("P", || Ok(Arc::new(Named("two")) as Arc<dyn CredentialsProvider>));
        assert_eq!(registry.construct("P").unwrap().name(), "two");
        assert_eq!(registry.identifiers(), vec!["P"]);
    }

    #[test]
    fn test_unknown_provider_error() {
        let registry = ProviderRegistry::new();
        let err = registry.construct("Nope").err().unwrap();
        assert!(matches!(err, CredentialsError::UnknownProvider(id) if id == "Nope"));
    }
}
