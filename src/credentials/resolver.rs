//! Picks the credentials provider named by a property value.

use super::provider::CredentialsProvider;
use super::registry::ProviderRegistry;
use crate::core::split_list;
use crate::error::{ConfigError, Result};
use std::sync::Arc;
use tracing::debug;

/// Resolves a comma-separated candidate list against a [`ProviderRegistry`].
///
/// Candidates are tried in order and the first one whose factory succeeds
/// is returned. Nothing is asked for credentials here: a provider that
/// constructs but cannot actually deliver credentials is accepted, and the
/// failure surfaces on first use.
#[derive(Debug, Clone)]
pub struct CredentialsResolver<'a> {
    registry: &'a ProviderRegistry,
}

impl<'a> CredentialsResolver<'a> {
    /// Create a resolver over `registry`.
    pub fn new(registry: &'a ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Resolve the value of property `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CredentialsResolution`] when no candidate
    /// constructs, including when the list is empty.
    pub fn resolve(&self, key: &'static str, value: &str) -> Result<Arc<dyn CredentialsProvider>> {
        for candidate in split_list(value) {
            match self.registry.construct(candidate) {
                Ok(provider) => {
                    debug!(key, candidate, "selected credentials provider");
                    return Ok(provider);
                }
                Err(e) => {
                    debug!(key, candidate, error = %e, "skipping credentials provider candidate");
                }
            }
        }

        Err(ConfigError::CredentialsResolution {
            key,
            candidates: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{Credentials, CredentialsError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fails;

    impl CredentialsProvider for Fails {
        fn credentials(&self) -> std::result::Result<Credentials, CredentialsError> {
            Err(CredentialsError::retrieval("Fails", "always"))
        }

        fn name(&self) -> &str {
            "Fails"
        }
    }

    struct Works;

    impl CredentialsProvider for Works {
        fn credentials(&self) -> std::result::Result<Credentials, CredentialsError> {
            Ok(Credentials::new("AKID", "secret"))
        }

        fn name(&self) -> &str {
            "Works"
        }
    }

    fn registry() -> ProviderRegistry {
        let mut registry = ProviderRegistry::new();
        registry.register("Works", || Ok(Arc::new(Works) as Arc<dyn CredentialsProvider>));
        registry.register("FailsOnUse", || Ok(Arc::new(Fails) as Arc<dyn CredentialsProvider>));
        registry.register("Unconstructable", || {
            Err(CredentialsError::construction("Unconstructable", "no"))
        });
        registry
    }

    #[test]
    fn test_first_constructable_wins() {
        let registry = registry();
        let resolver = CredentialsResolver::new(&registry);
        let provider = resolver
            .resolve("AWSCredentialsProvider", "ABCD, Unconstructable ,Works, FailsOnUse")
            .unwrap();
        assert_eq!(provider.name(), "Works");
    }

    #[test]
    fn test_construction_is_enough() {
        let registry = registry();
        let resolver = CredentialsResolver::new(&registry);
        let provider = resolver
            .resolve("AWSCredentialsProvider", "FailsOnUse, Works")
            .unwrap();
        assert_eq!(provider.name(), "Fails");
        assert!(provider.credentials().is_err());
    }

    #[test]
    fn test_stops_at_first_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ProviderRegistry::new();
        let counter = Arc::clone(&calls);
        registry.register("Counted", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(Works) as Arc<dyn CredentialsProvider>)
        });
        let resolver = CredentialsResolver::new(&registry);
        resolver
            .resolve("AWSCredentialsProvider", "Counted, Counted")
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_all_candidates_fail() {
        let registry = registry();
        let resolver = CredentialsResolver::new(&registry);
        let err = resolver
            .resolve("AWSCredentialsProvider", "ABCD, Unconstructable")
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ConfigError::CredentialsResolution { candidates, .. } if candidates == "ABCD, Unconstructable"
        ));
    }

    #[test]
    fn test_empty_list_fails() {
        let registry = registry();
        let resolver = CredentialsResolver::new(&registry);
        assert!(resolver.resolve("AWSCredentialsProvider", " , ").is_err());
    }
}
