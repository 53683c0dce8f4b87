//! Post-bind checks and defaults.
//!
//! Runs after every entry has been applied. Missing structure is fatal here;
//! everything else either keeps its baseline value or gets a synthesized one.

use super::registry::{WORKER_ID, required_fields};
use super::settings::WorkerSettings;
use super::worker_id::WorkerIdGenerator;
use crate::error::{ConfigError, Result, ValidationError};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

/// A user-supplied check run on the finished configuration.
pub type Validator<T> = Arc<dyn Fn(&T) -> std::result::Result<(), ValidationError> + Send + Sync>;

/// Fail unless every required field ended up with a non-empty value.
///
/// `bound` holds the canonical names of fields whose last occurrence in the
/// input carried a non-empty value.
pub(crate) fn check_required(bound: &HashSet<&'static str>) -> Result<()> {
    match required_fields().find(|descriptor| !bound.contains(descriptor.name)) {
        Some(missing) => Err(ConfigError::missing(missing.name)),
        None => Ok(()),
    }
}

/// Fill in values that are optional in the input but needed by a worker.
pub(crate) fn apply_defaults(
    settings: &mut WorkerSettings,
    bound: &HashSet<&'static str>,
    worker_ids: &WorkerIdGenerator,
) {
    if !bound.contains(WORKER_ID) || settings.worker_identifier.is_empty() {
        settings.worker_identifier = worker_ids();
        warn!(
            worker_id = %settings.worker_identifier,
            "no workerId configured, generated one"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::{APPLICATION_NAME, STREAM_NAME};

    #[test]
    fn test_required_fields_present() {
        let bound: HashSet<_> = [STREAM_NAME, APPLICATION_NAME].into_iter().collect();
        assert!(check_required(&bound).is_ok());
    }

    #[test]
    fn test_missing_stream_name() {
        let bound: HashSet<_> = [APPLICATION_NAME].into_iter().collect();
        let err = check_required(&bound).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequiredField { field } if field == STREAM_NAME));
    }

    #[test]
    fn test_missing_application_name() {
        let bound: HashSet<_> = [STREAM_NAME, WORKER_ID].into_iter().collect();
        let err = check_required(&bound).unwrap_err();
        assert!(
            matches!(err, ConfigError::MissingRequiredField { field } if field == APPLICATION_NAME)
        );
    }

    #[test]
    fn test_worker_id_generated_when_absent() {
        let mut settings = WorkerSettings::default();
        let generator: WorkerIdGenerator = Arc::new(|| "generated".to_string());
        apply_defaults(&mut settings, &HashSet::new(), &generator);
        assert_eq!(settings.worker_identifier, "generated");
    }

    #[test]
    fn test_worker_id_kept_when_bound() {
        let mut settings = WorkerSettings {
            worker_identifier: "0".to_string(),
            ..Default::default()
        };
        let bound: HashSet<_> = [WORKER_ID].into_iter().collect();
        let generator: WorkerIdGenerator = Arc::new(|| "generated".to_string());
        apply_defaults(&mut settings, &bound, &generator);
        assert_eq!(settings.worker_identifier, "0");
    }
}
