//! Worker identifier generation.

use std::sync::Arc;
use uuid::Uuid;

/// Produces a fresh worker identifier each time it is called.
pub type WorkerIdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// The process default: `<host>:<random uuid>`.
///
/// The host part comes from `HOSTNAME` and falls back to `localhost`.
pub fn default_worker_id_generator() -> WorkerIdGenerator {
    Arc::new(|| {
        let host = std::env::var("HOSTNAME")
            .ok()
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| "localhost".to_string());
        format!("{}:{}", host, Uuid::new_v4())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_ids_are_unique() {
        let generator = default_worker_id_generator();
        let ids: HashSet<String> = (0..100).map(|_| generator()).collect();
        assert_eq!(ids.len(), 100);
        assert!(ids.iter().all(|id| !id.is_empty() && id.contains(':')));
    }
}
