//! The worker settings a bind produces, with their baseline defaults.

use serde::Serialize;
use std::collections::BTreeSet;

/// Default user agent reported by workers.
pub const DEFAULT_USER_AGENT: &str = concat!("kcl-configurator/", env!("CARGO_PKG_VERSION"));

/// Metric dimensions that are always emitted, whatever the input says.
pub const METRICS_ALWAYS_ENABLED_DIMENSIONS: &[&str] = &["Operation"];

/// Metric dimensions enabled when `metricsEnabledDimensions` is not set.
pub const DEFAULT_METRICS_ENABLED_DIMENSIONS: &[&str] = &["Operation", "ShardId"];

/// An enum whose values are chosen by symbolic name in property files.
pub trait SymbolicEnum: Sized + Copy + 'static {
    /// Every value paired with its declared symbol.
    const SYMBOLS: &'static [(&'static str, Self)];

    /// Look up a value by symbol, ignoring ASCII case.
    ///
    /// The match must be exact after case folding; there is no prefix or
    /// nearest-name matching.
    fn from_symbol(text: &str) -> Option<Self> {
        Self::SYMBOLS
            .iter()
            .find(|(symbol, _)| symbol.eq_ignore_ascii_case(text))
            .map(|(_, value)| *value)
    }

    /// The declared symbol for this value.
    fn symbol(self) -> &'static str;
}

/// How much metric data a worker publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricsLevel {
    /// No metrics
    None,
    /// Aggregated metrics only
    Summary,
    /// Everything
    Detailed,
}

impl SymbolicEnum for MetricsLevel {
    const SYMBOLS: &'static [(&'static str, Self)] = &[
        ("NONE", Self::None),
        ("SUMMARY", Self::Summary),
        ("DETAILED", Self::Detailed),
    ];

    fn symbol(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Summary => "SUMMARY",
            Self::Detailed => "DETAILED",
        }
    }
}

/// Where a worker starts reading a shard that has no checkpoint yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InitialPositionInStream {
    /// Start after the most recent record
    Latest,
    /// Start at the oldest record still retained
    TrimHorizon,
    /// Start at a timestamp supplied elsewhere
    AtTimestamp,
}

impl SymbolicEnum for InitialPositionInStream {
    const SYMBOLS: &'static [(&'static str, Self)] = &[
        ("LATEST", Self::Latest),
        ("TRIM_HORIZON", Self::TrimHorizon),
        ("AT_TIMESTAMP", Self::AtTimestamp),
    ];

    fn symbol(self) -> &'static str {
        match self {
            Self::Latest => "LATEST",
            Self::TrimHorizon => "TRIM_HORIZON",
            Self::AtTimestamp => "AT_TIMESTAMP",
        }
    }
}

/// Passive holder for every bindable worker setting.
///
/// `Default` is the baseline state a bind starts from. Required fields start
/// empty and must be supplied by the input.
#[allow(missing_docs)] // field names mirror the registry keys
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSettings {
    pub application_name: String,
    pub stream_name: String,
    pub worker_identifier: String,
    pub kinesis_endpoint: Option<String>,
    #[serde(rename = "dynamoDBEndpoint")]
    pub dynamodb_endpoint: Option<String>,
    pub region_name: Option<String>,
    /// Lease table name; falls back to the application name when unset
    pub table_name: Option<String>,
    pub user_agent: String,
    pub initial_position_in_stream: InitialPositionInStream,
    pub failover_time_millis: i64,
    pub max_records: i64,
    pub idle_time_between_reads_in_millis: i64,
    pub parent_shard_poll_interval_millis: i64,
    pub shard_sync_interval_millis: i64,
    pub task_backoff_time_millis: i64,
    pub metrics_buffer_time_millis: i64,
    pub metrics_max_queue_size: i64,
    pub max_leases_for_worker: i64,
    pub max_leases_to_steal_at_one_time: i64,
    pub initial_lease_table_read_capacity: i64,
    pub initial_lease_table_write_capacity: i64,
    pub call_process_records_even_for_empty_record_list: bool,
    pub cleanup_leases_upon_shard_completion: bool,
    pub validate_sequence_number_before_checkpointing: bool,
    pub skip_shard_sync_at_worker_initialization_if_leases_exist: bool,
    pub metrics_level: MetricsLevel,
    pub metrics_enabled_dimensions: BTreeSet<String>,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            application_name: String::new(),
            stream_name: String::new(),
            worker_identifier: String::new(),
            kinesis_endpoint: None,
            dynamodb_endpoint: None,
            region_name: None,
            table_name: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            initial_position_in_stream: InitialPositionInStream::Latest,
            failover_time_millis: 10_000,
            max_records: 10_000,
            idle_time_between_reads_in_millis: 1_000,
            parent_shard_poll_interval_millis: 10_000,
            shard_sync_interval_millis: 60_000,
            task_backoff_time_millis: 500,
            metrics_buffer_time_millis: 10_000,
            metrics_max_queue_size: 10_000,
            max_leases_for_worker: i64::from(i32::MAX),
            max_leases_to_steal_at_one_time: 1,
            initial_lease_table_read_capacity: 10,
            initial_lease_table_write_capacity: 10,
            call_process_records_even_for_empty_record_list: false,
            cleanup_leases_upon_shard_completion: true,
            validate_sequence_number_before_checkpointing: true,
            skip_shard_sync_at_worker_initialization_if_leases_exist: false,
            metrics_level: MetricsLevel::Detailed,
            metrics_enabled_dimensions: DEFAULT_METRICS_ENABLED_DIMENSIONS
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }
}

impl WorkerSettings {
    /// The lease table name, defaulting to the application name.
    pub fn lease_table_name(&self) -> &str {
        self.table_name.as_deref().unwrap_or(&self.application_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_symbols_case_insensitive() {
        assert_eq!(
            InitialPositionInStream::from_symbol("TriM_Horizon"),
            Some(InitialPositionInStream::TrimHorizon)
        );
        assert_eq!(MetricsLevel::from_symbol("summary"), Some(MetricsLevel::Summary));
    }

    #[test]
    fn test_enum_requires_exact_symbol() {
        assert_eq!(InitialPositionInStream::from_symbol("TRIM"), None);
        assert_eq!(InitialPositionInStream::from_symbol("TRIMHORIZON"), None);
        assert_eq!(MetricsLevel::from_symbol("DETAILED "), None);
    }

    #[test]
    fn test_symbol_roundtrip_matches_table() {
        for (symbol, value) in MetricsLevel::SYMBOLS {
            assert_eq!(value.symbol(), *symbol);
        }
        for (symbol, value) in InitialPositionInStream::SYMBOLS {
            assert_eq!(value.symbol(), *symbol);
        }
    }

    #[test]
    fn test_defaults() {
        let settings = WorkerSettings::default();
        assert_eq!(settings.failover_time_millis, 10_000);
        assert_eq!(settings.metrics_level, MetricsLevel::Detailed);
        assert!(settings.cleanup_leases_upon_shard_completion);
        assert!(settings.metrics_enabled_dimensions.contains("ShardId"));
        assert!(settings.stream_name.is_empty());
    }

    #[test]
    fn test_lease_table_name_falls_back() {
        let mut settings = WorkerSettings {
            application_name: "app".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.lease_table_name(), "app");
        settings.table_name = Some("leases".to_string());
        assert_eq!(settings.lease_table_name(), "leases");
    }
}
