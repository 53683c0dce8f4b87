//! The static table of bindable fields.
//!
//! Keys are looked up case-insensitively against the canonical names below.
//! Anything not in the table is ignored by the binder.

use super::coerce::{self, FieldKind};
use super::settings::{
    InitialPositionInStream, METRICS_ALWAYS_ENABLED_DIMENSIONS, MetricsLevel, WorkerSettings,
};
use std::collections::BTreeSet;

/// Key holding the ordered list of credentials provider candidates.
pub const CREDENTIALS_PROVIDER_KEY: &str = "AWSCredentialsProvider";

/// Optional override of the credentials used for the lease table.
pub const DYNAMODB_CREDENTIALS_PROVIDER_KEY: &str = "AWSCredentialsProviderDynamoDB";

/// Optional override of the credentials used for metrics publication.
pub const CLOUDWATCH_CREDENTIALS_PROVIDER_KEY: &str = "AWSCredentialsProviderCloudWatch";

/// Canonical name of the stream name field.
pub const STREAM_NAME: &str = "streamName";

/// Canonical name of the application name field.
pub const APPLICATION_NAME: &str = "applicationName";

/// Canonical name of the worker identifier field.
pub const WORKER_ID: &str = "workerId";

/// Typed write access to one settings field.
#[derive(Clone, Copy)]
pub enum FieldSetter {
    /// Receives the raw text
    String(fn(&mut WorkerSettings, String)),
    /// Receives a parsed integer
    Int(fn(&mut WorkerSettings, i64)),
    /// Receives a parsed boolean
    Boolean(fn(&mut WorkerSettings, bool)),
    /// Receives the raw text; returns `false` if it names no symbol
    Enum(fn(&mut WorkerSettings, &str) -> bool),
    /// Receives the coerced set, base dimensions already included
    StringSet(fn(&mut WorkerSettings, BTreeSet<String>)),
}

/// A value that could not be coerced into its field's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionRejected {
    /// Canonical field name
    pub field: &'static str,
    /// The kind the field expected
    pub expected: FieldKind,
}

/// One entry of the field registry.
#[derive(Clone, Copy)]
pub struct FieldDescriptor {
    /// Canonical (documented) key
    pub name: &'static str,
    /// Whether a bind fails when this field is absent or empty
    pub required: bool,
    setter: FieldSetter,
}

impl FieldDescriptor {
    const fn new(name: &'static str, setter: FieldSetter) -> Self {
        Self {
            name,
            required: false,
            setter,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The declared type of this field.
    pub fn kind(&self) -> FieldKind {
        match self.setter {
            FieldSetter::String(_) => FieldKind::String,
            FieldSetter::Int(_) => FieldKind::Int,
            FieldSetter::Boolean(_) => FieldKind::Boolean,
            FieldSetter::Enum(_) => FieldKind::Enum,
            FieldSetter::StringSet(_) => FieldKind::StringSet,
        }
    }

    /// Whether `key` names this field, ignoring ASCII case.
    pub fn matches(&self, key: &str) -> bool {
        self.name.eq_ignore_ascii_case(key)
    }

    /// Coerce `raw` and write it into `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`CoercionRejected`] when the text does not fit the field's
    /// kind. `settings` is untouched in that case.
    pub fn apply(&self, settings: &mut WorkerSettings, raw: &str) -> Result<(), CoercionRejected> {
        let applied = match self.setter {
            FieldSetter::String(set) => {
                set(settings, raw.to_string());
                true
            }
            FieldSetter::Int(set) => coerce::coerce_int(raw).map(|v| set(settings, v)).is_some(),
            FieldSetter::Boolean(set) => {
                coerce::coerce_bool(raw).map(|v| set(settings, v)).is_some()
            }
            FieldSetter::Enum(set) => set(settings, raw),
            FieldSetter::StringSet(set) => {
                set(
                    settings,
                    coerce::coerce_string_set(raw, METRICS_ALWAYS_ENABLED_DIMENSIONS),
                );
                true
            }
        };

        if applied {
            Ok(())
        } else {
            Err(CoercionRejected {
                field: self.name,
                expected: self.kind(),
            })
        }
    }
}

impl std::fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("required", &self.required)
            .finish()
    }
}

fn set_symbol<E: super::settings::SymbolicEnum>(slot: &mut E, raw: &str) -> bool {
    match coerce::coerce_enum::<E>(raw) {
        Some(value) => {
            *slot = value;
            true
        }
        None => false,
    }
}

/// Optional text fields treat an empty value as unset.
fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// Every bindable field.
pub static FIELD_REGISTRY: &[FieldDescriptor] = &[
    FieldDescriptor::new(
        APPLICATION_NAME,
        FieldSetter::String(|s, v| s.application_name = v),
    )
    .required(),
    FieldDescriptor::new(STREAM_NAME, FieldSetter::String(|s, v| s.stream_name = v)).required(),
    FieldDescriptor::new(WORKER_ID, FieldSetter::String(|s, v| s.worker_identifier = v)),
    FieldDescriptor::new(
        "kinesisEndpoint",
        FieldSetter::String(|s, v| s.kinesis_endpoint = non_empty(v)),
    ),
    FieldDescriptor::new(
        "dynamoDBEndpoint",
        FieldSetter::String(|s, v| s.dynamodb_endpoint = non_empty(v)),
    ),
    FieldDescriptor::new("regionName", FieldSetter::String(|s, v| s.region_name = non_empty(v))),
    FieldDescriptor::new("tableName", FieldSetter::String(|s, v| s.table_name = non_empty(v))),
    FieldDescriptor::new("userAgent", FieldSetter::String(|s, v| s.user_agent = v)),
    FieldDescriptor::new(
        "initialPositionInStream",
        FieldSetter::Enum(|s, v| {
            set_symbol::<InitialPositionInStream>(&mut s.initial_position_in_stream, v)
        }),
    ),
    FieldDescriptor::new(
        "failoverTimeMillis",
        FieldSetter::Int(|s, v| s.failover_time_millis = v),
    ),
    FieldDescriptor::new("maxRecords", FieldSetter::Int(|s, v| s.max_records = v)),
    FieldDescriptor::new(
        "idleTimeBetweenReadsInMillis",
        FieldSetter::Int(|s, v| s.idle_time_between_reads_in_millis = v),
    ),
    FieldDescriptor::new(
        "parentShardPollIntervalMillis",
        FieldSetter::Int(|s, v| s.parent_shard_poll_interval_millis = v),
    ),
    FieldDescriptor::new(
        "shardSyncIntervalMillis",
        FieldSetter::Int(|s, v| s.shard_sync_interval_millis = v),
    ),
    FieldDescriptor::new(
        "taskBackoffTimeMillis",
        FieldSetter::Int(|s, v| s.task_backoff_time_millis = v),
    ),
    FieldDescriptor::new(
        "metricsBufferTimeMillis",
        FieldSetter::Int(|s, v| s.metrics_buffer_time_millis = v),
    ),
    FieldDescriptor::new(
        "metricsMaxQueueSize",
        FieldSetter::Int(|s, v| s.metrics_max_queue_size = v),
    ),
    FieldDescriptor::new(
        "maxLeasesForWorker",
        FieldSetter::Int(|s, v| s.max_leases_for_worker = v),
    ),
    FieldDescriptor::new(
        "maxLeasesToStealAtOneTime",
        FieldSetter::Int(|s, v| s.max_leases_to_steal_at_one_time = v),
    ),
    FieldDescriptor::new(
        "initialLeaseTableReadCapacity",
        FieldSetter::Int(|s, v| s.initial_lease_table_read_capacity = v),
    ),
    FieldDescriptor::new(
        "initialLeaseTableWriteCapacity",
        FieldSetter::Int(|s, v| s.initial_lease_table_write_capacity = v),
    ),
    FieldDescriptor::new(
        "callProcessRecordsEvenForEmptyRecordList",
        FieldSetter::Boolean(|s, v| s.call_process_records_even_for_empty_record_list = v),
    ),
    FieldDescriptor::new(
        "cleanupLeasesUponShardCompletion",
        FieldSetter::Boolean(|s, v| s.cleanup_leases_upon_shard_completion = v),
    ),
    FieldDescriptor::new(
        "validateSequenceNumberBeforeCheckpointing",
        FieldSetter::Boolean(|s, v| s.validate_sequence_number_before_checkpointing = v),
    ),
    FieldDescriptor::new(
        "skipShardSyncAtWorkerInitializationIfLeasesExist",
        FieldSetter::Boolean(|s, v| s.skip_shard_sync_at_worker_initialization_if_leases_exist = v),
    ),
    FieldDescriptor::new(
        "metricsLevel",
        FieldSetter::Enum(|s, v| set_symbol::<MetricsLevel>(&mut s.metrics_level, v)),
    ),
    FieldDescriptor::new(
        "metricsEnabledDimensions",
        FieldSetter::StringSet(|s, v| s.metrics_enabled_dimensions = v),
    ),
];

/// Find the descriptor for `key`, ignoring ASCII case.
pub fn lookup(key: &str) -> Option<&'static FieldDescriptor> {
    FIELD_REGISTRY.iter().find(|descriptor| descriptor.matches(key))
}

/// Descriptors of the fields a bind cannot succeed without.
pub fn required_fields() -> impl Iterator<Item = &'static FieldDescriptor> {
    FIELD_REGISTRY.iter().filter(|descriptor| descriptor.required)
}
