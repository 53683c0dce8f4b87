//! Core binding types: parsing, coercion, the field registry and the binder.

mod binder;
mod builder;
mod coerce;
mod configuration;
mod loader;
mod parser;
mod registry;
mod settings;
mod validation;
mod worker_id;

pub use binder::ConfigBinder;
pub use builder::WorkerConfigBuilder;
pub use coerce::{
    FieldKind, coerce_bool, coerce_enum, coerce_int, coerce_string_set, split_list,
};
pub use configuration::WorkerConfiguration;
pub use loader::ConfigLoader;
pub use parser::{RawEntry, parse_line, parse_properties, parse_reader};
pub use registry::{
    APPLICATION_NAME, CLOUDWATCH_CREDENTIALS_PROVIDER_KEY, CREDENTIALS_PROVIDER_KEY,
    CoercionRejected, DYNAMODB_CREDENTIALS_PROVIDER_KEY, FIELD_REGISTRY, FieldDescriptor,
    FieldSetter, STREAM_NAME, WORKER_ID, lookup, required_fields,
};
pub use settings::{
    DEFAULT_METRICS_ENABLED_DIMENSIONS, DEFAULT_USER_AGENT, InitialPositionInStream,
    METRICS_ALWAYS_ENABLED_DIMENSIONS, MetricsLevel, SymbolicEnum, WorkerSettings,
};
pub use validation::Validator;
pub use worker_id::{WorkerIdGenerator, default_worker_id_generator};
