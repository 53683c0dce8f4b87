//! # kcl-configurator
//!
//! Binds a flat, hand-edited property file into a typed stream-processing
//! worker configuration and resolves the credentials provider the worker
//! starts with.
//!
//! ## Overview
//!
//! A bind runs once at process startup:
//! - `key = value` lines are parsed, skipping anything malformed
//! - each key is matched case-insensitively against a static field registry
//! - values are coerced per field type; values that do not fit are ignored
//!   and the field keeps its default
//! - `AWSCredentialsProvider` lists provider identifiers, and the first one
//!   that can be constructed is used
//! - `streamName`, `applicationName` and the credentials key are required;
//!   a missing `workerId` is generated
//!
//! ## Quick Start
//!
//! ```rust
//! use kcl_configurator::prelude::*;
//!
//! # fn example() -> Result<()> {
//! let config = WorkerConfiguration::builder()
//!     .with_text(
//!         "streamName = orders\n\
//!          applicationName = order-processor\n\
//!          AWSCredentialsProvider = ProfileCredentialsProvider, EnvironmentVariableCredentialsProvider\n\
//!          initialPositionInStream = trim_horizon\n\
//!          failoverTimeMillis = 20000",
//!     )
//!     .build()?;
//!
//! assert_eq!(config.stream_name(), "orders");
//! assert_eq!(config.settings().failover_time_millis, 20000);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! Credentials are never fetched while binding. A provider that constructs
//! but has nothing to hand out is only noticed when the worker first calls
//! [`CredentialsProvider::credentials`](credentials::CredentialsProvider::credentials).

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod credentials;
pub mod error;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{
        ConfigBinder, InitialPositionInStream, MetricsLevel, WorkerConfigBuilder,
        WorkerConfiguration, WorkerSettings,
    };
    pub use crate::credentials::{
        Credentials, CredentialsError, CredentialsProvider, ProviderRegistry,
    };
    pub use crate::error::{ConfigError, Result, ValidationError};
}
