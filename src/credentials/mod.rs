//! Credentials providers and their resolution from property values.

mod builtin;
mod provider;
mod registry;
mod resolver;

pub use builtin::{EnvironmentVariableCredentialsProvider, ProfileCredentialsProvider};
pub use provider::{Credentials, CredentialsError, CredentialsProvider};
pub use registry::{ProviderFactory, ProviderRegistry};
pub use resolver::CredentialsResolver;
