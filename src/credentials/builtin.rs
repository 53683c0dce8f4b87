//! Providers available without any registration.

use super::provider::{Credentials, CredentialsError, CredentialsProvider};
use config::{Config, File, FileFormat, Value};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// Reads credentials from the process environment at retrieval time.
///
/// Looks at `AWS_ACCESS_KEY_ID` (or `AWS_ACCESS_KEY`), `AWS_SECRET_ACCESS_KEY`
/// (or `AWS_SECRET_KEY`) and the optional `AWS_SESSION_TOKEN`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvironmentVariableCredentialsProvider;

impl EnvironmentVariableCredentialsProvider {
    /// Registry identifier.
    pub const NAME: &'static str = "EnvironmentVariableCredentialsProvider";

    /// Create the provider. Nothing is read until retrieval.
    pub fn new() -> Self {
        Self
    }
}

fn first_non_empty_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

impl CredentialsProvider for EnvironmentVariableCredentialsProvider {
    fn credentials(&self) -> Result<Credentials, CredentialsError> {
        let access_key = first_non_empty_var(&["AWS_ACCESS_KEY_ID", "AWS_ACCESS_KEY"]);
        let secret_key = first_non_empty_var(&["AWS_SECRET_ACCESS_KEY", "AWS_SECRET_KEY"]);

        match (access_key, secret_key) {
            (Some(access), Some(secret)) => {
                let creds = Credentials::new(access, secret);
                Ok(match first_non_empty_var(&["AWS_SESSION_TOKEN"]) {
                    Some(token) => creds.with_session_token(token),
                    None => creds,
                })
            }
            _ => Err(CredentialsError::retrieval(
                Self::NAME,
                "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must both be set",
            )),
        }
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}

/// Reads one profile of a shared credentials file at retrieval time.
///
/// The file location and profile name are fixed when the provider is
/// constructed; the file itself is only opened by [`credentials`].
///
/// [`credentials`]: CredentialsProvider::credentials
#[derive(Debug, Clone)]
pub struct ProfileCredentialsProvider {
    path: PathBuf,
    profile: String,
}

impl ProfileCredentialsProvider {
    /// Registry identifier.
    pub const NAME: &'static str = "ProfileCredentialsProvider";

    /// Create a provider for an explicit file and profile.
    pub fn new(path: impl Into<PathBuf>, profile: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            profile: profile.into(),
        }
    }

    /// Locate the file and profile from the environment.
    ///
    /// Uses `AWS_SHARED_CREDENTIALS_FILE`, else `$HOME/.aws/credentials`, and
    /// `AWS_PROFILE`, else `default`.
    ///
    /// # Errors
    ///
    /// Fails when neither `AWS_SHARED_CREDENTIALS_FILE` nor `HOME` is set.
    pub fn from_env() -> Result<Self, CredentialsError> {
        let path = match env::var_os("AWS_SHARED_CREDENTIALS_FILE") {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => env::var_os("HOME")
                .filter(|home| !home.is_empty())
                .map(|home| Path::new(&home).join(".aws").join("credentials"))
                .ok_or_else(|| {
                    CredentialsError::construction(
                        Self::NAME,
                        "cannot locate credentials file: HOME is not set",
                    )
                })?,
        };
        let profile = env::var("AWS_PROFILE")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| "default".to_string());
        Ok(Self::new(path, profile))
    }

    /// The credentials file this provider reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The profile this provider reads.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Load this provider's profile section, with keys folded to lowercase.
    ///
    /// Both `[name]` and `[profile name]` headers select the profile; the
    /// bare form wins when a file has both.
    fn load_profile(&self) -> Result<HashMap<String, String>, CredentialsError> {
        let text = std::fs::read_to_string(&self.path)?;
        let mut sections = Config::builder()
            .add_source(File::from_str(&text, FileFormat::Ini))
            .build()
            .and_then(|config| config.try_deserialize::<HashMap<String, Value>>())
            .map_err(|e| {
                CredentialsError::retrieval(
                    Self::NAME,
                    format!("cannot parse {}: {e}", self.path.display()),
                )
            })?;

        let section = sections
            .remove(&self.profile)
            .or_else(|| sections.remove(&format!("profile {}", self.profile)))
            .and_then(|section| section.into_table().ok())
            .unwrap_or_default();

        Ok(section
            .into_iter()
            .filter_map(|(key, value)| {
                let value = value.into_string().ok()?;
                Some((key.to_ascii_lowercase(), value.trim().to_string()))
            })
            .filter(|(_, value)| !value.is_empty())
            .collect())
    }
}

impl CredentialsProvider for ProfileCredentialsProvider {
    fn credentials(&self) -> Result<Credentials, CredentialsError> {
        let mut profile = self.load_profile()?;
        let mut take = |key: &str| {
            profile.remove(key).ok_or_else(|| {
                CredentialsError::retrieval(
                    Self::NAME,
                    format!(
                        "profile '{}' in {} has no {key}",
                        self.profile,
                        self.path.display()
                    ),
                )
            })
        };

        let access = take("aws_access_key_id")?;
        let secret = take("aws_secret_access_key")?;
        let creds = Credentials::new(access, secret);
        Ok(match take("aws_session_token") {
            Ok(token) => creds.with_session_token(token),
            Err(_) => creds,
        })
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
