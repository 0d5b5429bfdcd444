use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult, ConfigError};

/// Request timeout applied when an environment does not set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level shape of the environments file.
///
/// ```toml
/// [environments.dev]
/// base_url = "https://dev.example.com/api"
/// auth_token = "..."
/// timeout = 10
///
/// [environments.dev.headers]
/// x-client = "apiregress"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentsFile {
    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentEntry>,
}

/// One environment as written in the file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentEntry {
    pub base_url: Option<String>,
    pub api_base_url: Option<String>,
    pub auth_token: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    pub timeout: Option<u64>,
}

/// A resolved environment, ready for the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    pub name: String,
    pub base_url: String,
    pub auth_token: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub timeout: Duration,
}

impl EnvironmentsFile {
    /// Names of all defined environments, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.environments.keys().map(String::as_str).collect()
    }

    /// Resolves `name` into a validated [`EnvironmentConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error when the environment is missing, has no base URL,
    /// sets both URL spellings, or sets a zero timeout.
    pub fn resolve(&self, name: &str) -> AppResult<EnvironmentConfig> {
        let entry = self.environments.get(name).ok_or_else(|| {
            AppError::config(ConfigError::UnknownEnvironment {
                name: name.to_owned(),
                available: self.names().join(", "),
            })
        })?;

        let base_url = match (entry.base_url.as_ref(), entry.api_base_url.as_ref()) {
            (Some(_), Some(_)) => {
                return Err(AppError::config(ConfigError::BaseUrlConflict {
                    name: name.to_owned(),
                }));
            }
            (Some(url), None) | (None, Some(url)) => url.trim().to_owned(),
            (None, None) => String::new(),
        };
        if base_url.is_empty() {
            return Err(AppError::config(ConfigError::MissingBaseUrl {
                name: name.to_owned(),
            }));
        }

        let timeout_secs = entry.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(AppError::config(ConfigError::TimeoutZero {
                name: name.to_owned(),
            }));
        }

        Ok(EnvironmentConfig {
            name: name.to_owned(),
            base_url,
            auth_token: entry
                .auth_token
                .as_ref()
                .map(|token| token.trim().to_owned())
                .filter(|token| !token.is_empty()),
            headers: entry.headers.clone(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
