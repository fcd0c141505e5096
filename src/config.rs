// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Process-wide provider configuration.
//!
//! The provider needs a single credential, the SparkPost API key, plus a few
//! optional settings. Configuration is resolved once at startup, stored in a
//! process-wide cell by [`init_config`], and never mutated afterwards.
//!
//! # Sources
//!
//! Values from an optional YAML file take precedence over environment
//! variables:
//!
//! ```yaml
//! sparkpost:
//!   api-key: "0123456789abcdef"
//!   base-url: "https://api.eu.sparkpost.com/api/v1"
//!   request-timeout-secs: 15
//! ```
//!
//! | Setting | Environment variable | Default |
//! |---------|----------------------|---------|
//! | `api-key` | `SPARKPOST_API_KEY` | required |
//! | `base-url` | `SPARKPOST_BASE_URL` | `https://api.sparkpost.com/api/v1` |
//! | `request-timeout-secs` | `SPARKPOST_REQUEST_TIMEOUT_SECS` | 30 |

use crate::client::parse_base_url;
use crate::constants::{
    CONFIG_NAMESPACE, DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, ENV_API_KEY,
    ENV_BASE_URL, ENV_REQUEST_TIMEOUT_SECS,
};
use crate::errors::ProviderError;
use serde::Deserialize;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::debug;

static CONFIG: OnceLock<Arc<ProviderConfig>> = OnceLock::new();

/// Immutable provider configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// SparkPost API key, sent verbatim in the `Authorization` header
    pub api_key: String,
    /// API base URL, e.g. `https://api.sparkpost.com/api/v1`
    pub base_url: String,
    /// Upper bound on each remote request
    pub request_timeout: Duration,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Settings as they appear under the `sparkpost` namespace of a config file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Settings {
    api_key: Option<String>,
    base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    sparkpost: Option<Settings>,
}

impl ProviderConfig {
    /// Configuration with the given API key and default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Config`] if the key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ProviderError::Config(format!(
                "required configuration value '{CONFIG_NAMESPACE}:api-key' is empty"
            )));
        }
        Ok(Self {
            api_key,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        })
    }

    /// Override the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Resolve configuration from the process environment only.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Config`] if the API key is missing or a value
    /// is malformed.
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::resolve(Settings::default(), |name| std::env::var(name).ok())
    }

    /// Resolve configuration from a YAML file, falling back to the
    /// environment for settings the file leaves out.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Config`] if the file cannot be read or parsed,
    /// the API key is missing, or a value is malformed.
    pub fn from_file(path: &Path) -> Result<Self, ProviderError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ProviderError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        let settings = parse_settings(&raw).map_err(|e| {
            ProviderError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;
        Self::resolve(settings, |name| std::env::var(name).ok())
    }

    /// Resolve configuration from an optional file and the environment.
    ///
    /// # Errors
    ///
    /// See [`ProviderConfig::from_file`] and [`ProviderConfig::from_env`].
    pub fn load(path: Option<&Path>) -> Result<Self, ProviderError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_env(),
        }
    }

    /// Merge file settings over values looked up through `env`.
    fn resolve(
        settings: Settings,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ProviderError> {
        let api_key = settings
            .api_key
            .or_else(|| env(ENV_API_KEY))
            .ok_or_else(|| {
                ProviderError::Config(format!(
                    "required configuration value '{CONFIG_NAMESPACE}:api-key' is missing \
                     (set it in the config file or via {ENV_API_KEY})"
                ))
            })?;

        let mut config = Self::new(api_key)?;

        if let Some(base_url) = settings.base_url.or_else(|| env(ENV_BASE_URL)) {
            config.base_url = base_url;
        }
        parse_base_url(&config.base_url)?;

        let timeout_secs = match settings.request_timeout_secs {
            Some(secs) => Some(secs),
            None => env(ENV_REQUEST_TIMEOUT_SECS)
                .map(|raw| {
                    raw.trim().parse::<u64>().map_err(|e| {
                        ProviderError::Config(format!(
                            "{ENV_REQUEST_TIMEOUT_SECS} must be a whole number of seconds: {e}"
                        ))
                    })
                })
                .transpose()?,
        };
        if let Some(secs) = timeout_secs {
            if secs == 0 {
                return Err(ProviderError::Config(
                    "request timeout must be at least one second".to_string(),
                ));
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        debug!(config = ?config, "Resolved provider configuration");
        Ok(config)
    }
}

fn parse_settings(raw: &str) -> Result<Settings, serde_yaml::Error> {
    let file: ConfigFile = serde_yaml::from_str(raw)?;
    Ok(file.sparkpost.unwrap_or_default())
}

/// Store the process-wide configuration. Must run before any lifecycle
/// operation and may run only once.
///
/// # Errors
///
/// Returns [`ProviderError::Config`] if configuration was already initialized.
pub fn init_config(config: ProviderConfig) -> Result<Arc<ProviderConfig>, ProviderError> {
    CONFIG
        .set(Arc::new(config))
        .map_err(|_| ProviderError::Config("configuration already initialized".to_string()))?;
    self::config()
}

/// The process-wide configuration.
///
/// # Errors
///
/// Returns [`ProviderError::Config`] if [`init_config`] has not run.
pub fn config() -> Result<Arc<ProviderConfig>, ProviderError> {
    CONFIG
        .get()
        .cloned()
        .ok_or_else(|| ProviderError::Config("configuration not initialized".to_string()))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
