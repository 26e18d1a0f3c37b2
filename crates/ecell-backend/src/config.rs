//! Backend connection settings
//!
//! Loaded from `ECELL_*` environment variables or a TOML file:
//!
//! ```toml
//! url = "https://project.example.co"
//! api_key = "public-anon-key"
//! bucket = "uploads"
//! timeout_secs = 15
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Base URL of the hosted backend
pub const URL_VAR: &str = "ECELL_BACKEND_URL";
/// Public API key sent with every request
pub const KEY_VAR: &str = "ECELL_BACKEND_KEY";
/// Object storage bucket for uploads
pub const BUCKET_VAR: &str = "ECELL_STORAGE_BUCKET";
/// Per-request timeout in seconds
pub const TIMEOUT_VAR: &str = "ECELL_HTTP_TIMEOUT_SECS";

const DEFAULT_BUCKET: &str = "uploads";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Hosted backend settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL, e.g. `https://project.example.co`
    pub url: String,
    /// Public API key
    pub api_key: String,
    /// Storage bucket for uploads
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl BackendConfig {
    /// Create config with default bucket and timeout
    #[must_use]
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            bucket: default_bucket(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// With storage bucket
    #[inline]
    #[must_use]
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Request timeout
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let url = required(URL_VAR)?;
        let api_key = required(KEY_VAR)?;

        let bucket = lookup(BUCKET_VAR).unwrap_or_else(|| {
            info!("{BUCKET_VAR} not set, using default: {DEFAULT_BUCKET}");
            default_bucket()
        });

        let timeout_secs = match lookup(TIMEOUT_VAR) {
            Some(raw) => raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                warn!("Invalid {TIMEOUT_VAR} value: {e}");
                ConfigError::invalid(TIMEOUT_VAR, e.to_string())
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let config = Self {
            url,
            api_key,
            bucket,
            timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!(path = %path.display(), url = %config.url, "loaded backend config");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.url)
            .map_err(|e| ConfigError::invalid("url", e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::invalid("url", format!("unsupported scheme '{}'", parsed.scheme())));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("timeout_secs", "must be positive"));
        }
        Ok(())
    }
}
