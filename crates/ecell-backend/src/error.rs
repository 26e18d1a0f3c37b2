//! Error types for backend configuration

use std::path::PathBuf;

/// Errors loading [`BackendConfig`](crate::config::BackendConfig)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required setting absent or blank
    #[error("missing required setting {0}")]
    Missing(&'static str),

    /// Setting present but unusable
    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },

    /// Config file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the schema
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// HTTP client could not be built
    #[error("http client error: {0}")]
    Client(String),
}

impl ConfigError {
    /// Create invalid-setting error
    pub fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }
}
