//! Relay settings from the environment

use crate::error::ConfigError;
use tracing::info;

/// Email API key
pub const API_KEY_VAR: &str = "RESEND_API_KEY";
/// Inbox receiving submissions
pub const ADMIN_EMAIL_VAR: &str = "CONTACT_ADMIN_EMAIL";
/// Sender for the admin notification
pub const ADMIN_SENDER_VAR: &str = "CONTACT_ADMIN_SENDER";
/// Sender for the user confirmation
pub const USER_SENDER_VAR: &str = "CONTACT_USER_SENDER";
/// Email API endpoint
pub const ENDPOINT_VAR: &str = "RESEND_ENDPOINT";

const DEFAULT_ADMIN_SENDER: &str = "E-Cell Contact Form <onboarding@resend.dev>";
const DEFAULT_USER_SENDER: &str = "E-Cell <onboarding@resend.dev>";
const DEFAULT_ENDPOINT: &str = "https://api.resend.com/emails";

/// Contact relay settings
#[derive(Clone, PartialEq, Eq)]
pub struct ContactConfig {
    pub api_key: String,
    pub admin_address: String,
    pub admin_sender: String,
    pub user_sender: String,
    pub endpoint: String,
}

impl std::fmt::Debug for ContactConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactConfig")
            .field("api_key", &"<redacted>")
            .field("admin_address", &self.admin_address)
            .field("admin_sender", &self.admin_sender)
            .field("user_sender", &self.user_sender)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ContactConfig {
    /// Config with default senders and endpoint
    #[must_use]
    pub fn new(api_key: impl Into<String>, admin_address: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            admin_address: admin_address.into(),
            admin_sender: DEFAULT_ADMIN_SENDER.to_string(),
            user_sender: DEFAULT_USER_SENDER.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// With email API endpoint
    #[inline]
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
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
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let or_default = |key: &str, default: &str| {
            value(key).unwrap_or_else(|| {
                info!("{key} not set, using default: {default}");
                default.to_string()
            })
        };

        Ok(Self {
            api_key: value(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?,
            admin_address: value(ADMIN_EMAIL_VAR).ok_or(ConfigError::Missing(ADMIN_EMAIL_VAR))?,
            admin_sender: or_default(ADMIN_SENDER_VAR, DEFAULT_ADMIN_SENDER),
            user_sender: or_default(USER_SENDER_VAR, DEFAULT_USER_SENDER),
            endpoint: or_default(ENDPOINT_VAR, DEFAULT_ENDPOINT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_fill_optional_settings() {
        let config = ContactConfig::from_lookup(|key| match key {
            API_KEY_VAR => Some("re_123".to_string()),
            ADMIN_EMAIL_VAR => Some("team@ecell.example".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config, ContactConfig::new("re_123", "team@ecell.example"));
        assert_eq!(config.endpoint, "https://api.resend.com/emails");
    }

    #[test]
    fn missing_key_is_an_error() {
        let result = ContactConfig::from_lookup(|key| {
            (key == ADMIN_EMAIL_VAR).then(|| "team@ecell.example".to_string())
        });
        assert!(matches!(result, Err(ConfigError::Missing(API_KEY_VAR))));
    }

    #[test]
    fn debug_hides_key() {
        let debug = format!("{:?}", ContactConfig::new("re_secret", "a@b.c"));
        assert!(!debug.contains("re_secret"));
    }
}
