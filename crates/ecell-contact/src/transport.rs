//! Email delivery seam and the transactional email API client

use crate::config::ContactConfig;
use crate::error::{ConfigError, ContactError};
use crate::form::OutgoingEmail;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Provider acknowledgement for one message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// Provider message id
    #[serde(default)]
    pub id: Option<String>,
}

/// Sends a single email
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Deliver one message
    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, ContactError>;
}

/// Transport posting to a Resend-compatible `/emails` endpoint
#[derive(Clone)]
pub struct ResendTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl std::fmt::Debug for ResendTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendTransport")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ResendTransport {
    /// Create transport from relay config
    pub fn new(config: &ContactConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl EmailTransport for ResendTransport {
    #[instrument(skip(self, email), fields(subject = %email.subject))]
    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, ContactError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await
            .map_err(|e| ContactError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContactError::Delivery(format!("{status}: {body}")));
        }

        let receipt = response
            .json::<DeliveryReceipt>()
            .await
            .map_err(|e| ContactError::Delivery(format!("unreadable response: {e}")))?;
        debug!(id = ?receipt.id, "email accepted");
        Ok(receipt)
    }
}
