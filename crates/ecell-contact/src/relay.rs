//! Submission handling: validate, notify the site inbox, confirm to the user

use crate::config::ContactConfig;
use crate::error::ContactError;
use crate::form::{admin_notification, user_confirmation, ContactForm};
use crate::transport::{DeliveryReceipt, EmailTransport};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

/// Body of a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub admin_email: DeliveryReceipt,
    pub user_email: DeliveryReceipt,
}

/// Relay bound to a transport and config
#[derive(Clone)]
pub struct ContactRelay {
    transport: Arc<dyn EmailTransport>,
    config: ContactConfig,
}

impl std::fmt::Debug for ContactRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactRelay")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ContactRelay {
    /// Create relay
    #[must_use]
    pub fn new(transport: Arc<dyn EmailTransport>, config: ContactConfig) -> Self {
        Self { transport, config }
    }

    /// Handle one submission
    ///
    /// The admin notification goes first; if it fails no confirmation is
    /// sent.
    pub async fn submit(&self, form: &ContactForm) -> Result<ContactResponse, ContactError> {
        form.validate()?;

        let admin_email = self
            .transport
            .send(&admin_notification(form, &self.config))
            .await
            .map_err(|e| {
                error!(error = %e, "admin notification failed");
                e
            })?;
        info!(id = ?admin_email.id, "email sent to admin");

        let user_email = self
            .transport
            .send(&user_confirmation(form, &self.config))
            .await
            .map_err(|e| {
                error!(error = %e, "user confirmation failed");
                e
            })?;
        info!(id = ?user_email.id, "confirmation email sent to user");

        Ok(ContactResponse {
            success: true,
            message: "Emails sent successfully".to_string(),
            admin_email,
            user_email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockEmailTransport;
    use mockall::Sequence;
    use pretty_assertions::assert_eq;

    fn receipt(id: &str) -> DeliveryReceipt {
        DeliveryReceipt {
            id: Some(id.to_string()),
        }
    }

    fn config() -> ContactConfig {
        ContactConfig::new("re_test", "team@ecell.example")
    }

    #[tokio::test]
    async fn sends_admin_then_user_email() {
        let mut transport = MockEmailTransport::new();
        let mut seq = Sequence::new();
        transport
            .expect_send()
            .withf(|email| email.subject == "New Contact Form Message from Asha")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(receipt("admin-1")));
        transport
            .expect_send()
            .withf(|email| email.to == vec!["asha@example.com".to_string()])
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(receipt("user-1")));

        let relay = ContactRelay::new(Arc::new(transport), config());
        let response = relay
            .submit(&ContactForm::new("Asha", "asha@example.com", "Hi"))
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "success": true,
                "message": "Emails sent successfully",
                "adminEmail": {"id": "admin-1"},
                "userEmail": {"id": "user-1"}
            })
        );
    }

    #[tokio::test]
    async fn invalid_form_sends_nothing() {
        let mut transport = MockEmailTransport::new();
        transport.expect_send().never();

        let relay = ContactRelay::new(Arc::new(transport), config());
        let err = relay
            .submit(&ContactForm::new("Asha", "", "Hi"))
            .await
            .unwrap_err();
        assert_eq!(err, ContactError::MissingFields);
    }

    #[tokio::test]
    async fn admin_failure_skips_confirmation() {
        let mut transport = MockEmailTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Err(ContactError::Delivery("403: domain not verified".into())));

        let relay = ContactRelay::new(Arc::new(transport), config());
        let err = relay
            .submit(&ContactForm::new("Asha", "asha@example.com", "Hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, ContactError::Delivery(_)));
    }
}
