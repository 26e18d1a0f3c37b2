//! Contact form payload and the two emails it produces

use crate::config::ContactConfig;
use crate::error::ContactError;
use serde::{Deserialize, Serialize};

/// Submitted form; absent fields decode as empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// Create form
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Reject forms with any blank field
    pub fn validate(&self) -> Result<(), ContactError> {
        let blank = [&self.name, &self.email, &self.message]
            .iter()
            .any(|field| field.trim().is_empty());
        if blank {
            return Err(ContactError::MissingFields);
        }
        Ok(())
    }
}

/// Message handed to an [`EmailTransport`](crate::transport::EmailTransport)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Notification for the site inbox
#[must_use]
pub fn admin_notification(form: &ContactForm, config: &ContactConfig) -> OutgoingEmail {
    let name = escape_html(form.name.trim());
    let email = escape_html(form.email.trim());
    OutgoingEmail {
        from: config.admin_sender.clone(),
        to: vec![config.admin_address.clone()],
        subject: format!("New Contact Form Message from {}", form.name.trim()),
        html: format!(
            "<h1>New Contact Form Submission</h1>\
             <p><strong>Name:</strong> {name}</p>\
             <p><strong>Email:</strong> {email}</p>\
             <p><strong>Message:</strong></p>\
             <p>{}</p>",
            render_message(&form.message)
        ),
    }
}

/// Confirmation for the person who wrote in
#[must_use]
pub fn user_confirmation(form: &ContactForm, config: &ContactConfig) -> OutgoingEmail {
    let name = escape_html(form.name.trim());
    OutgoingEmail {
        from: config.user_sender.clone(),
        to: vec![form.email.trim().to_string()],
        subject: "Thank you for contacting us!".to_string(),
        html: format!(
            "<h1>Thank you for reaching out!</h1>\
             <p>Dear {name},</p>\
             <p>We have received your message and will get back to you as soon as possible.</p>\
             <p>Your message:</p>\
             <blockquote>{}</blockquote>\
             <p>Best regards,<br>E-Cell Team</p>",
            render_message(&form.message)
        ),
    }
}

/// Escape text for HTML, then turn line breaks into `<br>`
fn render_message(message: &str) -> String {
    escape_html(message).replace("\r\n", "\n").replace('\n', "<br>")
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> ContactConfig {
        ContactConfig::new("re_test", "team@ecell.example")
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert_eq!(ContactForm::new("", "a@b.c", "hi").validate(), Err(ContactError::MissingFields));
        assert_eq!(ContactForm::new("Asha", "  ", "hi").validate(), Err(ContactError::MissingFields));
        assert_eq!(ContactForm::new("Asha", "a@b.c", "\n").validate(), Err(ContactError::MissingFields));
        assert_eq!(ContactForm::new("Asha", "a@b.c", "hi").validate(), Ok(()));
    }

    #[test]
    fn absent_fields_decode_as_empty() {
        let form: ContactForm = serde_json::from_str(r#"{"name":"Asha"}"#).unwrap();
        assert_eq!(form.email, "");
        assert!(form.validate().is_err());
    }

    #[test]
    fn admin_email_shape() {
        let form = ContactForm::new("Asha", "asha@example.com", "Line one\nLine two");
        let email = admin_notification(&form, &config());

        assert_eq!(email.subject, "New Contact Form Message from Asha");
        assert_eq!(email.to, vec!["team@ecell.example".to_string()]);
        assert_eq!(email.from, "E-Cell Contact Form <onboarding@resend.dev>");
        assert!(email.html.contains("<p>Line one<br>Line two</p>"));
        assert!(email.html.contains("asha@example.com"));
    }

    #[test]
    fn user_email_shape() {
        let form = ContactForm::new("Asha", " asha@example.com ", "Hello");
        let email = user_confirmation(&form, &config());

        assert_eq!(email.subject, "Thank you for contacting us!");
        assert_eq!(email.to, vec!["asha@example.com".to_string()]);
        assert!(email.html.contains("<blockquote>Hello</blockquote>"));
        assert!(email.html.contains("Dear Asha,"));
    }

    #[test]
    fn user_text_is_escaped() {
        let form = ContactForm::new("<b>x</b>", "a@b.c", "<script>alert('hi')</script>\r\nbye");
        let email = admin_notification(&form, &config());

        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("&lt;script&gt;alert(&#39;hi&#39;)&lt;/script&gt;<br>bye"));
        assert!(email.html.contains("&lt;b&gt;x&lt;/b&gt;"));
    }
}
