//! Error types for the contact relay

use warp::http::StatusCode;

/// Errors handling a contact submission
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    /// A form field is empty
    #[error("All fields are required")]
    MissingFields,

    /// Request body is not a contact form
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Email API rejected the message
    #[error("email delivery failed: {0}")]
    Delivery(String),

    /// Email API unreachable
    #[error("email transport error: {0}")]
    Transport(String),
}

impl ContactError {
    /// HTTP status for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Delivery(_) | Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Errors loading [`ContactConfig`](crate::config::ContactConfig)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required variable absent or blank
    #[error("missing required setting {0}")]
    Missing(&'static str),

    /// HTTP client could not be built
    #[error("http client error: {0}")]
    Client(String),
}
