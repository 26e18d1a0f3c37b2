//! E-Cell contact form relay
//!
//! Receives contact form submissions over HTTP and relays them as two
//! emails: a notification to the site inbox and a confirmation to the
//! sender.
//!
//! ```text
//! POST / {name, email, message}
//!   └─ validate ──▶ admin notification ──▶ user confirmation ──▶ 200
//!        │                  │                     │
//!       400                500                   500
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod form;
pub mod relay;
pub mod server;
pub mod transport;

pub use config::ContactConfig;
pub use error::{ConfigError, ContactError};
pub use form::{ContactForm, OutgoingEmail};
pub use relay::{ContactRelay, ContactResponse};
pub use transport::{DeliveryReceipt, EmailTransport, ResendTransport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
