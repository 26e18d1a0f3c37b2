//! E-Cell hosted backend client
//!
//! HTTP implementations of the content layer's seams:
//!
//! - [`RestStore`]: [`RemoteStore`](ecell_content::RemoteStore) over the
//!   PostgREST-style table API
//! - [`RestObjectStorage`]: [`ObjectStorage`](ecell_content::ObjectStorage)
//!   over the storage API
//! - [`BackendConfig`]: connection settings from the environment or TOML

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod objects;
pub mod rest;

pub use config::BackendConfig;
pub use error::ConfigError;
pub use objects::RestObjectStorage;
pub use rest::RestStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
