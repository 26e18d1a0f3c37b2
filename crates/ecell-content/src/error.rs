//! Error types for content loading
//!
//! Provides error handling for:
//! - Remote store queries and writes
//! - Local cache reads and writes
//! - The loader's degradation taxonomy (remote failure, cache miss, parse failure)
//! - Roster construction, admin console and admin gate operations

use crate::record::Collection;

/// Errors raised by a remote structured store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Network-level failure (connect, timeout, TLS)
    #[error("transport error: {0}")]
    Transport(String),

    /// Store answered with a non-success status
    #[error("store returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be decoded
    #[error("decode error: {0}")]
    Decode(String),

    /// Store is not reachable at all (used by in-process stores)
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Create status error
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }
}

/// Errors during local cache operations
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Key cannot be mapped onto the backing storage
    #[error("invalid cache key: '{0}'")]
    InvalidKey(String),

    /// IO error on a file-backed cache
    #[error("io error for cache key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Internal cache error
    #[error("cache error: {0}")]
    Internal(String),
}

impl CacheError {
    /// Create IO error for key
    pub fn io_error(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            key: key.into(),
            source,
        }
    }
}

/// Why a load did not come from the live store
///
/// None of these escape `load_collection` as an `Err`; they are logged and
/// rendered into the outcome's `error` field when no cached copy exists.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Query against the remote store failed
    #[error("error fetching {collection}: {source}")]
    RemoteQueryFailed {
        collection: Collection,
        #[source]
        source: StoreError,
    },

    /// No prior successful fetch was cached under the key
    #[error("no cached copy for '{key}'")]
    CacheUnavailable { key: String },

    /// Cached JSON or a remote row did not match the record schema
    #[error("parse failure in {context}: {message}")]
    ParseFailure { context: String, message: String },

    /// Cache backend failed
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
}

impl ContentError {
    /// Create parse failure
    pub fn parse_failure(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseFailure {
            context: context.into(),
            message: message.into(),
        }
    }
}

/// Errors constructing a roster entry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    /// Name is blank after trimming
    #[error("roster entry has an empty name")]
    EmptyName,

    /// Title is blank after trimming
    #[error("roster entry '{0}' has an empty title")]
    EmptyTitle(String),
}

/// Errors from admin console writes
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// Underlying store call failed
    #[error("{action} failed: {source}")]
    Store {
        action: &'static str,
        #[source]
        source: StoreError,
    },

    /// Record could not be converted to or from JSON
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Store accepted an insert but returned no row
    #[error("{0} returned no row")]
    MissingRow(&'static str),
}

impl AdminError {
    /// Wrap store error with the action that failed
    pub fn store(action: &'static str, source: StoreError) -> Self {
        Self::Store { action, source }
    }
}

/// Errors from the admin gate
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Credentials table could not be read or written
    #[error("failed to connect to the database: {0}")]
    Store(#[from] StoreError),

    /// Credentials table is empty
    #[error("no admin accounts found")]
    NoAccounts,

    /// Username/password pair did not match
    #[error("incorrect username or password")]
    InvalidCredentials,

    /// Operation requires a logged-in admin
    #[error("not logged in")]
    NotAuthenticated,

    /// Credential change carried no new values
    #[error("no new values to update")]
    NothingToUpdate,

    /// Session storage failed
    #[error("session error: {0}")]
    Session(#[from] CacheError),
}

/// Errors from object storage uploads
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Object already exists and overwrite is disabled
    #[error("object already exists: {0}")]
    AlreadyExists(String),

    /// Upload rejected or failed in transit
    #[error("upload failed: {0}")]
    Upload(#[from] StoreError),
}
