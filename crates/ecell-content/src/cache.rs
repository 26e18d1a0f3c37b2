//! Local persistent key-value cache
//!
//! Holds the last successfully fetched rows per collection as serialized
//! JSON, plus the admin session flags. Two backends:
//! - [`MemoryCacheStore`]: moka-backed, per process
//! - [`FileCacheStore`]: one file per key under a directory, survives restarts
//!
//! Entries never expire; they are overwritten by the next successful fetch.

use crate::error::CacheError;
use async_trait::async_trait;
use moka::future::Cache;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Key-value area the loader reads from and writes to
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read value for key
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Write value for key, replacing any previous value
    async fn set(&self, key: &str, value: String) -> Result<(), CacheError>;

    /// Remove key if present
    async fn remove(&self, key: &str) -> Result<(), CacheError>;
}

/// In-memory cache store using moka
///
/// The default store is unbounded, so snapshots and session flags stay until
/// overwritten or removed. A bounded store from [`MemoryCacheStore::new`]
/// evicts least-recently-used keys once full.
#[derive(Debug, Clone)]
pub struct MemoryCacheStore {
    inner: Cache<String, Arc<str>>,
}

impl MemoryCacheStore {
    /// Create store holding at most `max_capacity` keys
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Create store with no size limit
    #[inline]
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            inner: Cache::builder().build(),
        }
    }

    /// Get approximate entry count
    #[inline]
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.inner.get(key).await.map(|v| v.to_string()))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CacheError> {
        self.inner.insert(key.to_string(), Arc::from(value)).await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.inner.invalidate(key).await;
        Ok(())
    }
}

/// File-backed cache store, one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    root: PathBuf,
}

impl FileCacheStore {
    /// Create store rooted at directory (created lazily on first write)
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map key to file path
    ///
    /// Keys are restricted to ASCII alphanumerics, `_`, `-` and `.` (no
    /// leading dot) so they cannot escape the root.
    fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(CacheError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::io_error(key, e)),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| CacheError::io_error(key, e))?;

        // Replace atomically via rename
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| CacheError::io_error(key, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| CacheError::io_error(key, e))
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::io_error(key, e)),
        }
    }
}
