//! Object storage for uploaded images and attachments

use crate::error::StorageError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Bucket-style blob storage returning public URLs
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store bytes at `path`; existing objects are never overwritten
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<String, StorageError>;
}

/// Collision-free object path: `<folder>/<prefix>_<uuid>.<ext>`
///
/// The extension is taken from `original_name`, lowercased; names without
/// one produce a path without an extension.
#[must_use]
pub fn upload_path(folder: &str, prefix: &str, original_name: &str) -> String {
    let folder = folder.trim_matches('/');
    let stem = format!("{prefix}_{}", uuid::Uuid::new_v4());
    let file = match Path::new(original_name).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{stem}.{}", ext.to_lowercase()),
        _ => stem,
    };

    if folder.is_empty() {
        file
    } else {
        format!("{folder}/{file}")
    }
}

/// In-memory storage, URLs are `<base_url>/<path>`
#[derive(Debug)]
pub struct MemoryObjectStorage {
    base_url: String,
    objects: RwLock<HashMap<String, StoredObject>>,
}

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

impl MemoryObjectStorage {
    /// Create storage serving from `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Stored bytes and content type
    #[must_use]
    pub fn get(&self, path: &str) -> Option<(Vec<u8>, String)> {
        self.objects
            .read()
            .get(path)
            .map(|o| (o.bytes.clone(), o.content_type.clone()))
    }

    /// Number of stored objects
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let mut objects = self.objects.write();
        if objects.contains_key(path) {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }

        let size = bytes.len();
        objects.insert(
            path.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        info!(path, size, "object stored");
        Ok(format!("{}/{path}", self.base_url))
    }
}
