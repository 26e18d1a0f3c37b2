//! Object storage over the hosted storage API

use crate::config::BackendConfig;
use crate::error::ConfigError;
use crate::rest::{send, Connection};
use async_trait::async_trait;
use ecell_content::storage::ObjectStorage;
use ecell_content::{StorageError, StoreError};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use tracing::{info, instrument};

/// Uploads into one bucket; objects are public-read
#[derive(Clone)]
pub struct RestObjectStorage {
    conn: Connection,
    bucket: String,
}

impl std::fmt::Debug for RestObjectStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestObjectStorage")
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

impl RestObjectStorage {
    /// Create storage client for the configured bucket
    pub fn new(config: &BackendConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            conn: Connection::new(config)?,
            bucket: config.bucket.clone(),
        })
    }

    /// Public URL of an object
    pub fn public_url(&self, path: &str) -> Result<String, StoreError> {
        self.conn
            .url(&format!("storage/v1/object/public/{}/{path}", self.bucket))
            .map(String::from)
    }
}

#[async_trait]
impl ObjectStorage for RestObjectStorage {
    #[instrument(skip(self, bytes), fields(bucket = %self.bucket, size = bytes.len()))]
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let url = self
            .conn
            .url(&format!("storage/v1/object/{}/{path}", self.bucket))?;
        let request = self
            .conn
            .request(Method::POST, url)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes);

        match send(request).await {
            Ok(_) => {}
            Err(StoreError::Status { status: 409, .. }) => {
                return Err(StorageError::AlreadyExists(path.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        let public = self.public_url(path)?;
        info!(%public, "object uploaded");
        Ok(public)
    }
}
