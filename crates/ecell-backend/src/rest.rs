//! PostgREST-style remote store
//!
//! Maps [`SelectQuery`] onto `GET /rest/v1/<table>` with PostgREST query
//! parameters (`field=eq.value`, `order=field.desc`, `limit=n`) and writes
//! onto `POST`/`PATCH`/`DELETE` with `Prefer: return=representation`, so
//! every write answers with the affected rows.

use crate::config::BackendConfig;
use crate::error::ConfigError;
use async_trait::async_trait;
use ecell_content::record::Collection;
use ecell_content::store::{Filter, RemoteStore, SelectQuery};
use ecell_content::StoreError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

/// Authenticated connection shared by the store and object storage clients
#[derive(Clone)]
pub(crate) struct Connection {
    client: reqwest::Client,
    base: Url,
}

impl Connection {
    pub(crate) fn new(config: &BackendConfig) -> Result<Self, ConfigError> {
        let base = Url::parse(&format!("{}/", config.url.trim_end_matches('/')))
            .map_err(|e| ConfigError::invalid("url", e.to_string()))?;

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| ConfigError::invalid("api_key", e.to_string()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| ConfigError::invalid("api_key", e.to_string()))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self { client, base })
    }

    pub(crate) fn url(&self, path: &str) -> Result<Url, StoreError> {
        self.base
            .join(path)
            .map_err(|e| StoreError::Transport(format!("invalid request path '{path}': {e}")))
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url)
    }

    pub(crate) fn base(&self) -> &Url {
        &self.base
    }
}

/// Send a request and turn non-2xx answers into [`StoreError::Status`]
pub(crate) async fn send(request: RequestBuilder) -> Result<Response, StoreError> {
    let response = request.send().await.map_err(transport_error)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::status(status.as_u16(), message))
}

fn transport_error(e: reqwest::Error) -> StoreError {
    if e.is_decode() {
        StoreError::Decode(e.to_string())
    } else {
        StoreError::Transport(e.to_string())
    }
}

async fn rows(response: Response) -> Result<Vec<Value>, StoreError> {
    response
        .json::<Vec<Value>>()
        .await
        .map_err(|e| StoreError::Decode(e.to_string()))
}

/// Remote store over the hosted REST API
#[derive(Clone)]
pub struct RestStore {
    conn: Connection,
}

impl std::fmt::Debug for RestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStore")
            .field("base", &self.conn.base().as_str())
            .finish_non_exhaustive()
    }
}

impl RestStore {
    /// Create store client
    pub fn new(config: &BackendConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            conn: Connection::new(config)?,
        })
    }

    fn table_url(&self, collection: Collection) -> Result<Url, StoreError> {
        self.conn.url(&format!("rest/v1/{}", collection.as_str()))
    }

    /// URL for a select, PostgREST syntax
    pub fn select_url(&self, query: &SelectQuery) -> Result<Url, StoreError> {
        let mut url = self.table_url(query.collection)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", "*");
            for filter in &query.filters {
                pairs.append_pair(&filter.field, &format!("eq.{}", filter.value));
            }
            if let Some(order) = &query.order_by {
                pairs.append_pair("order", &format!("{}.{}", order.field, order.direction.as_str()));
            }
            if let Some(limit) = query.limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }
        Ok(url)
    }

    fn filtered_url(&self, collection: Collection, filter: &Filter) -> Result<Url, StoreError> {
        let mut url = self.table_url(collection)?;
        url.query_pairs_mut()
            .append_pair(&filter.field, &format!("eq.{}", filter.value));
        Ok(url)
    }
}

#[async_trait]
impl RemoteStore for RestStore {
    #[instrument(skip(self), fields(collection = %query.collection))]
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, StoreError> {
        let url = self.select_url(query)?;
        debug!(%url, "select");
        rows(send(self.conn.request(Method::GET, url)).await?).await
    }

    #[instrument(skip(self, rows), fields(count = rows.len()))]
    async fn insert(
        &self,
        collection: Collection,
        rows: Vec<Value>,
    ) -> Result<Vec<Value>, StoreError> {
        let url = self.table_url(collection)?;
        let request = self
            .conn
            .request(Method::POST, url)
            .header("Prefer", "return=representation")
            .json(&rows);
        self::rows(send(request).await?).await
    }

    #[instrument(skip(self, patch))]
    async fn update(
        &self,
        collection: Collection,
        filter: &Filter,
        patch: Value,
    ) -> Result<usize, StoreError> {
        let url = self.filtered_url(collection, filter)?;
        let request = self
            .conn
            .request(Method::PATCH, url)
            .header("Prefer", "return=representation")
            .json(&patch);
        Ok(rows(send(request).await?).await?.len())
    }

    #[instrument(skip(self))]
    async fn delete(&self, collection: Collection, filter: &Filter) -> Result<usize, StoreError> {
        let url = self.filtered_url(collection, filter)?;
        let request = self
            .conn
            .request(Method::DELETE, url)
            .header("Prefer", "return=representation");
        Ok(rows(send(request).await?).await?.len())
    }
}
