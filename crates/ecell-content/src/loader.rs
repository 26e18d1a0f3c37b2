//! Resilient content loader
//!
//! Reads a collection for display with three tiers:
//!
//! ```text
//! remote store ──ok──▶ write cache ──▶ rows (fallback: none)
//!      │
//!    error
//!      ▼
//! local cache ──hit──▶ rows (fallback: cache, error suppressed)
//!      │
//!  miss / unparseable
//!      ▼
//! caller defaults ───▶ rows (fallback: default, error reported)
//! ```
//!
//! Loading never returns `Err`. The cache is written only after a
//! successful remote fetch, so a failure never clobbers the last good copy.

use crate::cache::CacheStore;
use crate::error::ContentError;
use crate::record::ContentRecord;
use crate::store::{Filter, OrderBy, RemoteStore, SelectQuery};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Which tier produced the rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackTier {
    /// Live rows from the remote store
    None,
    /// Last successful fetch, read from the local cache
    Cache,
    /// Caller-supplied defaults
    Default,
}

/// Result of a load
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadOutcome<R> {
    /// Rows to render
    pub rows: Vec<R>,
    /// Tier the rows came from
    pub used_fallback: FallbackTier,
    /// Failure message, set only when neither remote nor cache produced rows
    pub error: Option<String>,
}

impl<R> LoadOutcome<R> {
    /// Check if rows came from anywhere but the live store
    #[inline]
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.used_fallback != FallbackTier::None
    }
}

/// Per-call loader options
#[derive(Debug, Clone)]
pub struct LoadOptions<R> {
    /// Ordering; `None` uses the record's default ordering
    pub order_by: Option<OrderBy>,
    /// Rows returned when remote and cache both fail
    pub default_rows: Vec<R>,
    /// Equality filters
    pub filters: Vec<Filter>,
    /// Row cap
    pub limit: Option<usize>,
    /// Cache key; `None` uses the collection name
    pub cache_key: Option<String>,
}

impl<R: ContentRecord> LoadOptions<R> {
    /// Options with record defaults and no fallback rows
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            order_by: None,
            default_rows: Vec::new(),
            filters: Vec::new(),
            limit: None,
            cache_key: None,
        }
    }

    /// With ordering
    #[inline]
    #[must_use]
    pub fn with_order(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    /// With fallback dataset
    #[inline]
    #[must_use]
    pub fn with_defaults(mut self, rows: Vec<R>) -> Self {
        self.default_rows = rows;
        self
    }

    /// With equality filter
    #[inline]
    #[must_use]
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// With row cap
    #[inline]
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// With explicit cache key
    #[inline]
    #[must_use]
    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = Some(key.into());
        self
    }

    /// Effective cache key
    #[must_use]
    pub fn cache_key(&self) -> String {
        self.cache_key
            .clone()
            .unwrap_or_else(|| R::COLLECTION.as_str().to_string())
    }

    /// Query issued against the remote store
    #[must_use]
    pub fn query(&self) -> SelectQuery {
        SelectQuery {
            collection: R::COLLECTION,
            filters: self.filters.clone(),
            order_by: Some(self.order_by.clone().unwrap_or_else(R::default_order)),
            limit: self.limit,
        }
    }
}

impl<R: ContentRecord> Default for LoadOptions<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a collection with live → cache → default degradation
pub async fn load_collection<R: ContentRecord>(
    store: &dyn RemoteStore,
    cache: &dyn CacheStore,
    options: LoadOptions<R>,
) -> LoadOutcome<R> {
    let key = options.cache_key();
    let query = options.query();

    let remote_err = match fetch_remote::<R>(store, &query).await {
        Ok((rows, raw)) => {
            persist(cache, &key, &raw).await;
            info!(collection = %R::COLLECTION, rows = rows.len(), "loaded live rows");
            return LoadOutcome {
                rows,
                used_fallback: FallbackTier::None,
                error: None,
            };
        }
        Err(e) => e,
    };

    warn!(collection = %R::COLLECTION, error = %remote_err, "remote load failed, trying cache");

    match read_cache::<R>(cache, &key).await {
        Ok(rows) => {
            debug!(key = %key, rows = rows.len(), "serving cached rows");
            LoadOutcome {
                rows,
                used_fallback: FallbackTier::Cache,
                error: None,
            }
        }
        Err(cache_err) => {
            warn!(key = %key, error = %cache_err, "no usable cache, serving defaults");
            LoadOutcome {
                rows: options.default_rows,
                used_fallback: FallbackTier::Default,
                error: Some(remote_err.to_string()),
            }
        }
    }
}

async fn fetch_remote<R: ContentRecord>(
    store: &dyn RemoteStore,
    query: &SelectQuery,
) -> Result<(Vec<R>, Vec<Value>), ContentError> {
    debug!(collection = %query.collection, filters = query.filters.len(), "querying remote store");

    let raw = store
        .select(query)
        .await
        .map_err(|source| ContentError::RemoteQueryFailed {
            collection: query.collection,
            source,
        })?;

    let rows = raw
        .iter()
        .map(|row| serde_json::from_value::<R>(row.clone()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ContentError::parse_failure(format!("{} rows", query.collection), e.to_string()))?;

    Ok((rows, raw))
}

async fn read_cache<R: ContentRecord>(
    cache: &dyn CacheStore,
    key: &str,
) -> Result<Vec<R>, ContentError> {
    let content = cache
        .get(key)
        .await?
        .ok_or_else(|| ContentError::CacheUnavailable {
            key: key.to_string(),
        })?;

    serde_json::from_str(&content)
        .map_err(|e| ContentError::parse_failure(format!("cache entry '{key}'"), e.to_string()))
}

/// Write rows verbatim; a failed write only costs the next fallback
async fn persist(cache: &dyn CacheStore, key: &str, raw: &[Value]) {
    let json = match serde_json::to_string(raw) {
        Ok(json) => json,
        Err(e) => {
            warn!(key = %key, error = %e, "could not serialize rows for cache");
            return;
        }
    };
    if let Err(e) = cache.set(key, json).await {
        warn!(key = %key, error = %e, "cache write failed");
    }
}

/// Loader bound to a store and cache
#[derive(Clone)]
pub struct ContentLoader {
    store: Arc<dyn RemoteStore>,
    cache: Arc<dyn CacheStore>,
}

impl std::fmt::Debug for ContentLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentLoader").finish_non_exhaustive()
    }
}

impl ContentLoader {
    /// Create loader
    #[inline]
    #[must_use]
    pub fn new(store: Arc<dyn RemoteStore>, cache: Arc<dyn CacheStore>) -> Self {
        Self { store, cache }
    }

    /// Load a collection, see [`load_collection`]
    pub async fn load<R: ContentRecord>(&self, options: LoadOptions<R>) -> LoadOutcome<R> {
        load_collection(&*self.store, &*self.cache, options).await
    }

    /// Store reference
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Arc<dyn RemoteStore> {
        &self.store
    }

    /// Cache reference
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &Arc<dyn CacheStore> {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheStore;
    use crate::error::CacheError;
    use crate::record::{Collection, GalleryItem, TeamMember};
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn gallery_row(id: &str, date: &str) -> Value {
        json!({
            "id": id,
            "title": format!("Event {id}"),
            "description": "",
            "date": date,
            "image_url": "https://cdn.example/img.jpg"
        })
    }

    fn default_item() -> GalleryItem {
        GalleryItem {
            id: "default".to_string(),
            title: "Entrepreneurship Summit".to_string(),
            description: String::new(),
            date: "2023-10-15".to_string(),
            image_url: String::new(),
        }
    }

    /// Cache whose writes always fail
    struct ReadOnlyCache(MemoryCacheStore);

    #[async_trait]
    impl CacheStore for ReadOnlyCache {
        async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
            self.0.get(key).await
        }

        async fn set(&self, _key: &str, _value: String) -> Result<(), CacheError> {
            Err(CacheError::Internal("read only".to_string()))
        }

        async fn remove(&self, _key: &str) -> Result<(), CacheError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn success_writes_cache_with_exact_rows() {
        let store = MemoryStore::new()
            .with_rows(Collection::GalleryItems, vec![gallery_row("1", "2024-01-01")]);
        let cache = MemoryCacheStore::default();

        let outcome = load_collection::<GalleryItem>(&store, &cache, LoadOptions::new()).await;

        assert_eq!(outcome.used_fallback, FallbackTier::None);
        assert_eq!(outcome.error, None);
        assert_eq!(outcome.rows.len(), 1);

        let cached: Value =
            serde_json::from_str(&cache.get("gallery_items").await.unwrap().unwrap()).unwrap();
        assert_eq!(cached, json!([gallery_row("1", "2024-01-01")]));
    }

    #[tokio::test]
    async fn failure_after_success_serves_cache() {
        let store = MemoryStore::new()
            .with_rows(Collection::GalleryItems, vec![gallery_row("1", "2024-01-01")]);
        let cache = MemoryCacheStore::default();

        let live = load_collection::<GalleryItem>(&store, &cache, LoadOptions::new()).await;
        store.set_offline(true);
        let fallback = load_collection::<GalleryItem>(&store, &cache, LoadOptions::new()).await;

        assert_eq!(fallback.used_fallback, FallbackTier::Cache);
        assert_eq!(fallback.error, None);
        assert_eq!(fallback.rows, live.rows);
        assert!(fallback.is_degraded());
    }

    #[tokio::test]
    async fn failure_without_cache_serves_defaults_with_error() {
        let store = MemoryStore::new();
        store.set_offline(true);
        let cache = MemoryCacheStore::default();

        let outcome = load_collection(
            &store,
            &cache,
            LoadOptions::new().with_defaults(vec![default_item()]),
        )
        .await;

        assert_eq!(outcome.used_fallback, FallbackTier::Default);
        assert_eq!(outcome.rows, vec![default_item()]);
        let error = outcome.error.unwrap();
        assert!(error.contains("gallery_items"), "{error}");
    }

    #[tokio::test]
    async fn fallback_paths_never_write_cache() {
        let store = MemoryStore::new();
        store.set_offline(true);
        let cache = MemoryCacheStore::default();

        let _ = load_collection(
            &store,
            &cache,
            LoadOptions::new().with_defaults(vec![default_item()]),
        )
        .await;

        assert_eq!(cache.get("gallery_items").await.unwrap(), None);
    }

    #[tokio::test]
    async fn unparseable_cache_is_treated_as_missing() {
        let store = MemoryStore::new();
        store.set_offline(true);
        let cache = MemoryCacheStore::default();
        cache
            .set("gallery_items", "{not json".to_string())
            .await
            .unwrap();

        let outcome = load_collection::<GalleryItem>(&store, &cache, LoadOptions::new()).await;

        assert_eq!(outcome.used_fallback, FallbackTier::Default);
        assert!(outcome.rows.is_empty());
        assert!(outcome.error.is_some());
        // The corrupt entry is left alone
        assert_eq!(
            cache.get("gallery_items").await.unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[tokio::test]
    async fn rows_failing_schema_fall_back_and_keep_old_cache() {
        let store = MemoryStore::new()
            .with_rows(Collection::GalleryItems, vec![gallery_row("1", "2024-01-01")]);
        let cache = MemoryCacheStore::default();
        let _ = load_collection::<GalleryItem>(&store, &cache, LoadOptions::new()).await;

        store.seed(Collection::GalleryItems, vec![json!({"id": "2"})]);
        let outcome = load_collection::<GalleryItem>(&store, &cache, LoadOptions::new()).await;

        assert_eq!(outcome.used_fallback, FallbackTier::Cache);
        assert_eq!(outcome.rows[0].id, "1");
    }

    #[tokio::test]
    async fn cache_write_failure_still_returns_live_rows() {
        let store = MemoryStore::new()
            .with_rows(Collection::GalleryItems, vec![gallery_row("1", "2024-01-01")]);
        let cache = ReadOnlyCache(MemoryCacheStore::default());

        let outcome = load_collection::<GalleryItem>(&store, &cache, LoadOptions::new()).await;

        assert_eq!(outcome.used_fallback, FallbackTier::None);
        assert_eq!(outcome.rows.len(), 1);
    }

    #[tokio::test]
    async fn default_order_is_applied() {
        let store = MemoryStore::new().with_rows(
            Collection::GalleryItems,
            vec![
                gallery_row("old", "2022-01-01"),
                gallery_row("new", "2024-01-01"),
            ],
        );
        let cache = MemoryCacheStore::default();

        let outcome = load_collection::<GalleryItem>(&store, &cache, LoadOptions::new()).await;
        let ids: Vec<_> = outcome.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);

        let ascending = load_collection::<GalleryItem>(
            &store,
            &cache,
            LoadOptions::new().with_order(OrderBy::asc("date")),
        )
        .await;
        assert_eq!(ascending.rows[0].id, "old");
    }

    #[tokio::test]
    async fn custom_cache_key_isolates_filtered_loads() {
        let store = MemoryStore::new().with_rows(
            Collection::TeamMembers,
            vec![
                json!({"id": "a", "name": "A", "position": "President", "batch_year": "2024-25"}),
                json!({"id": "b", "name": "B", "position": "Volunteer", "batch_year": "2023-24"}),
            ],
        );
        let cache = MemoryCacheStore::default();

        let options = LoadOptions::<TeamMember>::new()
            .with_filter(Filter::eq("batch_year", "2024-25"))
            .with_cache_key("team_members.2024-25");
        assert_eq!(options.cache_key(), "team_members.2024-25");

        let outcome = load_collection(&store, &cache, options).await;
        assert_eq!(outcome.rows.len(), 1);
        assert!(cache.get("team_members.2024-25").await.unwrap().is_some());
        assert_eq!(cache.get("team_members").await.unwrap(), None);
    }

    #[tokio::test]
    async fn content_loader_delegates() {
        let store: Arc<dyn RemoteStore> = Arc::new(
            MemoryStore::new()
                .with_rows(Collection::GalleryItems, vec![gallery_row("1", "2024-01-01")]),
        );
        let loader = ContentLoader::new(store, Arc::new(MemoryCacheStore::default()));

        let outcome = loader.load::<GalleryItem>(LoadOptions::new().with_limit(5)).await;
        assert_eq!(outcome.rows.len(), 1);
        assert!(!outcome.is_degraded());
    }

    #[test]
    fn fallback_tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&FallbackTier::Cache).unwrap(), "\"cache\"");
        assert_eq!(serde_json::to_string(&FallbackTier::None).unwrap(), "\"none\"");
    }
}
