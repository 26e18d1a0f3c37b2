//! In-process remote store
//!
//! Keeps one JSON table per collection behind a `parking_lot` lock and can
//! be switched offline to exercise degraded paths.

use super::{Direction, Filter, RemoteStore, SelectQuery};
use crate::error::StoreError;
use crate::record::Collection;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

/// Store backed by in-memory tables
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<Collection, Vec<Value>>>,
    offline: RwLock<HashSet<Collection>>,
    all_offline: RwLock<bool>,
    selects: AtomicUsize,
}

impl MemoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: seed a collection
    #[must_use]
    pub fn with_rows(self, collection: Collection, rows: Vec<Value>) -> Self {
        self.seed(collection, rows);
        self
    }

    /// Replace a collection's rows
    pub fn seed(&self, collection: Collection, rows: Vec<Value>) {
        self.tables.write().insert(collection, rows);
    }

    /// Snapshot of a collection
    #[must_use]
    pub fn rows(&self, collection: Collection) -> Vec<Value> {
        self.tables
            .read()
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Make every call fail (or succeed again)
    pub fn set_offline(&self, offline: bool) {
        *self.all_offline.write() = offline;
    }

    /// Make calls for a single collection fail (or succeed again)
    pub fn set_collection_offline(&self, collection: Collection, offline: bool) {
        let mut guard = self.offline.write();
        if offline {
            guard.insert(collection);
        } else {
            guard.remove(&collection);
        }
    }

    /// Number of select calls served or refused
    #[must_use]
    pub fn select_count(&self) -> usize {
        self.selects.load(AtomicOrdering::SeqCst)
    }

    fn check_online(&self, collection: Collection) -> Result<(), StoreError> {
        if *self.all_offline.read() || self.offline.read().contains(&collection) {
            return Err(StoreError::Unavailable(format!(
                "{collection} is offline"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, StoreError> {
        self.selects.fetch_add(1, AtomicOrdering::SeqCst);
        self.check_online(query.collection)?;

        let mut rows: Vec<Value> = self
            .tables
            .read()
            .get(&query.collection)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| f.matches(row)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order_by {
            rows.sort_by(|a, b| {
                let ord = compare_fields(a.get(&order.field), b.get(&order.field));
                match order.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }

        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        Ok(rows)
    }

    async fn insert(
        &self,
        collection: Collection,
        rows: Vec<Value>,
    ) -> Result<Vec<Value>, StoreError> {
        self.check_online(collection)?;

        let mut stored = Vec::with_capacity(rows.len());
        for row in rows {
            let Value::Object(mut map) = row else {
                return Err(StoreError::status(400, "rows must be JSON objects"));
            };
            fill_generated(&mut map);
            stored.push(Value::Object(map));
        }

        self.tables
            .write()
            .entry(collection)
            .or_default()
            .extend(stored.iter().cloned());

        Ok(stored)
    }

    async fn update(
        &self,
        collection: Collection,
        filter: &Filter,
        patch: Value,
    ) -> Result<usize, StoreError> {
        self.check_online(collection)?;

        let Value::Object(patch) = patch else {
            return Err(StoreError::status(400, "patch must be a JSON object"));
        };

        let mut tables = self.tables.write();
        let mut updated = 0;
        for row in tables.entry(collection).or_default().iter_mut() {
            if !filter.matches(row) {
                continue;
            }
            if let Value::Object(map) = row {
                for (key, value) in &patch {
                    map.insert(key.clone(), value.clone());
                }
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn delete(&self, collection: Collection, filter: &Filter) -> Result<usize, StoreError> {
        self.check_online(collection)?;

        let mut tables = self.tables.write();
        let table = tables.entry(collection).or_default();
        let before = table.len();
        table.retain(|row| !filter.matches(row));
        Ok(before - table.len())
    }
}

/// Assign `id` and `created_at` the way the hosted store does on insert
fn fill_generated(map: &mut Map<String, Value>) {
    if map.get("id").map_or(true, Value::is_null) {
        map.insert(
            "id".to_string(),
            Value::String(uuid::Uuid::new_v4().to_string()),
        );
    }
    if map.get("created_at").map_or(true, Value::is_null) {
        map.insert(
            "created_at".to_string(),
            Value::String(chrono::Utc::now().to_rfc3339()),
        );
    }
}

/// Order two optional field values; missing/null sort before present ones
fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}
