//! Remote structured store seam
//!
//! The loader, the team directory and the admin console only ever talk to
//! the backend through [`RemoteStore`]. Implementations:
//! - [`MemoryStore`]: in-process tables, used by tests and offline runs
//! - `RestStore` in `ecell-backend`: PostgREST-style HTTP API

use crate::error::StoreError;
use crate::record::Collection;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

mod memory;

pub use memory::MemoryStore;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl Direction {
    /// Short form used in query strings
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Field ordering for a select
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderBy {
    /// Field name to sort on
    pub field: String,
    /// Sort direction
    pub direction: Direction,
}

impl OrderBy {
    /// Ascending order on field
    #[inline]
    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Ascending,
        }
    }

    /// Descending order on field
    #[inline]
    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Descending,
        }
    }
}

/// Equality filter on a single field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub value: String,
}

impl Filter {
    /// `field = value`
    #[inline]
    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// `id = value`
    #[inline]
    #[must_use]
    pub fn id(value: impl Into<String>) -> Self {
        Self::eq("id", value)
    }

    /// Check a JSON row against the filter
    ///
    /// Scalars compare by their text form so `"3"` matches both `"3"` and `3`.
    #[must_use]
    pub fn matches(&self, row: &Value) -> bool {
        match row.get(&self.field) {
            Some(Value::String(s)) => *s == self.value,
            Some(Value::Number(n)) => n.to_string() == self.value,
            Some(Value::Bool(b)) => b.to_string() == self.value,
            _ => false,
        }
    }
}

/// Read query: all rows of a collection, optionally filtered, ordered and capped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub collection: Collection,
    pub filters: Vec<Filter>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl SelectQuery {
    /// Select everything from collection
    #[inline]
    #[must_use]
    pub fn all(collection: Collection) -> Self {
        Self {
            collection,
            filters: Vec::new(),
            order_by: None,
            limit: None,
        }
    }

    /// Add equality filter
    #[inline]
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set ordering
    #[inline]
    #[must_use]
    pub fn order(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    /// Cap number of rows
    #[inline]
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Backend holding the site's collections
///
/// Rows are flat JSON objects with at least an `id` and a creation
/// timestamp. Write operations return the number of rows affected.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Read rows
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, StoreError>;

    /// Insert rows, returning them as stored (with generated ids)
    async fn insert(&self, collection: Collection, rows: Vec<Value>)
        -> Result<Vec<Value>, StoreError>;

    /// Merge `patch` into every row matching `filter`
    async fn update(
        &self,
        collection: Collection,
        filter: &Filter,
        patch: Value,
    ) -> Result<usize, StoreError>;

    /// Delete every row matching `filter`
    async fn delete(&self, collection: Collection, filter: &Filter) -> Result<usize, StoreError>;
}
