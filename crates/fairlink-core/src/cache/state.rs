// ── Cache entry state ──

use std::any::Any;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::CoreError;

/// Type-erased cached value. Each key always stores the same concrete type.
pub type CacheValue = Arc<dyn Any + Send + Sync>;

/// Lifecycle of a cached read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum QueryStatus {
    /// No value has been stored yet.
    #[default]
    Pending,
    Success,
    Error,
}

/// Everything the cache knows about one key.
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    pub status: QueryStatus,
    pub data: Option<CacheValue>,
    /// Failure of the most recent load. Previous data is kept alongside it.
    pub error: Option<CoreError>,
    pub fetched_at: Option<DateTime<Utc>>,
    /// A load is currently running for this key.
    pub fetching: bool,
    /// Invalidated since the data was loaded; the next read reloads.
    pub stale: bool,
}

impl QueryState {
    /// Whether a read can be answered without invoking the loader.
    pub fn is_fresh(&self) -> bool {
        self.status == QueryStatus::Success && !self.stale && self.data.is_some()
    }

    /// View the state with its data downcast to `T`.
    pub fn typed<T: Send + Sync + 'static>(&self) -> QuerySnapshot<T> {
        QuerySnapshot {
            status: self.status,
            data: self
                .data
                .clone()
                .and_then(|value| value.downcast::<T>().ok()),
            error: self.error.clone(),
            fetched_at: self.fetched_at,
            fetching: self.fetching,
            stale: self.stale,
        }
    }
}

/// Typed view of a `QueryState`.
#[derive(Debug)]
pub struct QuerySnapshot<T> {
    pub status: QueryStatus,
    pub data: Option<Arc<T>>,
    pub error: Option<CoreError>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub fetching: bool,
    pub stale: bool,
}

impl<T> Clone for QuerySnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
            fetched_at: self.fetched_at,
            fetching: self.fetching,
            stale: self.stale,
        }
    }
}
