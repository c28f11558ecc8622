// ── Query cache ──
//
// Process-wide map from `QueryKey` to the latest result of that read.
// Concurrent readers of one key share a single in-flight load; the load
// runs on a spawned task, so a reader that gives up does not cancel it
// and the result is still stored for the next reader. Invalidation only
// marks entries stale; the reload happens on the next read.

mod state;
mod watch;

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::resource::{QueryKey, ResourceType, Scope};

pub use state::{CacheValue, QuerySnapshot, QueryState, QueryStatus};
pub use watch::{QueryWatch, QueryWatchStream};

type LoadResult = Result<CacheValue, CoreError>;
type SharedLoad = Shared<BoxFuture<'static, LoadResult>>;

struct Entry {
    state: tokio::sync::watch::Sender<QueryState>,
    inflight: Option<SharedLoad>,
}

impl Entry {
    fn new() -> Self {
        let (state, _) = tokio::sync::watch::channel(QueryState::default());
        Self {
            state,
            inflight: None,
        }
    }
}

enum Lookup {
    Hit(CacheValue),
    Load(SharedLoad),
}

/// Which entries an invalidation marks stale.
#[derive(Debug, Clone)]
pub enum Invalidation {
    /// Exactly one key.
    Key(QueryKey),
    /// Every key of a resource type, whatever its scope.
    Resource(ResourceType),
    /// Every owner-scoped key of a resource type.
    OwnerScoped(ResourceType),
    /// Any key the predicate accepts.
    Matching(fn(&QueryKey) -> bool),
}

impl Invalidation {
    pub fn matches(&self, key: &QueryKey) -> bool {
        match self {
            Self::Key(target) => target == key,
            Self::Resource(resource) => key.resource == *resource,
            Self::OwnerScoped(resource) => {
                key.resource == *resource && matches!(key.scope, Scope::Owner(_))
            }
            Self::Matching(predicate) => predicate(key),
        }
    }
}

impl From<QueryKey> for Invalidation {
    fn from(key: QueryKey) -> Self {
        Self::Key(key)
    }
}

/// Shared cache of query results. Cheap to clone.
#[derive(Clone, Default)]
pub struct QueryCache {
    entries: Arc<DashMap<QueryKey, Entry>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `key`, if it has ever been read or subscribed to.
    pub fn get(&self, key: &QueryKey) -> Option<QueryState> {
        self.entries.get(key).map(|entry| entry.state.borrow().clone())
    }

    /// Cached data for `key`, if any, downcast to `T`.
    pub fn data<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        self.get(key).and_then(|state| state.typed::<T>().data)
    }

    /// Return the cached value for `key`, loading it if needed.
    ///
    /// A fresh successful entry is returned without calling `loader`. If a
    /// load is already running, the caller joins it. Otherwise `loader` is
    /// invoked once and its future spawned onto the runtime. Must be called
    /// from within a Tokio runtime.
    pub async fn ensure<T, F, Fut>(&self, key: QueryKey, loader: F) -> Result<Arc<T>, CoreError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
    {
        let value = match self.join_or_start(&key, loader) {
            Lookup::Hit(value) => value,
            Lookup::Load(load) => load.await?,
        };
        value.downcast::<T>().map_err(|_| {
            CoreError::Internal(format!("cached value for {key} has an unexpected type"))
        })
    }

    fn join_or_start<T, F, Fut>(&self, key: &QueryKey, loader: F) -> Lookup
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
    {
        let mut entry = self.entries.entry(key.clone()).or_insert_with(Entry::new);

        if let Some(load) = &entry.inflight {
            debug!(%key, "joining in-flight load");
            return Lookup::Load(load.clone());
        }

        {
            let state = entry.state.borrow();
            if let Some(data) = state.data.clone().filter(|_| state.is_fresh()) {
                debug!(%key, "cache hit");
                return Lookup::Hit(data);
            }
        }

        debug!(%key, "cache miss, starting load");
        let load = self.spawn_load(key.clone(), loader());
        entry.inflight = Some(load.clone());
        entry.state.send_modify(|state| {
            state.fetching = true;
            state.stale = false;
        });
        Lookup::Load(load)
    }

    fn spawn_load<T, Fut>(&self, key: QueryKey, fut: Fut) -> SharedLoad
    where
        T: Send + Sync + 'static,
        Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
    {
        let cache = self.clone();
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            let result = fut.await.map(|value| Arc::new(value) as CacheValue);
            cache.complete(&task_key, &result);
            result
        });

        let cache = self.clone();
        async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => {
                    let result = Err(CoreError::Internal(format!("load for {key} failed: {e}")));
                    cache.complete(&key, &result);
                    result
                }
            }
        }
        .boxed()
        .shared()
    }

    fn complete(&self, key: &QueryKey, result: &LoadResult) {
        let Some(mut entry) = self.entries.get_mut(key) else {
            return;
        };
        if entry.inflight.take().is_none() {
            return;
        }

        let now = Utc::now();
        entry.state.send_modify(|state| {
            state.fetching = false;
            state.fetched_at = Some(now);
            match result {
                Ok(value) => {
                    state.status = QueryStatus::Success;
                    state.data = Some(Arc::clone(value));
                    state.error = None;
                }
                Err(err) => {
                    state.status = QueryStatus::Error;
                    state.error = Some(err.clone());
                }
            }
        });

        if let Err(err) = result {
            warn!(%key, error = %err, "query load failed");
        } else if entry.state.borrow().stale {
            debug!(%key, "load finished after invalidation, result is stale");
        } else {
            debug!(%key, "load finished");
        }
    }

    /// Mark every matching entry stale. Returns how many were marked.
    ///
    /// Nothing is reloaded here; the next read of each entry reloads it.
    pub fn invalidate(&self, target: impl Into<Invalidation>) -> usize {
        let target = target.into();
        let mut marked = 0;
        for entry in self.entries.iter() {
            if target.matches(entry.key()) {
                entry.state.send_modify(|state| state.stale = true);
                marked += 1;
            }
        }
        debug!(?target, marked, "invalidated cache entries");
        marked
    }

    /// Follow changes to `key`. The entry is created if it does not exist.
    pub fn subscribe<T: Send + Sync + 'static>(&self, key: QueryKey) -> QueryWatch<T> {
        let entry = self.entries.entry(key).or_insert_with(Entry::new);
        QueryWatch::new(entry.state.subscribe())
    }

    /// Number of live subscriptions on `key`.
    pub fn subscriber_count(&self, key: &QueryKey) -> usize {
        self.entries
            .get(key)
            .map_or(0, |entry| entry.state.receiver_count())
    }
}
