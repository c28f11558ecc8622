// ── Resource hooks ──
//
// The read surface every consumer calls. One generic family serves all
// six resource types: check the cache, otherwise ask the gateway, and
// fall back to the local snapshot when the store errors, is unconfigured,
// or answers with nothing. Hooks never branch on the backend mode; the
// injected gateway already embodies it.

mod applications;
mod events;
mod profiles;

use std::marker::PhantomData;
use std::sync::Arc;

use fairlink_api::{Filter, RemoteGateway, Select};
use tracing::{debug, warn};

use crate::cache::{QueryCache, QueryWatch};
use crate::error::CoreError;
use crate::model::{Booth, EntityId, JobListing};
use crate::resource::{QueryKey, Resource, ResourceType, Scope};
use crate::snapshot;

pub use applications::Applications;
pub use events::Events;
pub use profiles::Profiles;

/// Booth reads.
pub type Booths = ResourceHooks<Booth>;
/// Job reads, each with the owning booth's name resolved.
pub type Jobs = ResourceHooks<JobListing>;

/// Cached, fallback-aware reads for one resource type.
pub struct ResourceHooks<T> {
    gateway: Arc<dyn RemoteGateway>,
    cache: QueryCache,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceHooks<T> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            cache: self.cache.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Resource> ResourceHooks<T> {
    pub(crate) fn new(gateway: Arc<dyn RemoteGateway>, cache: QueryCache) -> Self {
        Self {
            gateway,
            cache,
            _marker: PhantomData,
        }
    }

    /// Key of the unscoped list.
    pub fn list_key() -> QueryKey {
        QueryKey::all(T::KIND)
    }

    /// Every row, most recent first (events: soonest first).
    pub async fn list(&self) -> Result<Arc<Vec<T>>, CoreError> {
        self.list_scoped(Scope::All).await
    }

    pub(crate) async fn list_scoped(&self, scope: Scope) -> Result<Arc<Vec<T>>, CoreError> {
        let key = QueryKey {
            resource: T::KIND,
            scope: scope.clone(),
        };
        let gateway = Arc::clone(&self.gateway);
        self.cache
            .ensure(key, move || load_list::<T>(gateway, scope))
            .await
    }

    /// One row by id. `None` short-circuits to `None` without touching the
    /// store or the cache.
    pub async fn by_id(&self, id: Option<&EntityId>) -> Result<Option<T>, CoreError> {
        let Some(id) = id else {
            return Ok(None);
        };
        let key = QueryKey::by_id(T::KIND, id.clone());
        let gateway = Arc::clone(&self.gateway);
        let id = id.clone();
        let found = self
            .cache
            .ensure(key, move || {
                let fallback_id = id.clone();
                load_single::<T, _>(gateway, Filter::eq("id", id.to_string()), move || {
                    snapshot::snapshot_by_id::<T>(&fallback_id)
                })
            })
            .await?;
        Ok((*found).clone())
    }

    /// Like `by_id`, but a missing row is a `NotFound` error.
    pub async fn get(&self, id: &EntityId) -> Result<T, CoreError> {
        self.by_id(Some(id))
            .await?
            .ok_or_else(|| CoreError::NotFound {
                resource: T::KIND.to_string(),
                identifier: id.to_string(),
            })
    }

    /// Follow the unscoped list entry.
    pub fn watch_list(&self) -> QueryWatch<Vec<T>> {
        self.cache.subscribe(Self::list_key())
    }

    /// Follow one by-id entry.
    pub fn watch_by_id(&self, id: &EntityId) -> QueryWatch<Option<T>> {
        self.cache.subscribe(QueryKey::by_id(T::KIND, id.clone()))
    }

    pub(crate) fn gateway(&self) -> &Arc<dyn RemoteGateway> {
        &self.gateway
    }

    pub(crate) fn cache(&self) -> &QueryCache {
        &self.cache
    }
}

// ── Loaders ──────────────────────────────────────────────────────────

fn list_query<T: Resource>(scope: &Scope) -> Select {
    let query = Select::from(T::KIND.table())
        .columns(T::COLUMNS)
        .order(T::ORDER);
    match (scope, T::OWNER_COLUMN) {
        (Scope::Owner(owner), Some(column)) => query.eq(column, owner.clone()),
        _ => query,
    }
}

fn decode_all<T: Resource>(rows: Vec<fairlink_api::Row>) -> Result<Vec<T>, CoreError> {
    rows.into_iter().map(T::from_row).collect()
}

/// Log why the store could not answer. Configuration absence is expected
/// in mock mode and only logged at debug.
fn note_fallback(resource: ResourceType, err: &fairlink_api::Error) {
    if matches!(err, fairlink_api::Error::NotConfigured) {
        debug!(%resource, "store not configured, serving snapshot");
    } else {
        warn!(%resource, error = %err, "store read failed, serving snapshot");
    }
}

pub(crate) async fn load_list<T: Resource>(
    gateway: Arc<dyn RemoteGateway>,
    scope: Scope,
) -> Result<Vec<T>, CoreError> {
    let query = list_query::<T>(&scope);
    match gateway.select(&query).await {
        Ok(rows) if rows.is_empty() => {
            debug!(resource = %T::KIND, "store returned no rows, serving snapshot");
        }
        Ok(rows) => match decode_all::<T>(rows) {
            Ok(items) => return Ok(items),
            Err(e) => warn!(resource = %T::KIND, error = %e, "store rows did not decode, serving snapshot"),
        },
        Err(e) => note_fallback(T::KIND, &e),
    }
    Ok(snapshot::snapshot_for::<T>())
}

pub(crate) async fn load_single<T, F>(
    gateway: Arc<dyn RemoteGateway>,
    filter: Filter,
    fallback: F,
) -> Result<Option<T>, CoreError>
where
    T: Resource,
    F: FnOnce() -> Option<T> + Send + 'static,
{
    let query = Select::from(T::KIND.table())
        .columns(T::COLUMNS)
        .filter(filter);
    match gateway.select_one(&query).await {
        Ok(Some(row)) => match T::from_row(row) {
            Ok(item) => return Ok(Some(item)),
            Err(e) => warn!(resource = %T::KIND, error = %e, "store row did not decode, serving snapshot"),
        },
        Ok(None) => debug!(resource = %T::KIND, "no row in store, checking snapshot"),
        Err(e) => note_fallback(T::KIND, &e),
    }
    Ok(fallback())
}
