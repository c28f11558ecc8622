// ── Application reads ──
//
// Applications are read per owner: the list key is `(Application, owner)`
// and the store query filters on `user_id`. Snapshot fallback serves the
// full snapshot set, all of which belongs to the demo jobseeker.

use std::sync::Arc;

use crate::cache::QueryWatch;
use crate::error::CoreError;
use crate::model::{ApplicationListing, EntityId};
use crate::resource::{QueryKey, ResourceType, Scope};

use super::ResourceHooks;

#[derive(Clone)]
pub struct Applications {
    hooks: ResourceHooks<ApplicationListing>,
}

impl Applications {
    pub(crate) fn new(hooks: ResourceHooks<ApplicationListing>) -> Self {
        Self { hooks }
    }

    pub fn owner_key(user_id: &str) -> QueryKey {
        QueryKey::owned_by(ResourceType::Application, user_id)
    }

    /// The applications submitted by `user_id`, with job title and company
    /// resolved. No user means no applications; nothing is queried.
    pub async fn for_user(
        &self,
        user_id: Option<&str>,
    ) -> Result<Arc<Vec<ApplicationListing>>, CoreError> {
        match user_id.map(str::trim).filter(|u| !u.is_empty()) {
            Some(user) => self.hooks.list_scoped(Scope::Owner(user.to_owned())).await,
            None => Ok(Arc::new(Vec::new())),
        }
    }

    pub async fn by_id(&self, id: Option<&EntityId>) -> Result<Option<ApplicationListing>, CoreError> {
        self.hooks.by_id(id).await
    }

    pub async fn get(&self, id: &EntityId) -> Result<ApplicationListing, CoreError> {
        self.hooks.get(id).await
    }

    pub fn watch_for_user(&self, user_id: &str) -> QueryWatch<Vec<ApplicationListing>> {
        self.hooks.cache().subscribe(Self::owner_key(user_id))
    }
}
