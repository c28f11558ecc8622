// ── Profile reads ──
//
// A profile is 1:1 with an identity, so the common lookup is by owner:
// key `(Profile, owner)`, store query `user_id = owner`, snapshot
// fallback restricted to the profile with that `user_id`.

use std::sync::Arc;

use fairlink_api::Filter;

use crate::cache::QueryWatch;
use crate::error::CoreError;
use crate::model::{EntityId, Profile};
use crate::resource::{QueryKey, ResourceType};
use crate::snapshot;

use super::{ResourceHooks, load_single};

#[derive(Clone)]
pub struct Profiles {
    hooks: ResourceHooks<Profile>,
}

impl Profiles {
    pub(crate) fn new(hooks: ResourceHooks<Profile>) -> Self {
        Self { hooks }
    }

    pub fn owner_key(user_id: &str) -> QueryKey {
        QueryKey::owned_by(ResourceType::Profile, user_id)
    }

    /// The profile belonging to `user_id`. No user short-circuits to `None`
    /// without a store call or cache entry.
    pub async fn for_user(&self, user_id: Option<&str>) -> Result<Option<Profile>, CoreError> {
        let Some(user) = user_id.map(str::trim).filter(|u| !u.is_empty()) else {
            return Ok(None);
        };
        let gateway = Arc::clone(self.hooks.gateway());
        let owner = user.to_owned();
        let found = self
            .hooks
            .cache()
            .ensure(Self::owner_key(user), move || {
                let fallback_owner = owner.clone();
                load_single::<Profile, _>(gateway, Filter::eq("user_id", owner), move || {
                    snapshot::profiles()
                        .into_iter()
                        .find(|p| p.user_id == fallback_owner)
                })
            })
            .await?;
        Ok((*found).clone())
    }

    pub async fn by_id(&self, id: Option<&EntityId>) -> Result<Option<Profile>, CoreError> {
        self.hooks.by_id(id).await
    }

    pub fn watch_for_user(&self, user_id: &str) -> QueryWatch<Option<Profile>> {
        self.hooks.cache().subscribe(Self::owner_key(user_id))
    }
}
