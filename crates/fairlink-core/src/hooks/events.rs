// ── Event reads ──

use std::sync::Arc;

use crate::cache::QueryWatch;
use crate::error::CoreError;
use crate::model::{EntityId, Event, EventRegistration};

use super::ResourceHooks;

/// Event reads plus the registrations that link attendees to events.
#[derive(Clone)]
pub struct Events {
    events: ResourceHooks<Event>,
    registrations: ResourceHooks<EventRegistration>,
}

impl Events {
    pub(crate) fn new(
        events: ResourceHooks<Event>,
        registrations: ResourceHooks<EventRegistration>,
    ) -> Self {
        Self {
            events,
            registrations,
        }
    }

    /// Every event, soonest first.
    pub async fn list(&self) -> Result<Arc<Vec<Event>>, CoreError> {
        self.events.list().await
    }

    pub async fn by_id(&self, id: Option<&EntityId>) -> Result<Option<Event>, CoreError> {
        self.events.by_id(id).await
    }

    pub async fn get(&self, id: &EntityId) -> Result<Event, CoreError> {
        self.events.get(id).await
    }

    /// Every registration, keyed `(EventRegistration, all)`.
    pub async fn registrations(&self) -> Result<Arc<Vec<EventRegistration>>, CoreError> {
        self.registrations.list().await
    }

    /// Whether `user_id` is registered for `event_id`, per the cached
    /// registration list.
    pub async fn is_registered(&self, event_id: &EntityId, user_id: &str) -> Result<bool, CoreError> {
        let registrations = self.registrations().await?;
        Ok(registrations
            .iter()
            .any(|r| &r.event_id == event_id && r.user_id == user_id))
    }

    pub fn watch_list(&self) -> QueryWatch<Vec<Event>> {
        self.events.watch_list()
    }
}
