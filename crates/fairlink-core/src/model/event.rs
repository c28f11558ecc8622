// ── Event domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// A scheduled fair event (workshop, panel, mixer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Whether the event has already finished at `now`.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.end_date < now
    }
}

/// Links an attendee to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRegistration {
    pub id: EntityId,
    pub event_id: EntityId,
    pub user_id: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for a registration.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct NewRegistration<'a> {
    pub event_id: &'a str,
    pub user_id: &'a str,
}
