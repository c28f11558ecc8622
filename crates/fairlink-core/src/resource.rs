// ── Resource identity ──
//
// Every cached read is addressed by a `QueryKey`: the resource type plus a
// scope (the whole collection, one id, or one owner's rows). The
// `Resource` trait ties each entity type to its table, column selection,
// ordering, row decoding, and snapshot set so the generic hooks can load
// any of them the same way.

use std::fmt;

use fairlink_api::{Order, Row};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::{Display, EnumIter};

use crate::error::CoreError;
use crate::model::{
    ApplicationListing, Booth, EntityId, Event, EventRegistration, JobListing, Profile,
};
use crate::relation::{ApplicationRow, JobRow};
use crate::snapshot;

/// One of the six entity kinds the layer serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResourceType {
    Booth,
    JobPosition,
    Application,
    Profile,
    Event,
    EventRegistration,
}

impl ResourceType {
    /// Store table backing this resource.
    pub const fn table(self) -> &'static str {
        match self {
            Self::Booth => "booths",
            Self::JobPosition => "job_positions",
            Self::Application => "applications",
            Self::Profile => "profiles",
            Self::Event => "events",
            Self::EventRegistration => "event_registrations",
        }
    }
}

/// Which slice of a resource a cached read covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    All,
    Id(EntityId),
    Owner(String),
}

/// Identity of one cached read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: ResourceType,
    pub scope: Scope,
}

impl QueryKey {
    pub fn all(resource: ResourceType) -> Self {
        Self {
            resource,
            scope: Scope::All,
        }
    }

    pub fn by_id(resource: ResourceType, id: impl Into<EntityId>) -> Self {
        Self {
            resource,
            scope: Scope::Id(id.into()),
        }
    }

    /// Owner ids are trimmed so reads and writes agree on the key.
    pub fn owned_by(resource: ResourceType, owner: impl Into<String>) -> Self {
        let owner: String = owner.into();
        Self {
            resource,
            scope: Scope::Owner(owner.trim().to_owned()),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Scope::All => write!(f, "{}/all", self.resource),
            Scope::Id(id) => write!(f, "{}/id:{id}", self.resource),
            Scope::Owner(owner) => write!(f, "{}/owner:{owner}", self.resource),
        }
    }
}

// ── Resource trait ───────────────────────────────────────────────────

/// An entity type the hooks can load, cache, and fall back for.
pub trait Resource: Clone + Send + Sync + 'static {
    const KIND: ResourceType;
    /// Column selection, including any embedded lookups.
    const COLUMNS: &'static str = "*";
    /// Recency ordering for list reads.
    const ORDER: Order = Order::desc("created_at");
    /// Column holding the owning identity, for owner-scoped reads.
    const OWNER_COLUMN: Option<&'static str> = None;

    fn id(&self) -> &EntityId;

    /// Decode one store row (with embedded lookups) into this type.
    fn from_row(row: Row) -> Result<Self, CoreError>;

    /// The snapshot set served when the store cannot answer.
    fn snapshot() -> Vec<Self>;
}

/// Plain serde decode of a row.
pub(crate) fn decode_row<T: DeserializeOwned>(
    resource: ResourceType,
    row: Row,
) -> Result<T, CoreError> {
    serde_json::from_value(Value::Object(row))
        .map_err(|e| CoreError::decode(format!("unexpected {resource} row: {e}")))
}

impl Resource for Booth {
    const KIND: ResourceType = ResourceType::Booth;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_row(row: Row) -> Result<Self, CoreError> {
        decode_row(Self::KIND, row)
    }

    fn snapshot() -> Vec<Self> {
        snapshot::booths()
    }
}

impl Resource for JobListing {
    const KIND: ResourceType = ResourceType::JobPosition;
    const COLUMNS: &'static str = "*, booths:booth_id (name)";

    fn id(&self) -> &EntityId {
        &self.job.id
    }

    fn from_row(row: Row) -> Result<Self, CoreError> {
        decode_row::<JobRow>(Self::KIND, row).map(JobRow::into_listing)
    }

    fn snapshot() -> Vec<Self> {
        snapshot::jobs()
    }
}

impl Resource for ApplicationListing {
    const KIND: ResourceType = ResourceType::Application;
    const COLUMNS: &'static str =
        "*, job_positions:job_position_id (title, booth_id, booths:booth_id (name))";
    const OWNER_COLUMN: Option<&'static str> = Some("user_id");

    fn id(&self) -> &EntityId {
        &self.application.id
    }

    fn from_row(row: Row) -> Result<Self, CoreError> {
        decode_row::<ApplicationRow>(Self::KIND, row).map(ApplicationRow::into_listing)
    }

    fn snapshot() -> Vec<Self> {
        snapshot::application_listings()
    }
}

impl Resource for Profile {
    const KIND: ResourceType = ResourceType::Profile;
    const OWNER_COLUMN: Option<&'static str> = Some("user_id");

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_row(row: Row) -> Result<Self, CoreError> {
        decode_row(Self::KIND, row)
    }

    fn snapshot() -> Vec<Self> {
        snapshot::profiles()
    }
}

impl Resource for Event {
    const KIND: ResourceType = ResourceType::Event;
    const ORDER: Order = Order::asc("start_date");

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_row(row: Row) -> Result<Self, CoreError> {
        decode_row(Self::KIND, row)
    }

    fn snapshot() -> Vec<Self> {
        snapshot::events()
    }
}

impl Resource for EventRegistration {
    const KIND: ResourceType = ResourceType::EventRegistration;
    const OWNER_COLUMN: Option<&'static str> = Some("user_id");

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_row(row: Row) -> Result<Self, CoreError> {
        decode_row(Self::KIND, row)
    }

    fn snapshot() -> Vec<Self> {
        snapshot::event_registrations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn keys_display_their_scope() {
        assert_eq!(QueryKey::all(ResourceType::Booth).to_string(), "booth/all");
        assert_eq!(
            QueryKey::by_id(ResourceType::JobPosition, "7").to_string(),
            "job_position/id:7"
        );
        assert_eq!(
            QueryKey::owned_by(ResourceType::Application, "u1").to_string(),
            "application/owner:u1"
        );
    }

    #[test]
    fn keys_with_different_scopes_differ() {
        assert_ne!(
            QueryKey::all(ResourceType::JobPosition),
            QueryKey::all(ResourceType::Booth)
        );
        assert_ne!(
            QueryKey::by_id(ResourceType::Booth, "1"),
            QueryKey::owned_by(ResourceType::Booth, "1")
        );
    }

    #[test]
    fn owner_keys_ignore_surrounding_whitespace() {
        assert_eq!(
            QueryKey::owned_by(ResourceType::Profile, " u1 "),
            QueryKey::owned_by(ResourceType::Profile, "u1")
        );
    }

    #[test]
    fn every_resource_has_a_table() {
        for resource in ResourceType::iter() {
            assert!(!resource.table().is_empty());
        }
    }
}
