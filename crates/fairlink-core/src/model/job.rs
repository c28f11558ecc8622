// ── Job position domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;
use crate::error::CoreError;

/// An opening advertised at a booth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosition {
    pub id: EntityId,
    pub booth_id: EntityId,
    pub title: String,
    pub description: String,
    pub location: String,
    /// "Full-time", "Internship", "Contract", ...
    pub employment_type: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A job position with the owning booth's name resolved.
///
/// `booth_name` is `None` when the booth reference dangles; callers pick
/// their own fallback text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(flatten)]
    pub job: JobPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booth_name: Option<String>,
}

/// Insert payload for a new job position.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewJobPosition {
    pub booth_id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub employment_type: String,
}

impl NewJobPosition {
    pub(crate) fn validate(&self) -> Result<(), CoreError> {
        if self.booth_id.trim().is_empty() {
            return Err(CoreError::required("booth_id"));
        }
        if self.title.trim().is_empty() {
            return Err(CoreError::required("title"));
        }
        Ok(())
    }
}
