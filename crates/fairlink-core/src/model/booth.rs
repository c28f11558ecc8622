// ── Booth domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;
use crate::error::CoreError;

/// An employer's presence at the fair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booth {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    /// Logo image URL.
    pub logo: String,
    pub cover_image: String,
    pub location: String,
    pub industry: String,
    /// Head-count bucket, e.g. "100-500".
    pub employee_count: String,
    /// Identity of the employer account that owns the booth.
    pub owner_id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert payload for a new booth.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewBooth {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub logo: String,
    pub cover_image: String,
    pub location: String,
    pub industry: String,
    pub employee_count: String,
    pub owner_id: String,
}

impl NewBooth {
    pub(crate) fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::required("name"));
        }
        if self.owner_id.trim().is_empty() {
            return Err(CoreError::required("owner_id"));
        }
        Ok(())
    }
}

/// Partial update for an existing booth. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BoothPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<String>,
}

impl BoothPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.logo.is_none()
            && self.cover_image.is_none()
            && self.location.is_none()
            && self.industry.is_none()
            && self.employee_count.is_none()
    }
}
