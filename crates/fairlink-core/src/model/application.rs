// ── Application domain types ──

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::EntityId;
use crate::error::CoreError;

/// Review status of an application.
///
/// Any status may be written at any time; transitions are not enforced.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewing,
    Accepted,
    Rejected,
}

/// A job seeker's application to one job position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: EntityId,
    pub job_position_id: EntityId,
    pub user_id: String,
    pub status: ApplicationStatus,
    pub resume_url: Option<String>,
    pub cover_letter: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// An application with the job title and company name resolved through
/// its job position and that position's booth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationListing {
    #[serde(flatten)]
    pub application: Application,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// Insert payload for a new application.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewApplication {
    pub job_position_id: String,
    pub user_id: String,
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
}

impl NewApplication {
    pub(crate) fn validate(&self) -> Result<(), CoreError> {
        if self.job_position_id.trim().is_empty() {
            return Err(CoreError::required("job_position_id"));
        }
        if self.user_id.trim().is_empty() {
            return Err(CoreError::required("user_id"));
        }
        Ok(())
    }
}

/// A resume file to store in the blob bucket.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    /// Original file name; only its extension is kept.
    pub file_name: String,
    pub bytes: Bytes,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Lowercased extension of the file name, if it has one.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    pub(crate) fn validate(&self) -> Result<(), CoreError> {
        if self.file_name.trim().is_empty() {
            return Err(CoreError::required("file_name"));
        }
        if self.bytes.is_empty() {
            return Err(CoreError::Validation {
                field: "file".into(),
                reason: "is empty".into(),
            });
        }
        Ok(())
    }
}

/// Everything needed to apply for a job in one call.
#[derive(Debug, Clone, Default)]
pub struct JobApplicationRequest {
    pub user_id: String,
    pub job_position_id: String,
    pub cover_letter: Option<String>,
    pub resume: Option<ResumeFile>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_round_trips_through_lowercase_text() {
        assert_eq!(ApplicationStatus::Reviewing.to_string(), "reviewing");
        assert_eq!(
            ApplicationStatus::from_str("Accepted").unwrap(),
            ApplicationStatus::Accepted
        );
        let json = serde_json::to_string(&ApplicationStatus::Rejected).unwrap();
        assert_eq!(json, "\"rejected\"");
    }

    #[test]
    fn resume_extension_is_lowercased() {
        let file = ResumeFile::new("Ada Lovelace CV.PDF", b"x".to_vec());
        assert_eq!(file.extension().as_deref(), Some("pdf"));
        assert_eq!(ResumeFile::new("resume", b"x".to_vec()).extension(), None);
        assert_eq!(ResumeFile::new(".bashrc", b"x".to_vec()).extension(), None);
    }

    #[test]
    fn new_application_requires_job_and_user() {
        let err = NewApplication::default().validate().unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "job_position_id"));
    }
}
