//! Shared helpers for command handlers.

use std::path::Path;

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use fairlink_core::{EntityId, ResumeFile};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Parse a command-line identifier. `EntityId`'s `From<String>` turns
/// UUID-shaped input into `EntityId::Uuid` and anything else into a key.
pub fn entity_id(raw: &str) -> EntityId {
    EntityId::from(raw.trim())
}

/// The acting user (`--user` / `FAIRLINK_USER`), required by `command`.
pub fn require_user<'a>(global: &'a GlobalOpts, command: &str) -> Result<&'a str, CliError> {
    global
        .user
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| CliError::NoUser {
            command: command.into(),
        })
}

/// Read a resume from disk, keeping only its file name.
pub fn read_resume(path: &Path) -> Result<ResumeFile, CliError> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::Validation {
            field: "resume".into(),
            reason: format!("'{}' has no usable file name", path.display()),
        })?;
    Ok(ResumeFile::new(file_name, bytes))
}

/// Password from the named environment variable, else an interactive prompt.
pub fn read_password(env_name: &str) -> Result<SecretString, CliError> {
    if let Ok(value) = std::env::var(env_name) {
        return Ok(SecretString::from(value));
    }
    let value = rpassword::prompt_password("Password: ")?;
    Ok(SecretString::from(value))
}

pub fn format_date(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "-".into(), |d| d.format("%Y-%m-%d").to_string())
}

pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Cut long free text for table cells.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("Acme", 10), "Acme");
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("Senior Software Engineer", 8), "Senior …");
    }

    #[test]
    fn entity_id_recognises_uuids_and_keeps_short_keys() {
        let uuid = entity_id(" 6f1c2b7e-3d4a-4b8e-9c1d-2a3b4c5d6e7f ");
        assert!(uuid.as_uuid().is_some());
        assert_eq!(entity_id("3"), EntityId::Key("3".into()));
    }
}
