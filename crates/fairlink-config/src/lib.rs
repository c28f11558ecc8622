//! Configuration for the fairlink CLI.
//!
//! Merges serialized defaults, a TOML file, and `FAIRLINK_*` environment
//! variables with figment, then translates the result into
//! `fairlink_core::StoreConfig`. Core never reads files or the environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fairlink_core::StoreConfig;
use fairlink_core::config::DEFAULT_BUCKET;

/// Prefix for environment overrides. `FAIRLINK_STORE_URL` maps to `store.url`.
pub const ENV_PREFIX: &str = "FAIRLINK_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Remote store connection.
    #[serde(default)]
    pub store: StoreSection,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,
}

/// `[store]` table. Both `url` and `key` must be set for live mode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreSection {
    /// Store base URL (e.g., "https://xyz.example.co").
    pub url: Option<String>,

    /// Public access key (plaintext; prefer `FAIRLINK_STORE_KEY`).
    pub key: Option<String>,

    /// Blob bucket for resume uploads.
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            url: None,
            key: None,
            bucket: default_bucket(),
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
        }
    }
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_output() -> String {
    "table".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "fairlink").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("fairlink");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the default file location + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from an explicit file path + environment.
///
/// A missing file is not an error; defaults and env still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    extract(file_layers(path).merge(Env::prefixed(ENV_PREFIX).split("_")))
}

/// Load defaults + file only, ignoring the environment. Used when the
/// result is written back, so env overrides are never persisted.
pub fn load_file(path: &Path) -> Result<Config, ConfigError> {
    extract(file_layers(path))
}

fn file_layers(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parents.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to core ─────────────────────────────────────────────

impl Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.store.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "store.timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        if self.store.bucket.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "store.bucket".into(),
                reason: "must not be blank".into(),
            });
        }
        Ok(())
    }

    /// Build the runtime store settings. URL validity is left to the
    /// mode selector, which treats an unusable URL as "not configured".
    pub fn to_store_config(&self) -> StoreConfig {
        StoreConfig {
            url: self.store.url.clone(),
            access_key: self.store.key.clone().map(SecretString::from),
            timeout: Duration::from_secs(self.store.timeout),
            bucket: self.store.bucket.clone(),
        }
    }

    /// Render as TOML with the access key masked.
    pub fn to_redacted_toml(&self) -> Result<String, ConfigError> {
        let mut masked = self.clone();
        if masked.store.key.is_some() {
            masked.store.key = Some("****".into());
        }
        Ok(toml::to_string_pretty(&masked)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.store.bucket, "user-documents");
        assert_eq!(cfg.defaults.output, "table");
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[store]\nurl = \"https://fair.example.co\"\nkey = \"anon\"\ntimeout = 5\n\n\
             [defaults]\noutput = \"json\"\n",
        )
        .unwrap();

        let cfg = load_file(&path).unwrap();
        assert_eq!(cfg.store.url.as_deref(), Some("https://fair.example.co"));
        assert_eq!(cfg.store.key.as_deref(), Some("anon"));
        assert_eq!(cfg.store.timeout, 5);
        // Unset keys keep their defaults.
        assert_eq!(cfg.store.bucket, "user-documents");
        assert_eq!(cfg.defaults.output, "json");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[store]\ntimeout = 0\n").unwrap();

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "store.timeout"));
    }

    #[test]
    fn to_store_config_carries_secret_and_timeout() {
        let cfg = Config {
            store: StoreSection {
                url: Some("https://fair.example.co".into()),
                key: Some("anon".into()),
                bucket: "docs".into(),
                timeout: 12,
            },
            defaults: Defaults::default(),
        };
        let store = cfg.to_store_config();
        assert_eq!(store.url.as_deref(), Some("https://fair.example.co"));
        assert_eq!(store.access_key.unwrap().expose_secret(), "anon");
        assert_eq!(store.timeout, Duration::from_secs(12));
        assert_eq!(store.bucket, "docs");
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.store.url = Some("https://fair.example.co".into());

        save_config(&cfg, &path).unwrap();
        assert_eq!(load_file(&path).unwrap(), cfg);
    }

    #[test]
    fn redacted_toml_masks_key() {
        let mut cfg = Config::default();
        cfg.store.key = Some("super-secret".into());
        let rendered = cfg.to_redacted_toml().unwrap();
        assert!(rendered.contains("****"));
        assert!(!rendered.contains("super-secret"));
    }
}
