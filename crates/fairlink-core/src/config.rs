// ── Runtime store configuration ──
//
// Describes *which* store to talk to. Carries the access key but never
// touches disk or the environment: the CLI (via fairlink-config) builds a
// `StoreConfig` and hands it in.

use std::time::Duration;

use fairlink_api::TransportConfig;
use secrecy::SecretString;

/// Bucket that holds uploaded resumes unless configured otherwise.
pub const DEFAULT_BUCKET: &str = "user-documents";

/// Connection settings for the remote store.
///
/// Both `url` and `access_key` must be present and non-blank for the
/// store to be used; anything less selects mock mode.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Store base URL (e.g., `https://xyz.example.co`).
    pub url: Option<String>,
    /// Public access key sent with every request.
    pub access_key: Option<SecretString>,
    /// Request timeout.
    pub timeout: Duration,
    /// Blob bucket for resume uploads.
    pub bucket: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            access_key: None,
            timeout: Duration::from_secs(30),
            bucket: DEFAULT_BUCKET.into(),
        }
    }
}

impl StoreConfig {
    /// Settings for a configured store with default tuning.
    pub fn live(url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            access_key: Some(SecretString::from(access_key.into())),
            ..Self::default()
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
        }
    }
}
