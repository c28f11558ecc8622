// ── Backend mode selection ──
//
// Decides once per process whether the remote store is usable. Both the
// URL and the access key must be present and non-blank, and the URL must
// parse as http(s); anything else means mock mode, where reads come from
// the local snapshot and writes fail with a configuration error.

use std::sync::OnceLock;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use strum::Display;
use tracing::{info, warn};
use url::Url;

use crate::config::StoreConfig;
use crate::notify::{Notification, Notifications};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BackendMode {
    Live,
    Mock,
}

/// Result of inspecting a `StoreConfig`.
#[derive(Debug, Clone)]
pub(crate) enum Selection {
    Live { url: Url, access_key: SecretString },
    Mock { reason: String },
}

impl Selection {
    pub(crate) fn mode(&self) -> BackendMode {
        match self {
            Self::Live { .. } => BackendMode::Live,
            Self::Mock { .. } => BackendMode::Mock,
        }
    }
}

/// Pure inspection of the two mode values. Never fails.
pub(crate) fn inspect(config: &StoreConfig) -> Selection {
    let url = config.url.as_deref().map(str::trim).filter(|u| !u.is_empty());
    let key = config
        .access_key
        .as_ref()
        .filter(|k| !k.expose_secret().trim().is_empty());

    let (Some(raw_url), Some(key)) = (url, key) else {
        return Selection::Mock {
            reason: match (url, key) {
                (None, None) => "store URL and access key are not set".into(),
                (None, Some(_)) => "store URL is not set".into(),
                _ => "store access key is not set".into(),
            },
        };
    };

    match Url::parse(raw_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Selection::Live {
            url,
            access_key: SecretString::from(key.expose_secret().trim().to_owned()),
        },
        Ok(url) => {
            warn!(scheme = url.scheme(), "store URL must be http or https");
            Selection::Mock {
                reason: format!("store URL has unsupported scheme '{}'", url.scheme()),
            }
        }
        Err(e) => {
            warn!(error = %e, "store URL does not parse");
            Selection::Mock {
                reason: format!("store URL is invalid: {e}"),
            }
        }
    }
}

/// Process-wide, compute-once backend mode.
pub struct ModeSelector {
    config: StoreConfig,
    resolved: OnceLock<Selection>,
    notifications: Notifications,
}

impl ModeSelector {
    pub fn new(config: StoreConfig, notifications: Notifications) -> Self {
        Self {
            config,
            resolved: OnceLock::new(),
            notifications,
        }
    }

    /// The active mode. Computed on first call, which also publishes the
    /// one notification describing it.
    pub fn current_mode(&self) -> BackendMode {
        self.resolve().mode()
    }

    /// Store URL and access key, when live.
    pub(crate) fn live_target(&self) -> Option<(Url, SecretString)> {
        match self.resolve() {
            Selection::Live { url, access_key } => Some((url.clone(), access_key.clone())),
            Selection::Mock { .. } => None,
        }
    }

    fn resolve(&self) -> &Selection {
        self.resolved.get_or_init(|| {
            let selection = inspect(&self.config);
            self.announce(&selection);
            selection
        })
    }

    fn announce(&self, selection: &Selection) {
        match selection {
            Selection::Live { url, .. } => {
                info!(url = %url, "remote store configured, running live");
                self.notifications.publish(Notification::success(
                    "Store connected",
                    format!(
                        "Reading and writing through {}",
                        url.host_str().unwrap_or("the remote store")
                    ),
                ));
            }
            Selection::Mock { reason } => {
                info!(reason = %reason, "remote store not configured, running on sample data");
                self.notifications.publish(Notification::error(
                    "Store not configured",
                    "Set FAIRLINK_STORE_URL and FAIRLINK_STORE_KEY to connect. Showing sample data; changes cannot be saved.",
                ));
            }
        }
    }
}
