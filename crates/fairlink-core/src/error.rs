// ── Core error types ──
//
// User-facing errors from fairlink-core. These are NOT transport-specific:
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<fairlink_api::Error>` impl translates gateway errors into the
// four kinds the access layer promises.
//
// `Clone` because one in-flight load's failure is handed to every caller
// waiting on the same query key.

use thiserror::Error;

/// `Remote` code for a store answer that could not be decoded.
pub const DECODE_ERROR_CODE: &str = "decode";

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A write was attempted while the store is not configured.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The store was reachable but rejected the request.
    #[error("Remote store error: {message}")]
    Remote {
        message: String,
        /// Store-specific error code (e.g. a Postgres SQLSTATE).
        code: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    /// A by-id read found no row in either the store or the snapshot.
    #[error("{resource} not found: {identifier}")]
    NotFound {
        resource: String,
        identifier: String,
    },

    /// A required field was missing before a mutation was attempted.
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn required(field: &str) -> Self {
        Self::Validation {
            field: field.into(),
            reason: "is required".into(),
        }
    }

    /// The store answered, but not in a shape we understand.
    pub(crate) fn decode(message: String) -> Self {
        Self::Remote {
            message,
            code: Some(DECODE_ERROR_CODE.into()),
            status: None,
        }
    }

    pub(crate) fn not_configured() -> Self {
        Self::Configuration {
            message: "the remote store is not configured; writes are unavailable in mock mode"
                .into(),
        }
    }
}

// ── Conversion from gateway errors ───────────────────────────────────

impl From<fairlink_api::Error> for CoreError {
    fn from(err: fairlink_api::Error) -> Self {
        match err {
            fairlink_api::Error::NotConfigured => CoreError::not_configured(),
            fairlink_api::Error::Authentication { message } => CoreError::Remote {
                message,
                code: Some("authentication".into()),
                status: Some(401),
            },
            fairlink_api::Error::Transport(ref e) => CoreError::Remote {
                message: e.to_string(),
                code: None,
                status: e.status().map(|s| s.as_u16()),
            },
            fairlink_api::Error::InvalidUrl(e) => CoreError::Configuration {
                message: format!("invalid store URL: {e}"),
            },
            fairlink_api::Error::Api {
                message,
                code,
                status,
            } => CoreError::Remote {
                message,
                code,
                status: Some(status),
            },
            fairlink_api::Error::Deserialization { message, body: _ } => {
                CoreError::decode(format!("unexpected response from store: {message}"))
            }
        }
    }
}
