use thiserror::Error;

/// Top-level error type for the `fairlink-api` crate.
///
/// Covers every failure mode across the gateway surfaces:
/// row queries, blob storage, authentication, and transport.
/// `fairlink-core` maps these into the four user-facing error kinds.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// The gateway has no usable store configuration (mock mode).
    #[error("Remote store is not configured")]
    NotConfigured,

    // ── Authentication ──────────────────────────────────────────────
    /// Sign-in, sign-up, or sign-out rejected by the auth service.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Store ───────────────────────────────────────────────────────
    /// Structured error payload returned by the store.
    #[error("Store error (HTTP {status}): {message}")]
    Api {
        message: String,
        code: Option<String>,
        status: u16,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Extract the store error code, if available.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Api {
            message: "upstream down".into(),
            code: None,
            status: 503,
        };
        assert!(err.is_transient());
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_configured_is_neither_transient_nor_missing() {
        assert!(!Error::NotConfigured.is_transient());
        assert!(!Error::NotConfigured.is_not_found());
        assert_eq!(Error::NotConfigured.api_error_code(), None);
    }

    #[test]
    fn api_code_is_exposed() {
        let err = Error::Api {
            message: "duplicate key".into(),
            code: Some("23505".into()),
            status: 409,
        };
        assert_eq!(err.api_error_code(), Some("23505"));
    }
}
