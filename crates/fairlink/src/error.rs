//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use fairlink_config::ConfigError;
use fairlink_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const NOT_CONFIGURED: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Store ────────────────────────────────────────────────────────
    #[error("Store not configured: {message}")]
    #[diagnostic(
        code(fairlink::not_configured),
        help(
            "Writes and sign-in need a real store.\n\
             Set FAIRLINK_STORE_URL and FAIRLINK_STORE_KEY, or run:\n\
             fairlink config set-store --url <URL> --key <KEY>"
        )
    )]
    NotConfigured { message: String },

    #[error("Could not reach the remote store: {message}")]
    #[diagnostic(
        code(fairlink::connection_failed),
        help("Check that the store URL is correct and reachable.")
    )]
    ConnectionFailed { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(fairlink::auth_failed),
        help("Verify the email and password, or the store access key.")
    )]
    AuthFailed { message: String },

    #[error("No acting user for '{command}'")]
    #[diagnostic(
        code(fairlink::no_user),
        help("Pass --user <ID> or set FAIRLINK_USER.")
    )]
    NoUser { command: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(fairlink::not_found),
        help("Run: fairlink {list_command} to see what is available")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Store error ({code}): {message}")]
    #[diagnostic(code(fairlink::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(fairlink::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(fairlink::config),
        help("Check the config file, or run: fairlink config path")
    )]
    Config(#[from] ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render JSON: {0}")]
    #[diagnostic(code(fairlink::json))]
    Json(#[from] serde_json::Error),

    #[error("Could not render YAML: {0}")]
    #[diagnostic(code(fairlink::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::NotConfigured { .. } | Self::Config(_) => exit_code::NOT_CONFIGURED,
            Self::Validation { .. } | Self::NoUser { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Configuration { message } => CliError::NotConfigured { message },

            CoreError::Remote {
                message,
                status: Some(401 | 403),
                ..
            } => CliError::AuthFailed { message },

            CoreError::Remote {
                message,
                code: None,
                status: None,
            } => CliError::ConnectionFailed { message },

            CoreError::Remote {
                message,
                code,
                status,
            } => CliError::ApiError {
                code: code
                    .or_else(|| status.map(|s| s.to_string()))
                    .unwrap_or_else(|| "unknown".into()),
                message,
            },

            CoreError::NotFound {
                resource,
                identifier,
            } => CliError::NotFound {
                list_command: list_command(&resource),
                resource_type: resource,
                identifier,
            },

            CoreError::Validation { field, reason } => CliError::Validation { field, reason },

            CoreError::Internal(message) => CliError::ApiError {
                code: "internal".into(),
                message,
            },
        }
    }
}

fn list_command(resource: &str) -> String {
    match resource {
        "booth" => "booths list".into(),
        "job_position" => "jobs list".into(),
        "application" => "applications list".into(),
        "event" => "events list".into(),
        "event_registration" => "events registrations".into(),
        "profile" => "profile show".into(),
        other => format!("{other}s list"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_maps_to_not_configured_exit_code() {
        let err = CliError::from(CoreError::Configuration {
            message: "mock mode".into(),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_CONFIGURED);
    }

    #[test]
    fn not_found_suggests_list_command() {
        let err = CliError::from(CoreError::NotFound {
            resource: "job_position".into(),
            identifier: "99".into(),
        });
        match err {
            CliError::NotFound { list_command, .. } => assert_eq!(list_command, "jobs list"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn undecodable_store_answer_is_an_api_error_not_a_connection_failure() {
        let err = CliError::from(CoreError::Remote {
            message: "unexpected booth row: missing field `name`".into(),
            code: Some(fairlink_core::DECODE_ERROR_CODE.into()),
            status: None,
        });
        assert!(matches!(err, CliError::ApiError { ref code, .. } if code == "decode"));
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn unauthorized_remote_error_is_auth_failure() {
        let err = CliError::from(CoreError::Remote {
            message: "JWT expired".into(),
            code: Some("PGRST301".into()),
            status: Some(401),
        });
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }
}
