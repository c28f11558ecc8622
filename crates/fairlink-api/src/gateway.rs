// Remote gateway capability surface
//
// Everything the core needs from the remote store, expressed as one
// object-safe trait so the implementation (live REST or offline) can be
// chosen once at startup and injected.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::query::{Filter, Row, Select};

/// An authenticated session returned by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: Identity,
}

/// The identity behind a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: Option<String>,
}

/// Row, blob, and auth operations offered by the remote store.
///
/// Implementations may fail, return partial results, or be unreachable;
/// callers decide how to recover.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Run a row query and return every matching row.
    async fn select(&self, query: &Select) -> Result<Vec<Row>, Error>;

    /// Run a row query expected to match at most one row.
    async fn select_one(&self, query: &Select) -> Result<Option<Row>, Error>;

    /// Insert one row, returning the stored representation.
    async fn insert(&self, table: &str, row: Value) -> Result<Row, Error>;

    /// Patch the rows matching `filters`, returning the first updated row.
    async fn update(&self, table: &str, patch: Value, filters: &[Filter]) -> Result<Row, Error>;

    /// Store `bytes` at `path` inside `bucket`.
    async fn upload_blob(&self, bucket: &str, path: &str, bytes: Bytes) -> Result<(), Error>;

    /// Public URL for a stored blob. Pure; never contacts the store.
    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Password sign-in.
    async fn authenticate(&self, email: &str, password: &str) -> Result<Session, Error>;

    /// Create an account with extra profile attributes.
    async fn register(
        &self,
        email: &str,
        password: &str,
        attributes: Value,
    ) -> Result<Identity, Error>;

    /// Revoke the current session.
    async fn end_session(&self) -> Result<(), Error>;
}
