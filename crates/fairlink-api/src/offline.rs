// Offline gateway
//
// Stand-in used when no store is configured. Every operation fails with
// `Error::NotConfigured`: reads recover from the local snapshot in the
// core, writes surface as configuration errors.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use tracing::trace;

use crate::error::Error;
use crate::gateway::{Identity, RemoteGateway, Session};
use crate::query::{Filter, Row, Select};

/// Gateway with no backing store.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineGateway;

#[async_trait]
impl RemoteGateway for OfflineGateway {
    async fn select(&self, query: &Select) -> Result<Vec<Row>, Error> {
        trace!(table = query.table, "offline select");
        Err(Error::NotConfigured)
    }

    async fn select_one(&self, query: &Select) -> Result<Option<Row>, Error> {
        trace!(table = query.table, "offline select_one");
        Err(Error::NotConfigured)
    }

    async fn insert(&self, _table: &str, _row: Value) -> Result<Row, Error> {
        Err(Error::NotConfigured)
    }

    async fn update(&self, _table: &str, _patch: Value, _filters: &[Filter]) -> Result<Row, Error> {
        Err(Error::NotConfigured)
    }

    async fn upload_blob(&self, _bucket: &str, _path: &str, _bytes: Bytes) -> Result<(), Error> {
        Err(Error::NotConfigured)
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("offline://{bucket}/{path}")
    }

    async fn authenticate(&self, _email: &str, _password: &str) -> Result<Session, Error> {
        Err(Error::NotConfigured)
    }

    async fn register(
        &self,
        _email: &str,
        _password: &str,
        _attributes: Value,
    ) -> Result<Identity, Error> {
        Err(Error::NotConfigured)
    }

    async fn end_session(&self) -> Result<(), Error> {
        Err(Error::NotConfigured)
    }
}
