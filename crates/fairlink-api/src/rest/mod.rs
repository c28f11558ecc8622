// REST gateway
//
// Live implementation of `RemoteGateway` over HTTP. Transport mechanics
// live in `client`; each service (rows, storage, auth) adds inherent
// methods in its own file and the trait impl below delegates to them.

mod auth;
mod client;
mod rows;
mod storage;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

pub use client::RestGateway;

use crate::error::Error;
use crate::gateway::{Identity, RemoteGateway, Session};
use crate::query::{Filter, Row, Select};

#[async_trait]
impl RemoteGateway for RestGateway {
    async fn select(&self, query: &Select) -> Result<Vec<Row>, Error> {
        self.select_rows(query).await
    }

    async fn select_one(&self, query: &Select) -> Result<Option<Row>, Error> {
        self.select_single_row(query).await
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Row, Error> {
        self.insert_row(table, row).await
    }

    async fn update(&self, table: &str, patch: Value, filters: &[Filter]) -> Result<Row, Error> {
        self.update_rows(table, patch, filters).await
    }

    async fn upload_blob(&self, bucket: &str, path: &str, bytes: Bytes) -> Result<(), Error> {
        self.upload_object(bucket, path, bytes).await
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.object_public_url(bucket, path)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Session, Error> {
        self.sign_in(email, password).await
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        attributes: Value,
    ) -> Result<Identity, Error> {
        self.sign_up(email, password, attributes).await
    }

    async fn end_session(&self) -> Result<(), Error> {
        self.sign_out().await
    }
}
