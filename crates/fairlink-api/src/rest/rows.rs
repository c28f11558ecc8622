// Row endpoints
//
// `{base}/rest/v1/{table}` with PostgREST query parameters. Inserts and
// updates ask for the stored representation back so callers see the
// server-assigned id and timestamps.

use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::client::RestGateway;
use crate::error::Error;
use crate::query::{Filter, Row, Select};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

impl RestGateway {
    /// `GET /rest/v1/{table}?select=...`
    pub async fn select_rows(&self, query: &Select) -> Result<Vec<Row>, Error> {
        let mut url = self.service_url("rest", query.table)?;
        url.query_pairs_mut().extend_pairs(query.query_pairs());
        self.send_json(self.request(Method::GET, url)).await
    }

    /// `GET /rest/v1/{table}?select=...` expecting a single object.
    ///
    /// The store answers 406 when the filter matches no row; that is an
    /// absent row, not an error.
    pub async fn select_single_row(&self, query: &Select) -> Result<Option<Row>, Error> {
        let mut url = self.service_url("rest", query.table)?;
        url.query_pairs_mut().extend_pairs(query.query_pairs());

        let resp = self
            .request(Method::GET, url)
            .header(ACCEPT, SINGLE_OBJECT)
            .send()
            .await
            .map_err(Error::Transport)?;

        if resp.status() == StatusCode::NOT_ACCEPTABLE {
            debug!(table = query.table, "no row matched single-row select");
            return Ok(None);
        }

        let resp = Self::check_status(resp).await?;
        let body = resp.text().await.map_err(Error::Transport)?;
        super::client::decode(&body).map(Some)
    }

    /// `POST /rest/v1/{table}`
    pub async fn insert_row(&self, table: &str, row: Value) -> Result<Row, Error> {
        let url = self.service_url("rest", table)?;
        let builder = self
            .request(Method::POST, url)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&row);
        let body: Value = self.send_json(builder).await?;
        first_row(table, body)
    }

    /// `PATCH /rest/v1/{table}?{filters}`
    pub async fn update_rows(
        &self,
        table: &str,
        patch: Value,
        filters: &[Filter],
    ) -> Result<Row, Error> {
        let mut url = self.service_url("rest", table)?;
        url.query_pairs_mut()
            .extend_pairs(filters.iter().map(Filter::to_query_pair));
        let builder = self
            .request(Method::PATCH, url)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&patch);
        let body: Value = self.send_json(builder).await?;
        first_row(table, body)
    }
}

/// Accept either a bare object or an array of rows and return the first row.
fn first_row(table: &str, body: Value) -> Result<Row, Error> {
    match body {
        Value::Object(row) => Ok(row),
        Value::Array(rows) => rows
            .into_iter()
            .find_map(|v| match v {
                Value::Object(row) => Some(row),
                _ => None,
            })
            .ok_or_else(|| Error::Api {
                message: format!("no {table} row matched"),
                code: None,
                status: StatusCode::NOT_FOUND.as_u16(),
            }),
        other => Err(Error::Deserialization {
            message: format!("expected a {table} row"),
            body: other.to_string(),
        }),
    }
}
