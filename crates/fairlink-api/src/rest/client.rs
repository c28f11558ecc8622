// REST gateway HTTP client
//
// Wraps `reqwest::Client` with store-specific URL construction, bearer
// selection (session token when signed in, access key otherwise), and
// error payload decoding. Row, storage, and auth endpoints are
// implemented as inherent methods in sibling files to keep this module
// focused on transport mechanics.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// HTTP client for a PostgREST-style row store with attached blob
/// storage and auth services.
pub struct RestGateway {
    http: reqwest::Client,
    base_url: Url,
    access_key: SecretString,
    session_token: ArcSwapOption<String>,
}

/// Error body shape shared by the row, storage, and auth services.
#[derive(Debug, Default, Deserialize)]
struct ErrorPayload {
    message: Option<String>,
    msg: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
    code: Option<serde_json::Value>,
}

impl ErrorPayload {
    fn message(&self) -> Option<String> {
        self.message
            .clone()
            .or_else(|| self.error_description.clone())
            .or_else(|| self.msg.clone())
            .or_else(|| self.error.clone())
    }

    fn code(&self) -> Option<String> {
        match self.code {
            Some(serde_json::Value::String(ref s)) => Some(s.clone()),
            Some(serde_json::Value::Number(ref n)) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl RestGateway {
    /// Create a gateway from a store URL, its access key, and transport settings.
    pub fn new(
        base_url: Url,
        access_key: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, access_key))
    }

    /// Create a gateway with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, access_key: SecretString) -> Self {
        Self {
            http,
            base_url,
            access_key,
            session_token: ArcSwapOption::empty(),
        }
    }

    /// The store base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether a session token is currently attached to requests.
    pub fn has_session(&self) -> bool {
        self.session_token.load().is_some()
    }

    pub(crate) fn set_session_token(&self, token: Option<String>) {
        self.session_token.store(token.map(Arc::new));
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/{service}/v1/{path}`
    pub(crate) fn service_url(&self, service: &str, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{service}/v1/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Start a request with the bearer header attached.
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{method} {url}");
        let token = self.session_token.load_full();
        let bearer = token
            .as_deref()
            .map_or_else(|| self.access_key.expose_secret(), String::as_str);
        self.http
            .request(method, url)
            .bearer_auth(bearer)
            .header("apikey", self.access_key.expose_secret())
    }

    /// Send a request and decode a JSON body on success.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, Error> {
        let resp = builder.send().await.map_err(Error::Transport)?;
        let resp = Self::check_status(resp).await?;
        let body = resp.text().await.map_err(Error::Transport)?;
        decode(&body)
    }

    /// Send a request and discard the body on success.
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<(), Error> {
        let resp = builder.send().await.map_err(Error::Transport)?;
        Self::check_status(resp).await?;
        Ok(())
    }

    /// Pass through 2xx responses; turn everything else into `Error::Api`.
    pub(crate) async fn check_status(resp: Response) -> Result<Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let payload: ErrorPayload = serde_json::from_str(&body).unwrap_or_default();
        let message = payload.message().unwrap_or_else(|| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_owned()
            } else {
                body.clone()
            }
        });

        Err(Error::Api {
            message,
            code: payload.code(),
            status: status.as_u16(),
        })
    }

    /// Auth endpoints report bad credentials as 400/401/422; surface those
    /// as authentication failures rather than generic store errors.
    pub(crate) fn auth_error(err: Error) -> Error {
        match err {
            Error::Api {
                message, status, ..
            } if status == StatusCode::BAD_REQUEST.as_u16()
                || status == StatusCode::UNAUTHORIZED.as_u16()
                || status == StatusCode::UNPROCESSABLE_ENTITY.as_u16() =>
            {
                Error::Authentication { message }
            }
            other => other,
        }
    }
}

pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.to_owned(),
    })
}
