// Auth endpoints
//
// Password sign-in, sign-up, and sign-out against `/auth/v1`. A
// successful sign-in attaches the session token to every later request;
// sign-out detaches it even when the server call fails.

use reqwest::Method;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::client::RestGateway;
use crate::error::Error;
use crate::gateway::{Identity, Session};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    user: Identity,
}

/// Sign-up answers with either a bare user or a session wrapping one,
/// depending on whether email confirmation is required.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    WithSession { user: Identity },
    Bare(Identity),
}

impl RestGateway {
    /// `POST /auth/v1/token?grant_type=password`
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, Error> {
        let mut url = self.service_url("auth", "token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let builder = self
            .request(Method::POST, url)
            .json(&json!({ "email": email, "password": password }));
        let token: TokenResponse = self
            .send_json(builder)
            .await
            .map_err(Self::auth_error)?;

        self.set_session_token(Some(token.access_token.clone()));
        debug!(user = %token.user.id, "signed in");

        Ok(Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            user: token.user,
        })
    }

    /// `POST /auth/v1/signup`
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        attributes: Value,
    ) -> Result<Identity, Error> {
        let url = self.service_url("auth", "signup")?;
        let builder = self.request(Method::POST, url).json(&json!({
            "email": email,
            "password": password,
            "data": attributes,
        }));
        let resp: SignUpResponse = self
            .send_json(builder)
            .await
            .map_err(Self::auth_error)?;

        Ok(match resp {
            SignUpResponse::WithSession { user } | SignUpResponse::Bare(user) => user,
        })
    }

    /// `POST /auth/v1/logout`
    pub async fn sign_out(&self) -> Result<(), Error> {
        let url = self.service_url("auth", "logout")?;
        let result = self
            .send_empty(self.request(Method::POST, url))
            .await
            .map_err(Self::auth_error);
        if let Err(ref e) = result {
            warn!(error = %e, "sign-out request failed; dropping local session anyway");
        }
        self.set_session_token(None);
        result
    }
}
