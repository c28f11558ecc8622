// ── Session handling ──
//
// Password sign-in, sign-up, and sign-out against the store's auth
// service. The current session is held in a `watch` channel so any
// surface can follow sign-in state. Nothing here is faked in mock mode:
// every operation fails with a configuration error instead.

use std::sync::Arc;

use fairlink_api::{Identity, RemoteGateway, Session};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tokio::sync::watch;
use tracing::info;

use crate::error::CoreError;
use crate::mode::{BackendMode, ModeSelector};
use crate::model::Role;
use crate::notify::{Notification, Notifications};

/// Account creation request.
#[derive(Debug, Clone)]
pub struct SignUp {
    pub email: String,
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl SignUp {
    fn validate(&self) -> Result<(), CoreError> {
        validate_credentials(&self.email, &self.password)?;
        if self.first_name.trim().is_empty() {
            return Err(CoreError::required("first_name"));
        }
        if self.last_name.trim().is_empty() {
            return Err(CoreError::required("last_name"));
        }
        Ok(())
    }
}

fn validate_credentials(email: &str, password: &SecretString) -> Result<(), CoreError> {
    if email.trim().is_empty() {
        return Err(CoreError::required("email"));
    }
    if password.expose_secret().is_empty() {
        return Err(CoreError::required("password"));
    }
    Ok(())
}

pub struct SessionManager {
    gateway: Arc<dyn RemoteGateway>,
    mode: Arc<ModeSelector>,
    notifications: Notifications,
    current: watch::Sender<Option<Session>>,
}

impl SessionManager {
    pub(crate) fn new(
        gateway: Arc<dyn RemoteGateway>,
        mode: Arc<ModeSelector>,
        notifications: Notifications,
    ) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            gateway,
            mode,
            notifications,
            current,
        }
    }

    /// Sign in with email and password.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Session, CoreError> {
        validate_credentials(email, password)
            .and_then(|()| self.require_live())
            .map_err(|e| self.fail("Sign in failed", e))?;

        let session = self
            .gateway
            .authenticate(email.trim(), password.expose_secret())
            .await
            .map_err(|e| self.fail("Sign in failed", e.into()))?;

        info!(user = %session.user.id, "signed in");
        self.current.send_replace(Some(session.clone()));
        Ok(session)
    }

    /// Create an account; name and role travel as profile attributes.
    pub async fn register(&self, request: &SignUp) -> Result<Identity, CoreError> {
        request
            .validate()
            .and_then(|()| self.require_live())
            .map_err(|e| self.fail("Sign up failed", e))?;

        let attributes = json!({
            "first_name": request.first_name.trim(),
            "last_name": request.last_name.trim(),
            "role": request.role,
        });
        let identity = self
            .gateway
            .register(
                request.email.trim(),
                request.password.expose_secret(),
                attributes,
            )
            .await
            .map_err(|e| self.fail("Sign up failed", e.into()))?;

        info!(user = %identity.id, role = %request.role, "account created");
        Ok(identity)
    }

    /// Sign out. The local session is cleared even if the store call fails.
    pub async fn end_session(&self) -> Result<(), CoreError> {
        self.require_live()
            .map_err(|e| self.fail("Sign out failed", e))?;

        let result = self.gateway.end_session().await;
        self.current.send_replace(None);
        result.map_err(|e| self.fail("Sign out failed", e.into()))?;
        info!("signed out");
        Ok(())
    }

    /// Follow sign-in state. The receiver starts at the current session.
    pub fn on_session_change(&self) -> watch::Receiver<Option<Session>> {
        self.current.subscribe()
    }

    pub fn current(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    pub fn current_user_id(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|s| s.user.id.clone())
    }

    fn require_live(&self) -> Result<(), CoreError> {
        match self.mode.current_mode() {
            BackendMode::Live => Ok(()),
            BackendMode::Mock => Err(CoreError::not_configured()),
        }
    }

    fn fail(&self, title: &str, err: CoreError) -> CoreError {
        self.notifications
            .publish(Notification::error(title, err.to_string()));
        err
    }
}
