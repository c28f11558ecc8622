// ── Fair: composition root ──
//
// Wires the mode selector, the chosen gateway, the query cache, the read
// hooks, the mutation coordinator, and session handling together. The
// gateway implementation is chosen once here and injected everywhere;
// nothing downstream asks which mode is active.

use std::sync::Arc;

use fairlink_api::{OfflineGateway, RemoteGateway, RestGateway};
use tracing::debug;

use crate::cache::QueryCache;
use crate::config::StoreConfig;
use crate::error::CoreError;
use crate::hooks::{Applications, Booths, Events, Jobs, Profiles, ResourceHooks};
use crate::mode::{BackendMode, ModeSelector};
use crate::mutation::Mutations;
use crate::notify::Notifications;
use crate::session::SessionManager;

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<FairInner>`. Every clone shares one cache,
/// one gateway, and one session.
#[derive(Clone)]
pub struct Fair {
    inner: Arc<FairInner>,
}

struct FairInner {
    config: StoreConfig,
    mode: Arc<ModeSelector>,
    cache: QueryCache,
    notifications: Notifications,
    booths: Booths,
    jobs: Jobs,
    applications: Applications,
    profiles: Profiles,
    events: Events,
    mutations: Mutations,
    session: SessionManager,
}

impl Fair {
    /// Select the backend mode from `config` and build the matching
    /// gateway. Subscribe to `notifications` first to see the mode
    /// announcement.
    pub fn new(config: StoreConfig, notifications: Notifications) -> Result<Self, CoreError> {
        let mode = Arc::new(ModeSelector::new(config.clone(), notifications.clone()));
        let gateway: Arc<dyn RemoteGateway> = match mode.live_target() {
            Some((url, access_key)) => {
                Arc::new(RestGateway::new(url, access_key, &config.transport())?)
            }
            None => Arc::new(OfflineGateway),
        };
        Ok(Self::assemble(config, mode, gateway, notifications))
    }

    /// Build around an already-constructed gateway. The mode is still
    /// derived from `config`.
    pub fn with_gateway(
        config: StoreConfig,
        gateway: Arc<dyn RemoteGateway>,
        notifications: Notifications,
    ) -> Self {
        let mode = Arc::new(ModeSelector::new(config.clone(), notifications.clone()));
        mode.current_mode();
        Self::assemble(config, mode, gateway, notifications)
    }

    fn assemble(
        config: StoreConfig,
        mode: Arc<ModeSelector>,
        gateway: Arc<dyn RemoteGateway>,
        notifications: Notifications,
    ) -> Self {
        debug!(mode = %mode.current_mode(), "assembling access layer");
        let cache = QueryCache::new();
        let booths = ResourceHooks::new(Arc::clone(&gateway), cache.clone());
        let jobs = ResourceHooks::new(Arc::clone(&gateway), cache.clone());
        let applications = Applications::new(ResourceHooks::new(Arc::clone(&gateway), cache.clone()));
        let profiles = Profiles::new(ResourceHooks::new(Arc::clone(&gateway), cache.clone()));
        let events = Events::new(
            ResourceHooks::new(Arc::clone(&gateway), cache.clone()),
            ResourceHooks::new(Arc::clone(&gateway), cache.clone()),
        );

        let mutations = Mutations::new(
            Arc::clone(&gateway),
            cache.clone(),
            Arc::clone(&mode),
            notifications.clone(),
            config.bucket.clone(),
        );
        let session = SessionManager::new(gateway, Arc::clone(&mode), notifications.clone());

        Self {
            inner: Arc::new(FairInner {
                config,
                mode,
                cache,
                notifications,
                booths,
                jobs,
                applications,
                profiles,
                events,
                mutations,
                session,
            }),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    pub fn mode(&self) -> BackendMode {
        self.inner.mode.current_mode()
    }

    pub fn cache(&self) -> &QueryCache {
        &self.inner.cache
    }

    pub fn notifications(&self) -> &Notifications {
        &self.inner.notifications
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn booths(&self) -> &Booths {
        &self.inner.booths
    }

    pub fn jobs(&self) -> &Jobs {
        &self.inner.jobs
    }

    pub fn applications(&self) -> &Applications {
        &self.inner.applications
    }

    pub fn profiles(&self) -> &Profiles {
        &self.inner.profiles
    }

    pub fn events(&self) -> &Events {
        &self.inner.events
    }

    // ── Writes & session ─────────────────────────────────────────────

    pub fn mutations(&self) -> &Mutations {
        &self.inner.mutations
    }

    pub fn session(&self) -> &SessionManager {
        &self.inner.session
    }
}
