// fairlink-core: Resource access and consistency layer between fairlink-api and consumers.

pub mod cache;
pub mod config;
pub mod error;
pub mod fair;
pub mod hooks;
pub mod mode;
pub mod model;
pub mod mutation;
pub mod notify;
pub mod relation;
pub mod resource;
pub mod session;
pub mod snapshot;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::{Invalidation, QueryCache, QuerySnapshot, QueryState, QueryStatus, QueryWatch};
pub use config::StoreConfig;
pub use error::{CoreError, DECODE_ERROR_CODE};
pub use fair::Fair;
pub use hooks::{Applications, Booths, Events, Jobs, Profiles, ResourceHooks};
pub use mode::{BackendMode, ModeSelector};
pub use mutation::Mutations;
pub use notify::{Notification, NotificationLevel, Notifications};
pub use resource::{QueryKey, Resource, ResourceType, Scope};
pub use session::{SessionManager, SignUp};

// Session types come from the gateway crate unchanged.
pub use fairlink_api::{Identity, Session};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Application, ApplicationListing, ApplicationStatus, Booth, BoothPatch, EntityId, Event,
    EventRegistration, JobApplicationRequest, JobListing, JobPosition, NewApplication, NewBooth,
    NewJobPosition, Profile, ProfilePatch, ResumeFile, Role,
};
