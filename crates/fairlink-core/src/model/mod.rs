// ── Domain model ──
//
// Plain data shapes read from the store (or the local snapshot) and the
// payloads written back to it. No behavior beyond input validation.

pub mod application;
pub mod booth;
pub mod entity_id;
pub mod event;
pub mod job;
pub mod profile;

pub use application::{
    Application, ApplicationListing, ApplicationStatus, JobApplicationRequest, NewApplication,
    ResumeFile,
};
pub use booth::{Booth, BoothPatch, NewBooth};
pub use entity_id::EntityId;
pub use event::{Event, EventRegistration};
pub(crate) use event::NewRegistration;
pub use job::{JobListing, JobPosition, NewJobPosition};
pub use profile::{Profile, ProfilePatch, Role};
