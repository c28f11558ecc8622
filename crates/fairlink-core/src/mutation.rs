// ── Mutation coordinator ──
//
// Writes go straight to the gateway, never to the snapshot. After a write
// succeeds, the cache keys whose contents it changed are marked stale; the
// new data appears on the next read, not before. A failed write publishes
// one error notification and leaves the cache untouched.
//
// Affected keys per write:
//   create/update booth      (Booth, all), (Booth, id)
//   create job position      (JobPosition, all)
//   create application       (Application, owner)
//   apply for job            (Application, owner); a resume goes through upload resume first
//   set application status   (Application, id), every (Application, owner)
//   update profile           (Profile, owner)
//   upload resume            (Profile, owner)
//   register for event       (Event, all), (EventRegistration, all)

use std::future::Future;
use std::sync::Arc;

use fairlink_api::{Filter, RemoteGateway};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::cache::{Invalidation, QueryCache};
use crate::error::CoreError;
use crate::mode::{BackendMode, ModeSelector};
use crate::model::{
    Application, ApplicationStatus, Booth, BoothPatch, EntityId, EventRegistration,
    JobApplicationRequest, JobPosition, NewApplication, NewBooth, NewJobPosition,
    NewRegistration, Profile, ProfilePatch, ResumeFile,
};
use crate::notify::{Notification, Notifications};
use crate::resource::{QueryKey, ResourceType, decode_row};

/// Executes writes and invalidates what they touched.
#[derive(Clone)]
pub struct Mutations {
    gateway: Arc<dyn RemoteGateway>,
    cache: QueryCache,
    mode: Arc<ModeSelector>,
    notifications: Notifications,
    bucket: String,
}

impl Mutations {
    pub(crate) fn new(
        gateway: Arc<dyn RemoteGateway>,
        cache: QueryCache,
        mode: Arc<ModeSelector>,
        notifications: Notifications,
        bucket: String,
    ) -> Self {
        Self {
            gateway,
            cache,
            mode,
            notifications,
            bucket,
        }
    }

    // ── Booths ───────────────────────────────────────────────────────

    pub async fn create_booth(&self, booth: NewBooth) -> Result<Booth, CoreError> {
        self.execute(
            "create booth",
            booth.validate(),
            async {
                let row = self
                    .gateway
                    .insert(ResourceType::Booth.table(), payload(&booth)?)
                    .await?;
                decode_row::<Booth>(ResourceType::Booth, row)
            },
            |created| booth_keys(&created.id),
        )
        .await
    }

    pub async fn update_booth(&self, id: &EntityId, patch: BoothPatch) -> Result<Booth, CoreError> {
        let validation = if patch.is_empty() {
            Err(CoreError::Validation {
                field: "patch".into(),
                reason: "has no fields to update".into(),
            })
        } else {
            Ok(())
        };
        self.execute(
            "update booth",
            validation,
            async {
                let row = self
                    .gateway
                    .update(
                        ResourceType::Booth.table(),
                        payload(&patch)?,
                        &[Filter::eq("id", id.to_string())],
                    )
                    .await?;
                decode_row::<Booth>(ResourceType::Booth, row)
            },
            |_| booth_keys(id),
        )
        .await
    }

    // ── Jobs ─────────────────────────────────────────────────────────

    pub async fn create_job(&self, job: NewJobPosition) -> Result<JobPosition, CoreError> {
        self.execute(
            "create job position",
            job.validate(),
            async {
                let row = self
                    .gateway
                    .insert(ResourceType::JobPosition.table(), payload(&job)?)
                    .await?;
                decode_row::<JobPosition>(ResourceType::JobPosition, row)
            },
            |_| vec![QueryKey::all(ResourceType::JobPosition).into()],
        )
        .await
    }

    // ── Applications ─────────────────────────────────────────────────

    pub async fn create_application(
        &self,
        mut application: NewApplication,
    ) -> Result<Application, CoreError> {
        application.user_id = application.user_id.trim().to_owned();
        let owner = application.user_id.clone();
        self.execute(
            "submit application",
            application.validate(),
            self.insert_application(&application),
            |_| vec![application_owner(&owner)],
        )
        .await
    }

    /// Apply for a job in one step: upload the resume (if any) as its own
    /// mutation, then insert a `pending` application that points at it. A
    /// failed upload stops the chain before anything is inserted; a failed
    /// insert leaves the completed upload and its profile invalidation in
    /// place.
    pub async fn apply(&self, request: JobApplicationRequest) -> Result<Application, CoreError> {
        let JobApplicationRequest {
            user_id,
            job_position_id,
            cover_letter,
            resume,
        } = request;
        let user_id = user_id.trim().to_owned();
        let validation = NewApplication {
            job_position_id: job_position_id.clone(),
            user_id: user_id.clone(),
            ..NewApplication::default()
        }
        .validate()
        .and_then(|()| resume.as_ref().map_or(Ok(()), ResumeFile::validate));

        let resume_url = match resume {
            Some(file) if validation.is_ok() => Some(self.upload_resume(&user_id, file).await?),
            _ => None,
        };

        self.execute(
            "submit application",
            validation,
            async {
                let application = NewApplication {
                    job_position_id: job_position_id.clone(),
                    user_id: user_id.clone(),
                    status: ApplicationStatus::Pending,
                    resume_url,
                    cover_letter: cover_letter.filter(|c| !c.trim().is_empty()),
                };
                self.insert_application(&application).await
            },
            |_| vec![application_owner(&user_id)],
        )
        .await
    }

    /// Write any status; transitions are not restricted.
    pub async fn set_application_status(
        &self,
        id: &EntityId,
        status: ApplicationStatus,
    ) -> Result<Application, CoreError> {
        self.execute(
            "update application status",
            Ok(()),
            async {
                let row = self
                    .gateway
                    .update(
                        ResourceType::Application.table(),
                        json!({ "status": status }),
                        &[Filter::eq("id", id.to_string())],
                    )
                    .await?;
                decode_row::<Application>(ResourceType::Application, row)
            },
            |_| {
                vec![
                    QueryKey::by_id(ResourceType::Application, id.clone()).into(),
                    Invalidation::OwnerScoped(ResourceType::Application),
                ]
            },
        )
        .await
    }

    async fn insert_application(
        &self,
        application: &NewApplication,
    ) -> Result<Application, CoreError> {
        let row = self
            .gateway
            .insert(ResourceType::Application.table(), payload(application)?)
            .await?;
        decode_row::<Application>(ResourceType::Application, row)
    }

    // ── Profiles ─────────────────────────────────────────────────────

    pub async fn update_profile(
        &self,
        user_id: &str,
        patch: ProfilePatch,
    ) -> Result<Profile, CoreError> {
        let user_id = user_id.trim();
        let validation = if user_id.is_empty() {
            Err(CoreError::required("user_id"))
        } else if patch.is_empty() {
            Err(CoreError::Validation {
                field: "patch".into(),
                reason: "has no fields to update".into(),
            })
        } else {
            Ok(())
        };
        self.execute(
            "update profile",
            validation,
            async {
                let row = self
                    .gateway
                    .update(
                        ResourceType::Profile.table(),
                        payload(&patch)?,
                        &[Filter::eq("user_id", user_id)],
                    )
                    .await?;
                decode_row::<Profile>(ResourceType::Profile, row)
            },
            |_| vec![profile_owner(user_id)],
        )
        .await
    }

    /// Store a resume and record its public URL on the owner's profile.
    /// Returns the URL.
    pub async fn upload_resume(&self, user_id: &str, file: ResumeFile) -> Result<String, CoreError> {
        let user_id = user_id.trim();
        let validation = if user_id.is_empty() {
            Err(CoreError::required("user_id"))
        } else {
            file.validate()
        };
        self.execute(
            "upload resume",
            validation,
            self.store_resume(user_id, file),
            |_| vec![profile_owner(user_id)],
        )
        .await
    }

    /// Upload, then patch `profiles.resume_url`. Short-circuits on the
    /// first failure.
    async fn store_resume(&self, user_id: &str, file: ResumeFile) -> Result<String, CoreError> {
        let path = resume_path(user_id, &file);
        debug!(bucket = %self.bucket, %path, size = file.bytes.len(), "uploading resume");
        self.gateway
            .upload_blob(&self.bucket, &path, file.bytes)
            .await?;

        let url = self.gateway.public_url(&self.bucket, &path);
        self.gateway
            .update(
                ResourceType::Profile.table(),
                json!({ "resume_url": url }),
                &[Filter::eq("user_id", user_id)],
            )
            .await?;
        Ok(url)
    }

    // ── Events ───────────────────────────────────────────────────────

    pub async fn register_for_event(
        &self,
        event_id: &EntityId,
        user_id: &str,
    ) -> Result<EventRegistration, CoreError> {
        let user_id = user_id.trim();
        let validation = if user_id.is_empty() {
            Err(CoreError::required("user_id"))
        } else {
            Ok(())
        };
        let event_id = event_id.to_string();
        self.execute(
            "register for event",
            validation,
            async {
                let registration = NewRegistration {
                    event_id: &event_id,
                    user_id,
                };
                let row = self
                    .gateway
                    .insert(
                        ResourceType::EventRegistration.table(),
                        payload(&registration)?,
                    )
                    .await?;
                decode_row::<EventRegistration>(ResourceType::EventRegistration, row)
            },
            |_| {
                vec![
                    QueryKey::all(ResourceType::Event).into(),
                    QueryKey::all(ResourceType::EventRegistration).into(),
                ]
            },
        )
        .await
    }

    // ── Execution ────────────────────────────────────────────────────

    /// Validate, refuse in mock mode, run, then invalidate on success or
    /// notify on failure.
    async fn execute<R, Fut, K>(
        &self,
        action: &'static str,
        validation: Result<(), CoreError>,
        op: Fut,
        affected: K,
    ) -> Result<R, CoreError>
    where
        Fut: Future<Output = Result<R, CoreError>>,
        K: FnOnce(&R) -> Vec<Invalidation>,
    {
        let outcome = match validation {
            Err(err) => Err(err),
            Ok(()) if self.mode.current_mode() == BackendMode::Mock => {
                Err(CoreError::not_configured())
            }
            Ok(()) => op.await,
        };

        match outcome {
            Ok(value) => {
                let marked: usize = affected(&value)
                    .into_iter()
                    .map(|target| self.cache.invalidate(target))
                    .sum();
                info!(action, marked, "mutation applied");
                Ok(value)
            }
            Err(err) => {
                self.notifications
                    .publish(Notification::error(format!("Could not {action}"), err.to_string()));
                Err(err)
            }
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn payload<T: Serialize>(value: &T) -> Result<Value, CoreError> {
    serde_json::to_value(value).map_err(|e| CoreError::Internal(format!("encode payload: {e}")))
}

fn booth_keys(id: &EntityId) -> Vec<Invalidation> {
    vec![
        QueryKey::all(ResourceType::Booth).into(),
        QueryKey::by_id(ResourceType::Booth, id.clone()).into(),
    ]
}

fn application_owner(user_id: &str) -> Invalidation {
    QueryKey::owned_by(ResourceType::Application, user_id).into()
}

fn profile_owner(user_id: &str) -> Invalidation {
    QueryKey::owned_by(ResourceType::Profile, user_id).into()
}

/// `resumes/{user}/{random}.{ext}`; the original file name is not kept.
pub(crate) fn resume_path(user_id: &str, file: &ResumeFile) -> String {
    let name = EntityId::random();
    match file.extension() {
        Some(ext) => format!("resumes/{user_id}/{name}.{ext}"),
        None => format!("resumes/{user_id}/{name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_paths_are_unique_per_upload() {
        let file = ResumeFile::new("My CV.pdf", b"%PDF".to_vec());
        let first = resume_path("u1", &file);
        let second = resume_path("u1", &file);

        assert!(first.starts_with("resumes/u1/"));
        assert!(first.ends_with(".pdf"));
        assert!(!first.contains("My CV"));
        assert_ne!(first, second);
    }

    #[test]
    fn resume_without_extension_has_bare_name() {
        let file = ResumeFile::new("resume", b"text".to_vec());
        let path = resume_path("u1", &file);
        assert!(!path.rsplit('/').next().unwrap_or_default().contains('.'));
    }
}
