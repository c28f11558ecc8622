#![allow(clippy::unwrap_used)]
// Access-layer behaviour against a scripted in-memory gateway.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use fairlink_api::{Error, Filter, Identity, RemoteGateway, Row, Select, Session};
use fairlink_core::{
    ApplicationStatus, BackendMode, CoreError, EntityId, Fair, JobApplicationRequest,
    NewApplication, NewBooth, NotificationLevel, Notifications, QueryKey, ResourceType,
    ResumeFile, StoreConfig, snapshot,
};

// ── Scripted gateway ────────────────────────────────────────────────

#[derive(Default)]
struct FakeGateway {
    tables: Mutex<HashMap<String, Vec<Row>>>,
    failing: Mutex<HashSet<String>>,
    fail_uploads: bool,
    selects: AtomicUsize,
    select_ones: AtomicUsize,
    next_id: AtomicUsize,
    updates: Mutex<Vec<(String, Value)>>,
    uploads: Mutex<Vec<String>>,
}

impl FakeGateway {
    fn with_rows(self, table: &str, rows: Vec<Value>) -> Self {
        let rows = rows
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect();
        self.tables.lock().unwrap().insert(table.to_owned(), rows);
        self
    }

    fn failing(self, table: &str) -> Self {
        self.failing.lock().unwrap().insert(table.to_owned());
        self
    }

    fn matching(&self, table: &str, filters: &[Filter]) -> Vec<Row> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|row| {
                filters
                    .iter()
                    .all(|f| row.get(&f.column).and_then(Value::as_str) == Some(f.value.as_str()))
            })
            .collect()
    }

    fn check(&self, table: &str) -> Result<(), Error> {
        if self.failing.lock().unwrap().contains(table) {
            return Err(Error::Api {
                message: "relation is unavailable".into(),
                code: Some("XX000".into()),
                status: 500,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteGateway for FakeGateway {
    async fn select(&self, query: &Select) -> Result<Vec<Row>, Error> {
        self.selects.fetch_add(1, Ordering::SeqCst);
        self.check(query.table)?;
        Ok(self.matching(query.table, &query.filters))
    }

    async fn select_one(&self, query: &Select) -> Result<Option<Row>, Error> {
        self.select_ones.fetch_add(1, Ordering::SeqCst);
        self.check(query.table)?;
        Ok(self.matching(query.table, &query.filters).into_iter().next())
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Row, Error> {
        self.check(table)?;
        let mut row = row.as_object().cloned().unwrap();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        row.insert("id".into(), json!(format!("new-{id}")));
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_owned())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: &str, patch: Value, filters: &[Filter]) -> Result<Row, Error> {
        self.check(table)?;
        self.updates
            .lock()
            .unwrap()
            .push((table.to_owned(), patch.clone()));
        let mut tables = self.tables.lock().unwrap();
        let row = tables
            .get_mut(table)
            .and_then(|rows| {
                rows.iter_mut().find(|row| {
                    filters.iter().all(|f| {
                        row.get(&f.column).and_then(Value::as_str) == Some(f.value.as_str())
                    })
                })
            })
            .ok_or(Error::Api {
                message: "no rows updated".into(),
                code: None,
                status: 404,
            })?;
        for (k, v) in patch.as_object().cloned().unwrap() {
            row.insert(k, v);
        }
        Ok(row.clone())
    }

    async fn upload_blob(&self, _bucket: &str, path: &str, _bytes: Bytes) -> Result<(), Error> {
        if self.fail_uploads {
            return Err(Error::Api {
                message: "payload too large".into(),
                code: None,
                status: 413,
            });
        }
        self.uploads.lock().unwrap().push(path.to_owned());
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("https://blobs.example.co/{bucket}/{path}")
    }

    async fn authenticate(&self, email: &str, _password: &str) -> Result<Session, Error> {
        Ok(Session {
            access_token: "jwt".into(),
            refresh_token: None,
            user: Identity {
                id: "u1".into(),
                email: Some(email.into()),
            },
        })
    }

    async fn register(&self, email: &str, _password: &str, _attributes: Value) -> Result<Identity, Error> {
        Ok(Identity {
            id: "u2".into(),
            email: Some(email.into()),
        })
    }

    async fn end_session(&self) -> Result<(), Error> {
        Ok(())
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn live(gateway: &Arc<FakeGateway>) -> (Fair, Notifications) {
    let notifications = Notifications::new();
    let fair = Fair::with_gateway(
        StoreConfig::live("https://store.example.co", "anon-key"),
        Arc::clone(gateway) as Arc<dyn RemoteGateway>,
        notifications.clone(),
    );
    (fair, notifications)
}

fn mock() -> (Fair, Notifications) {
    let notifications = Notifications::new();
    let fair = Fair::new(StoreConfig::default(), notifications.clone()).unwrap();
    (fair, notifications)
}

fn booth_row(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": null,
        "logo": "https://img.example.co/logo.png",
        "cover_image": "https://img.example.co/cover.png",
        "location": "Remote",
        "industry": "Technology",
        "employee_count": "10-50",
        "owner_id": "owner-1",
        "created_at": "2024-02-01T09:00:00+00:00",
        "updated_at": null
    })
}

fn job_row(id: &str, booth_id: &str, booth: Value) -> Value {
    json!({
        "id": id,
        "booth_id": booth_id,
        "title": format!("Role {id}"),
        "description": "Do the work",
        "location": "Remote",
        "employment_type": "Full-time",
        "created_at": "2024-02-02T09:00:00+00:00",
        "updated_at": null,
        "booths": booth
    })
}

fn application_row(id: &str, user_id: &str) -> Value {
    json!({
        "id": id,
        "job_position_id": "j1",
        "user_id": user_id,
        "status": "pending",
        "resume_url": null,
        "cover_letter": null,
        "created_at": "2024-02-03T09:00:00+00:00",
        "updated_at": null,
        "job_positions": { "title": "Engineer", "booth_id": "b1", "booths": { "name": "Acme" } }
    })
}

fn profile_row(user_id: &str) -> Value {
    json!({
        "id": format!("p-{user_id}"),
        "user_id": user_id,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com",
        "role": "jobseeker",
        "job_title": null,
        "industry": null,
        "company_name": null,
        "location": null,
        "bio": null,
        "resume_url": null,
        "created_at": null,
        "updated_at": null
    })
}

fn booth_ids(booths: &[fairlink_core::Booth]) -> Vec<String> {
    booths.iter().map(|b| b.id.to_string()).collect()
}

// ── Mock mode ───────────────────────────────────────────────────────

#[tokio::test]
async fn mock_mode_lists_are_the_snapshot_sets() {
    let (fair, _) = mock();
    assert_eq!(fair.mode(), BackendMode::Mock);

    let booths = fair.booths().list().await.unwrap();
    let again = fair.booths().list().await.unwrap();
    assert_eq!(*booths, snapshot::booths());
    assert_eq!(booth_ids(&booths), booth_ids(&again));

    assert_eq!(*fair.jobs().list().await.unwrap(), snapshot::jobs());
    assert_eq!(*fair.events().list().await.unwrap(), snapshot::events());
    assert_eq!(
        *fair.events().registrations().await.unwrap(),
        snapshot::event_registrations()
    );
    assert_eq!(
        *fair
            .applications()
            .for_user(Some(snapshot::DEMO_JOBSEEKER))
            .await
            .unwrap(),
        snapshot::application_listings()
    );
    let profile = fair
        .profiles()
        .for_user(Some(snapshot::DEMO_JOBSEEKER))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.first_name, "Jordan");
}

#[tokio::test]
async fn mock_mode_by_id_falls_back_to_matching_snapshot_row() {
    let (fair, _) = mock();
    let booth = fair.booths().by_id(Some(&EntityId::from("2"))).await.unwrap();
    assert_eq!(booth.unwrap().name, "Innovate Health");

    let missing = fair.booths().by_id(Some(&EntityId::from("404"))).await.unwrap();
    assert!(missing.is_none());

    let err = fair.jobs().get(&EntityId::from("404")).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { ref resource, .. } if resource == "job_position"));
}

#[tokio::test]
async fn mock_mode_refuses_writes_with_one_notification() {
    let (fair, notifications) = mock();
    let mut rx = notifications.subscribe();

    let err = fair
        .mutations()
        .create_booth(NewBooth {
            name: "Acme".into(),
            owner_id: "u1".into(),
            ..NewBooth::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Configuration { .. }));

    let note = rx.try_recv().unwrap();
    assert_eq!(note.level, NotificationLevel::Error);
    assert_eq!(note.title, "Could not create booth");
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn mock_mode_sessions_are_not_faked() {
    let (fair, _) = mock();
    let err = fair
        .session()
        .authenticate("ada@example.com", &"pw".to_string().into())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Configuration { .. }));
    assert!(fair.session().current().is_none());
}

// ── Reads against a live gateway ────────────────────────────────────

#[tokio::test]
async fn by_id_without_id_never_calls_the_gateway() {
    let gateway = Arc::new(FakeGateway::default());
    let (fair, _) = live(&gateway);

    assert!(fair.booths().by_id(None).await.unwrap().is_none());
    assert!(fair.profiles().for_user(None).await.unwrap().is_none());
    assert!(fair.applications().for_user(None).await.unwrap().is_empty());

    assert_eq!(gateway.select_ones.load(Ordering::SeqCst), 0);
    assert_eq!(gateway.selects.load(Ordering::SeqCst), 0);
    assert!(fair.cache().get(&QueryKey::all(ResourceType::Application)).is_none());
}

#[tokio::test]
async fn empty_remote_result_serves_the_snapshot() {
    let gateway = Arc::new(FakeGateway::default().with_rows("job_positions", vec![]));
    let (fair, _) = live(&gateway);

    let jobs = fair.jobs().list().await.unwrap();
    assert_eq!(jobs.len(), 6);
    assert_eq!(*jobs, snapshot::jobs());
}

#[tokio::test]
async fn remote_failure_serves_the_snapshot_without_error() {
    let gateway = Arc::new(FakeGateway::default().failing("booths"));
    let (fair, notifications) = live(&gateway);
    let mut rx = notifications.subscribe();

    let booths = fair.booths().list().await.unwrap();
    assert_eq!(*booths, snapshot::booths());
    assert!(rx.try_recv().is_err(), "reads never notify");
}

#[tokio::test]
async fn remote_rows_are_used_as_is_and_assembled() {
    let gateway = Arc::new(FakeGateway::default().with_rows(
        "job_positions",
        vec![
            job_row("j1", "B1", json!({ "name": "Acme" })),
            job_row("j2", "gone", Value::Null),
        ],
    ));
    let (fair, _) = live(&gateway);

    let jobs = fair.jobs().list().await.unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].booth_name.as_deref(), Some("Acme"));
    assert_eq!(jobs[1].booth_name, None);
}

#[tokio::test]
async fn invalidating_jobs_reloads_jobs_only() {
    let gateway = Arc::new(
        FakeGateway::default()
            .with_rows("booths", vec![booth_row("b1", "Acme")])
            .with_rows("job_positions", vec![job_row("j1", "b1", json!({ "name": "Acme" }))]),
    );
    let (fair, _) = live(&gateway);

    fair.jobs().list().await.unwrap();
    fair.booths().list().await.unwrap();
    fair.jobs().list().await.unwrap();
    assert_eq!(gateway.selects.load(Ordering::SeqCst), 2);

    fair.cache().invalidate(QueryKey::all(ResourceType::JobPosition));
    fair.jobs().list().await.unwrap();
    fair.booths().list().await.unwrap();
    assert_eq!(gateway.selects.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn concurrent_list_calls_share_one_request() {
    let gateway = Arc::new(
        FakeGateway::default().with_rows("booths", vec![booth_row("b1", "Acme")]),
    );
    let (fair, _) = live(&gateway);

    let (a, b) = tokio::join!(fair.booths().list(), fair.booths().list());
    assert_eq!(gateway.selects.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn created_application_appears_only_after_refetch() {
    let gateway = Arc::new(
        FakeGateway::default().with_rows("applications", vec![application_row("a1", "u1")]),
    );
    let (fair, _) = live(&gateway);
    let key = QueryKey::owned_by(ResourceType::Application, "u1");

    assert_eq!(fair.applications().for_user(Some("u1")).await.unwrap().len(), 1);

    let created = fair
        .mutations()
        .create_application(NewApplication {
            job_position_id: "j1".into(),
            user_id: "u1".into(),
            ..NewApplication::default()
        })
        .await
        .unwrap();
    assert_eq!(created.status, ApplicationStatus::Pending);

    let cached = fair.cache().get(&key).unwrap();
    assert!(cached.stale);
    let before = cached.typed::<Vec<fairlink_core::ApplicationListing>>();
    assert_eq!(before.data.unwrap().len(), 1);

    let after = fair.applications().for_user(Some("u1")).await.unwrap();
    assert_eq!(after.len(), 2);
}

#[tokio::test]
async fn failed_resume_upload_skips_profile_patch_and_invalidation() {
    let gateway = Arc::new(FakeGateway {
        fail_uploads: true,
        ..FakeGateway::default()
    }
    .with_rows("profiles", vec![profile_row("u1")]));
    let (fair, notifications) = live(&gateway);
    let mut rx = notifications.subscribe();

    fair.profiles().for_user(Some("u1")).await.unwrap();
    let err = fair
        .mutations()
        .upload_resume("u1", ResumeFile::new("cv.pdf", b"%PDF".to_vec()))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Remote { status: Some(413), .. }));
    assert!(gateway.updates.lock().unwrap().is_empty());
    let profile_key = QueryKey::owned_by(ResourceType::Profile, "u1");
    assert!(!fair.cache().get(&profile_key).unwrap().stale);
    assert_eq!(rx.try_recv().unwrap().title, "Could not upload resume");
}

#[tokio::test]
async fn resume_upload_patches_profile_then_invalidates() {
    let gateway = Arc::new(FakeGateway::default().with_rows("profiles", vec![profile_row("u1")]));
    let (fair, _) = live(&gateway);

    fair.profiles().for_user(Some("u1")).await.unwrap();
    let url = fair
        .mutations()
        .upload_resume("u1", ResumeFile::new("cv.PDF", b"%PDF".to_vec()))
        .await
        .unwrap();

    let uploads = gateway.uploads.lock().unwrap().clone();
    assert_eq!(uploads.len(), 1);
    assert!(uploads[0].starts_with("resumes/u1/") && uploads[0].ends_with(".pdf"));
    assert_eq!(url, format!("https://blobs.example.co/user-documents/{}", uploads[0]));

    let profile_key = QueryKey::owned_by(ResourceType::Profile, "u1");
    assert!(fair.cache().get(&profile_key).unwrap().stale);
    let profile = fair.profiles().for_user(Some("u1")).await.unwrap().unwrap();
    assert_eq!(profile.resume_url.as_deref(), Some(url.as_str()));
}

#[tokio::test]
async fn apply_chains_resume_and_pending_application() {
    let gateway = Arc::new(FakeGateway::default().with_rows("profiles", vec![profile_row("u1")]));
    let (fair, _) = live(&gateway);

    let application = fair
        .mutations()
        .apply(JobApplicationRequest {
            user_id: "u1".into(),
            job_position_id: "j9".into(),
            cover_letter: Some("Hello".into()),
            resume: Some(ResumeFile::new("cv.pdf", b"%PDF".to_vec())),
        })
        .await
        .unwrap();

    assert_eq!(application.status, ApplicationStatus::Pending);
    assert!(application.resume_url.unwrap().contains("resumes/u1/"));
    assert_eq!(application.cover_letter.as_deref(), Some("Hello"));

    let profile_key = QueryKey::owned_by(ResourceType::Profile, "u1");
    assert!(fair.cache().get(&profile_key).unwrap().stale);
    assert!(
        fair.cache()
            .get(&QueryKey::owned_by(ResourceType::Application, "u1"))
            .unwrap()
            .stale
    );
}

#[tokio::test]
async fn failed_application_insert_still_refreshes_the_patched_profile() {
    let gateway = Arc::new(
        FakeGateway::default()
            .with_rows("profiles", vec![profile_row("u1")])
            .failing("applications"),
    );
    let (fair, notifications) = live(&gateway);
    let mut rx = notifications.subscribe();

    let before = fair.profiles().for_user(Some("u1")).await.unwrap().unwrap();
    assert_eq!(before.resume_url, None);

    let err = fair
        .mutations()
        .apply(JobApplicationRequest {
            user_id: "u1".into(),
            job_position_id: "j9".into(),
            cover_letter: None,
            resume: Some(ResumeFile::new("cv.pdf", b"%PDF".to_vec())),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Remote { status: Some(500), .. }));
    assert_eq!(rx.try_recv().unwrap().title, "Could not submit application");

    let profile_key = QueryKey::owned_by(ResourceType::Profile, "u1");
    assert!(fair.cache().get(&profile_key).unwrap().stale);
    let after = fair.profiles().for_user(Some("u1")).await.unwrap().unwrap();
    assert!(after.resume_url.unwrap().contains("resumes/u1/"));
}

#[tokio::test]
async fn padded_user_ids_address_the_same_rows_and_keys() {
    let gateway = Arc::new(FakeGateway::default().with_rows("profiles", vec![profile_row("u1")]));
    let (fair, _) = live(&gateway);

    fair.profiles().for_user(Some(" u1")).await.unwrap().unwrap();
    let url = fair
        .mutations()
        .upload_resume(" u1 ", ResumeFile::new("cv.pdf", b"%PDF".to_vec()))
        .await
        .unwrap();

    assert!(gateway.uploads.lock().unwrap()[0].starts_with("resumes/u1/"));
    let profile_key = QueryKey::owned_by(ResourceType::Profile, "u1");
    assert!(fair.cache().get(&profile_key).unwrap().stale);
    let profile = fair.profiles().for_user(Some("u1")).await.unwrap().unwrap();
    assert_eq!(profile.resume_url.as_deref(), Some(url.as_str()));

    let created = fair
        .mutations()
        .create_application(NewApplication {
            job_position_id: "j1".into(),
            user_id: "u1 ".into(),
            ..NewApplication::default()
        })
        .await
        .unwrap();
    assert_eq!(created.user_id, "u1");
}

#[tokio::test]
async fn status_change_invalidates_every_owner_list() {
    let gateway = Arc::new(FakeGateway::default().with_rows(
        "applications",
        vec![application_row("a1", "u1"), application_row("a2", "u2")],
    ));
    let (fair, _) = live(&gateway);

    fair.applications().for_user(Some("u1")).await.unwrap();
    fair.applications().for_user(Some("u2")).await.unwrap();
    fair.booths().list().await.unwrap();

    let updated = fair
        .mutations()
        .set_application_status(&EntityId::from("a1"), ApplicationStatus::Accepted)
        .await
        .unwrap();
    assert_eq!(updated.status, ApplicationStatus::Accepted);

    for owner in ["u1", "u2"] {
        let key = QueryKey::owned_by(ResourceType::Application, owner);
        assert!(fair.cache().get(&key).unwrap().stale, "{owner} list not invalidated");
    }
    assert!(!fair.cache().get(&QueryKey::all(ResourceType::Booth)).unwrap().stale);
}

#[tokio::test]
async fn event_registration_invalidates_events_and_registrations() {
    let gateway = Arc::new(FakeGateway::default());
    let (fair, _) = live(&gateway);

    fair.events().list().await.unwrap();
    fair.events().registrations().await.unwrap();

    fair.mutations()
        .register_for_event(&EntityId::from("1"), "u1")
        .await
        .unwrap();

    assert!(fair.cache().get(&QueryKey::all(ResourceType::Event)).unwrap().stale);
    assert!(
        fair.cache()
            .get(&QueryKey::all(ResourceType::EventRegistration))
            .unwrap()
            .stale
    );
    let registrations = fair.events().registrations().await.unwrap();
    assert_eq!(registrations.len(), 1);
    assert!(fair.events().is_registered(&EntityId::from("1"), "u1").await.unwrap());
}

#[tokio::test]
async fn failed_write_leaves_cache_untouched() {
    let gateway = Arc::new(
        FakeGateway::default()
            .with_rows("booths", vec![booth_row("b1", "Acme")])
            .failing("job_positions"),
    );
    let (fair, notifications) = live(&gateway);
    let mut rx = notifications.subscribe();
    fair.booths().list().await.unwrap();

    let err = fair
        .mutations()
        .create_job(fairlink_core::NewJobPosition {
            booth_id: "b1".into(),
            title: "Engineer".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Remote { status: Some(500), .. }));
    assert!(!fair.cache().get(&QueryKey::all(ResourceType::Booth)).unwrap().stale);
    assert_eq!(rx.try_recv().unwrap().level, NotificationLevel::Error);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn missing_fields_are_validation_errors_before_any_call() {
    let gateway = Arc::new(FakeGateway::default());
    let (fair, _) = live(&gateway);

    let err = fair
        .mutations()
        .create_booth(NewBooth::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "name"));
    assert!(gateway.tables.lock().unwrap().is_empty());
}

// ── Session ─────────────────────────────────────────────────────────

#[tokio::test]
async fn session_changes_are_observable() {
    let gateway = Arc::new(FakeGateway::default());
    let (fair, _) = live(&gateway);
    let mut changes = fair.session().on_session_change();
    assert!(changes.borrow().is_none());

    fair.session()
        .authenticate("ada@example.com", &"pw".to_string().into())
        .await
        .unwrap();
    changes.changed().await.unwrap();
    assert_eq!(fair.session().current_user_id().as_deref(), Some("u1"));

    fair.session().end_session().await.unwrap();
    changes.changed().await.unwrap();
    assert!(changes.borrow().is_none());
}
