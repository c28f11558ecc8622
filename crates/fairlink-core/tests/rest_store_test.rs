#![allow(clippy::unwrap_used)]
// End-to-end: `Fair` in live mode talking to a wiremock store.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fairlink_core::{
    BackendMode, EntityId, Fair, NewBooth, NotificationLevel, Notifications, QueryKey,
    ResourceType, StoreConfig, snapshot,
};

async fn setup() -> (MockServer, Fair, Notifications) {
    let server = MockServer::start().await;
    let notifications = Notifications::new();
    let fair = Fair::new(
        StoreConfig::live(server.uri(), "anon-key"),
        notifications.clone(),
    )
    .unwrap();
    (server, fair, notifications)
}

fn booth(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": "Widgets",
        "logo": "https://img.example.co/l.png",
        "cover_image": "https://img.example.co/c.png",
        "location": "Remote",
        "industry": "Manufacturing",
        "employee_count": "10-50",
        "owner_id": "owner-1",
        "created_at": "2024-03-01T12:00:00+00:00",
        "updated_at": "2024-03-01T12:00:00+00:00"
    })
}

#[tokio::test]
async fn announces_live_mode_once() {
    let server = MockServer::start().await;
    let notifications = Notifications::new();
    let mut rx = notifications.subscribe();
    let fair = Fair::new(
        StoreConfig::live(server.uri(), "anon-key"),
        notifications.clone(),
    )
    .unwrap();

    assert_eq!(fair.mode(), BackendMode::Live);
    let note = rx.try_recv().unwrap();
    assert_eq!(note.level, NotificationLevel::Success);
    assert_eq!(note.title, "Store connected");
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn jobs_are_read_with_embedded_booth_names() {
    let (server, fair, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/job_positions"))
        .and(query_param("select", "*,booths:booth_id(name)"))
        .and(query_param("order", "created_at.desc"))
        .and(header("apikey", "anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "8d0e2c1a-4f55-4c39-9a7e-1f7c0c1b2d3e",
            "booth_id": "B1",
            "title": "Platform Engineer",
            "description": "Keep the lights on",
            "location": "Remote",
            "employment_type": "Full-time",
            "created_at": "2024-03-02T12:00:00+00:00",
            "updated_at": null,
            "booths": { "name": "Acme" }
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let jobs = fair.jobs().list().await.unwrap();
    let cached = fair.jobs().list().await.unwrap();

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].booth_name.as_deref(), Some("Acme"));
    assert!(jobs[0].job.id.as_uuid().is_some());
    assert_eq!(cached.len(), 1);
}

#[tokio::test]
async fn empty_job_table_falls_back_to_snapshot() {
    let (server, fair, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/job_positions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let jobs = fair.jobs().list().await.unwrap();
    assert_eq!(*jobs, snapshot::jobs());
}

#[tokio::test]
async fn missing_row_falls_back_to_snapshot_by_id() {
    let (server, fair, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/events"))
        .and(query_param("id", "eq.2"))
        .and(header("accept", "application/vnd.pgrst.object+json"))
        .respond_with(ResponseTemplate::new(406).set_body_json(json!({
            "code": "PGRST116",
            "message": "JSON object requested, multiple (or no) rows returned"
        })))
        .mount(&server)
        .await;

    let event = fair.events().by_id(Some(&EntityId::from("2"))).await.unwrap();
    assert_eq!(event.unwrap().name, "Tech Networking Mixer");
}

#[tokio::test]
async fn created_booth_is_visible_after_invalidation() {
    let (server, fair, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/booths"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([booth("b1", "Acme")])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/booths"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            booth("b2", "Globex"),
            booth("b1", "Acme")
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/booths"))
        .and(header("prefer", "return=representation"))
        .and(body_partial_json(json!({ "name": "Globex", "owner_id": "owner-1" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([booth("b2", "Globex")])))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(fair.booths().list().await.unwrap().len(), 1);

    let created = fair
        .mutations()
        .create_booth(NewBooth {
            name: "Globex".into(),
            owner_id: "owner-1".into(),
            ..NewBooth::default()
        })
        .await
        .unwrap();
    assert_eq!(created.id, EntityId::from("b2"));
    assert!(fair.cache().get(&QueryKey::all(ResourceType::Booth)).unwrap().stale);

    let booths = fair.booths().list().await.unwrap();
    assert_eq!(booths.len(), 2);
    assert_eq!(booths[0].name, "Globex");
}
