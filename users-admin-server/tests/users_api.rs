//! End-to-end behaviour of the user routes against a real PostgreSQL
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p users-admin-server -- --ignored

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{call, TestDb};

#[tokio::test]
#[ignore = "requires database"]
async fn create_then_find_returns_payload() {
    let db = TestDb::new().await;
    let app = db.app();

    let payload = json!({"name": "Ada", "email": "ada@example.com", "status": "admin"});
    let (status, created) = call(&app, "POST", "/create-user", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().expect("id assigned");

    let (status, found) = call(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["name"], payload["name"]);
    assert_eq!(found["email"], payload["email"]);
    assert_eq!(found["status"], payload["status"]);
    assert_eq!(found, created);

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_defaults_status() {
    let db = TestDb::new().await;
    let app = db.app();

    let (status, created) = call(
        &app,
        "POST",
        "/create-user",
        Some(json!({"name": "Grace", "email": "grace@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "active");

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_then_find_is_404() {
    let db = TestDb::new().await;
    let app = db.app();

    let (_, created) = call(
        &app,
        "POST",
        "/create-user",
        Some(json!({"name": "Linus", "email": "linus@example.com"})),
    )
    .await;
    let uri = format!("/users/{}", created["id"]);

    let (status, body) = call(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 1);

    let (status, _) = call(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Second delete matches no row
    let (status, _) = call(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_changes_only_present_fields() {
    let db = TestDb::new().await;
    let app = db.app();

    let (_, created) = call(
        &app,
        "POST",
        "/create-user",
        Some(json!({"name": "Barbara", "email": "barbara@example.com"})),
    )
    .await;
    let uri = format!("/users/{}", created["id"]);

    let (status, updated) = call(&app, "PUT", &uri, Some(json!({"status": "disabled"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "Barbara");
    assert_eq!(updated["email"], "barbara@example.com");
    assert_eq!(updated["status"], "disabled");

    let (_, found) = call(&app, "GET", &uri, None).await;
    assert_eq!(found, updated);

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_missing_user_is_404() {
    let db = TestDb::new().await;
    let app = db.app();

    let (status, body) = call(&app, "PUT", "/users/999999", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "user '999999' not found");

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn find_unknown_id_is_404_and_malformed_is_400() {
    let db = TestDb::new().await;
    let app = db.app();

    let (status, _) = call(&app, "GET", "/users/424242", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "GET", "/users/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn empty_search_equals_list() {
    let db = TestDb::new().await;
    let app = db.app();

    for (name, email) in [("A", "a@example.com"), ("B", "b@example.com")] {
        call(&app, "POST", "/create-user", Some(json!({"name": name, "email": email}))).await;
    }

    let (status, listed) = call(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 2);

    let (status, searched) = call(&app, "POST", "/users/search", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(searched, listed);

    // No body at all behaves the same
    let (status, searched) = call(&app, "POST", "/users/search", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(searched, listed);

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn search_returns_matching_subset() {
    let db = TestDb::new().await;
    let app = db.app();

    let (_, matching) = call(
        &app,
        "POST",
        "/create-user",
        Some(json!({"name": "Ken", "email": "ken@example.com", "status": "active"})),
    )
    .await;
    call(
        &app,
        "POST",
        "/create-user",
        Some(json!({"name": "Dennis", "email": "dennis@example.com", "status": "disabled"})),
    )
    .await;

    let (status, found) = call(&app, "POST", "/users/search", Some(json!({"status": "active"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, json!([matching]));

    // Predicates combine with AND
    let (_, found) = call(
        &app,
        "POST",
        "/users/search",
        Some(json!({"status": "active", "name": "Dennis"})),
    )
    .await;
    assert_eq!(found, json!([]));

    // Values are bound, so quoting tricks match nothing
    let (status, found) = call(
        &app,
        "POST",
        "/users/search",
        Some(json!({"name": "x' OR '1'='1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, json!([]));

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn concurrent_creates_get_distinct_ids() {
    let db = TestDb::new().await;
    let app = db.app();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let body = json!({"name": format!("user-{i}"), "email": format!("user{i}@example.com")});
                call(&app, "POST", "/create-user", Some(body)).await
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        let (status, created) = handle.await.expect("task panicked");
        assert_eq!(status, StatusCode::CREATED);
        ids.push(created["id"].as_i64().unwrap());
    }

    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 8);

    db.cleanup().await;
}
