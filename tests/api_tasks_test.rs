//! Task API integration tests
//!
//! Exercises the mutation surface: validation before storage, partial
//! updates, set-semantic collaborator adds, and the delete path.

mod common;

use axum::http::StatusCode;
use common::{create_task_body, spawn_app};
use pretty_assertions::assert_eq;
use uuid::Uuid;

#[tokio::test]
async fn create_task_returns_created_record() {
    let app = spawn_app();
    let owner = Uuid::new_v4();

    let response = app
        .server
        .post("/api/tasks")
        .json(&create_task_body(owner, "Write spec"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["title"], "Write spec");
    assert_eq!(body["ownerId"], owner.to_string());
    assert_eq!(body["priority"], "Low");
    assert_eq!(body["status"], "Pending");
    assert_eq!(body["collaborators"], serde_json::json!([]));
}

#[tokio::test]
async fn create_task_without_title_is_rejected_before_storage() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/tasks")
        .json(&serde_json::json!({ "userId": Uuid::new_v4().to_string() }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    // Error string existing clients display verbatim.
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "User ID and Task name are required");
    // The store was never consulted.
    assert_eq!(app.tasks.task_count().await, 0);
}

#[tokio::test]
async fn create_task_with_malformed_owner_id_is_rejected() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/tasks")
        .json(&serde_json::json!({ "userId": "not-a-uuid", "title": "x" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(app.tasks.task_count().await, 0);
}

#[tokio::test]
async fn update_task_applies_partial_changes() {
    let app = spawn_app();
    let owner = Uuid::new_v4();

    let created: serde_json::Value = app
        .server
        .post("/api/tasks")
        .json(&create_task_body(owner, "Write spec"))
        .await
        .json();
    let id = created["id"].as_str().unwrap();

    let response = app
        .server
        .put(&format!("/api/tasks/{id}"))
        .json(&serde_json::json!({ "status": "In Progress" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "In Progress");
    // Untouched fields survive.
    assert_eq!(body["title"], "Write spec");
}

#[tokio::test]
async fn update_unknown_task_is_not_found() {
    let app = spawn_app();

    let response = app
        .server
        .put(&format!("/api/tasks/{}", Uuid::new_v4()))
        .json(&serde_json::json!({ "title": "x" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_collaborators_merges_as_a_set() {
    let app = spawn_app();
    let owner = Uuid::new_v4();
    let u2 = Uuid::new_v4();
    let u3 = Uuid::new_v4();

    let created: serde_json::Value = app
        .server
        .post("/api/tasks")
        .json(&serde_json::json!({
            "userId": owner.to_string(),
            "title": "Shared task",
            "collaborators": [u2],
        }))
        .await
        .json();
    let id = created["id"].as_str().unwrap();

    // u2 again plus u3: the union must not duplicate u2.
    let response = app
        .server
        .put(&format!("/api/tasks/{id}/collaborators"))
        .json(&serde_json::json!({ "collaborators": [u2, u3] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    let collaborators = body["collaborators"].as_array().unwrap();
    assert_eq!(collaborators.len(), 2);
}

#[tokio::test]
async fn delete_task_then_fetch_is_not_found() {
    let app = spawn_app();
    let owner = Uuid::new_v4();

    let created: serde_json::Value = app
        .server
        .post("/api/tasks")
        .json(&create_task_body(owner, "Ephemeral"))
        .await
        .json();
    let id = created["id"].as_str().unwrap();

    let response = app.server.delete(&format!("/api/tasks/{id}")).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app.server.get(&format!("/api/task/{id}")).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn task_listing_covers_ownership_and_collaboration() {
    let app = spawn_app();
    let owner = Uuid::new_v4();
    let collaborator = Uuid::new_v4();

    app.server
        .post("/api/tasks")
        .json(&serde_json::json!({
            "userId": owner.to_string(),
            "title": "Shared",
            "collaborators": [collaborator],
        }))
        .await;
    app.server
        .post("/api/tasks")
        .json(&create_task_body(owner, "Private"))
        .await;

    let owned: Vec<serde_json::Value> = app
        .server
        .get(&format!("/api/tasks/{owner}"))
        .await
        .json();
    assert_eq!(owned.len(), 2);

    let shared: Vec<serde_json::Value> = app
        .server
        .get(&format!("/api/tasks/{collaborator}"))
        .await
        .json();
    assert_eq!(shared.len(), 1);

    let collaborated: Vec<serde_json::Value> = app
        .server
        .get(&format!("/api/tasks/collaborated/{collaborator}"))
        .await
        .json();
    assert_eq!(collaborated.len(), 1);
    assert_eq!(collaborated[0]["title"], "Shared");
}
