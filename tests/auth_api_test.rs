//! Authentication and user directory integration tests

mod common;

use axum::http::StatusCode;
use common::spawn_app;
use serde_json::{json, Value};

fn signup_body(username: &str, email: &str) -> Value {
    json!({
        "username": username,
        "email": email,
        "password": "hunter2!",
    })
}

#[tokio::test]
async fn signup_returns_token_and_sanitized_user() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&signup_body("alice", "alice@example.com"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "alice@example.com");
    // Password material must not leak into the response.
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn signup_rejects_duplicate_email() {
    let app = spawn_app();

    app.server
        .post("/api/auth/signup")
        .json(&signup_body("alice", "alice@example.com"))
        .await;

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&signup_body("alice2", "alice@example.com"))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "User already exists, please sign in");
}

#[tokio::test]
async fn signup_rejects_blank_fields() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&json!({ "username": "  ", "email": "a@b.c", "password": "x" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_round_trip() {
    let app = spawn_app();

    app.server
        .post("/api/auth/signup")
        .json(&signup_body("bob", "bob@example.com"))
        .await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "bob@example.com", "password": "hunter2!" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["username"], "bob");
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = spawn_app();

    app.server
        .post("/api/auth/signup")
        .json(&signup_body("bob", "bob@example.com"))
        .await;

    let wrong_password = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "bob@example.com", "password": "wrong" }))
        .await;
    let unknown_email = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": "hunter2!" }))
        .await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status_code(), StatusCode::UNAUTHORIZED);

    let a: Value = wrong_password.json();
    let b: Value = unknown_email.json();
    assert_eq!(a["error"], b["error"]);
}

#[tokio::test]
async fn me_requires_and_honors_bearer_token() {
    let app = spawn_app();

    let unauthenticated = app.server.get("/api/auth/me").await;
    assert_eq!(unauthenticated.status_code(), StatusCode::UNAUTHORIZED);

    let signup: Value = app
        .server
        .post("/api/auth/signup")
        .json(&signup_body("carol", "carol@example.com"))
        .await
        .json();
    let token = signup["token"].as_str().unwrap();

    let response = app
        .server
        .get("/api/auth/me")
        .add_header("Authorization", format!("Bearer {token}"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["email"], "carol@example.com");
}

#[tokio::test]
async fn me_rejects_garbage_token() {
    let app = spawn_app();

    let response = app
        .server
        .get("/api/auth/me")
        .add_header("Authorization", "Bearer not-a-jwt")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_directory_lists_and_searches() {
    let app = spawn_app();

    app.server
        .post("/api/auth/signup")
        .json(&signup_body("alice", "alice@example.com"))
        .await;
    app.server
        .post("/api/auth/signup")
        .json(&signup_body("bob", "bob@example.com"))
        .await;

    let all: Value = app.server.get("/api/users").await.json();
    assert_eq!(all.as_array().unwrap().len(), 2);

    let found: Value = app
        .server
        .get("/api/users/search")
        .add_query_param("q", "ali")
        .await
        .json();
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["username"], "alice");
}

#[tokio::test]
async fn get_user_by_id() {
    let app = spawn_app();

    let signup: Value = app
        .server
        .post("/api/auth/signup")
        .json(&signup_body("dave", "dave@example.com"))
        .await
        .json();
    let id = signup["user"]["id"].as_str().unwrap();

    let response = app.server.get(&format!("/api/users/{id}")).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["username"], "dave");

    let missing = app
        .server
        .get(&format!("/api/users/{}", uuid::Uuid::new_v4()))
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}
