//! Integration tests for registration and login

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn register_success() {
    let app = common::TestApp::new().await;

    let username = format!("regtest{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);
    let body = json!({
        "username": username,
        "password": "S3curePassword!",
        "email": format!("{}@example.com", username),
        "birthday": "1990-01-01",
    });

    let (status, response) = app.post("/api/v1/users", &body.to_string(), None).await;

    assert_eq!(status, StatusCode::CREATED);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["username"], username.as_str());
    assert_eq!(response["birthday"], "1990-01-01");
    // The hash must never leak into the response
    assert!(response.get("password").is_none());
    assert!(response.get("password_hash").is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn register_duplicate_username() {
    let app = common::TestApp::new().await;

    let username = format!("dup{}", &uuid::Uuid::new_v4().simple().to_string()[..10]);
    let body = json!({
        "username": username,
        "password": "S3curePassword!",
        "email": format!("{}@example.com", username),
    });

    let (status, _) = app.post("/api/v1/users", &body.to_string(), None).await;
    assert_eq!(status, StatusCode::CREATED);

    // Same username, different email
    let body = json!({
        "username": username,
        "password": "S3curePassword!",
        "email": format!("other-{}@example.com", username),
    });
    let (status, _) = app.post("/api/v1/users", &body.to_string(), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn register_rejects_bad_input() {
    let app = common::TestApp::new().await;

    // Username too short
    let body = json!({
        "username": "bob",
        "password": "S3curePassword!",
        "email": "bob@example.com",
    });
    let (status, _) = app.post("/api/v1/users", &body.to_string(), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Password with spaces
    let body = json!({
        "username": "validname",
        "password": "open sesame",
        "email": "validname@example.com",
    });
    let (status, _) = app.post("/api/v1/users", &body.to_string(), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Invalid email
    let body = json!({
        "username": "validname",
        "password": "S3curePassword!",
        "email": "not-an-email",
    });
    let (status, _) = app.post("/api/v1/users", &body.to_string(), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn login_returns_token_and_profile() {
    let app = common::TestApp::new().await;

    let username = format!("login{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);
    let body = json!({
        "username": username,
        "password": "S3curePassword!",
        "email": format!("{}@example.com", username),
    });
    let (status, _) = app.post("/api/v1/users", &body.to_string(), None).await;
    assert_eq!(status, StatusCode::CREATED);

    let body = json!({ "username": username, "password": "S3curePassword!" });
    let (status, response) = app.post("/api/v1/login", &body.to_string(), None).await;

    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(!response["token"].as_str().unwrap().is_empty());
    assert_eq!(response["token_type"], "Bearer");
    assert_eq!(response["user"]["username"], username.as_str());
}

#[tokio::test]
#[ignore = "requires database"]
async fn login_failures_are_indistinguishable() {
    let app = common::TestApp::new().await;

    let username = format!("alice{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);
    let body = json!({
        "username": username,
        "password": "S3curePassword!",
        "email": format!("{}@example.com", username),
    });
    let (status, _) = app.post("/api/v1/users", &body.to_string(), None).await;
    assert_eq!(status, StatusCode::CREATED);

    // Wrong password for a known user
    let body = json!({ "username": username, "password": "wrongpassword" });
    let (bad_pass_status, bad_pass_body) =
        app.post("/api/v1/login", &body.to_string(), None).await;

    // Unknown user entirely
    let body = json!({ "username": "nosuchuser123", "password": "whatever1" });
    let (unknown_status, unknown_body) = app.post("/api/v1/login", &body.to_string(), None).await;

    assert_eq!(bad_pass_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    // Same body for both so the API cannot be used to enumerate users
    assert_eq!(bad_pass_body, unknown_body);
}

#[tokio::test]
#[ignore = "requires database"]
async fn issued_token_grants_access_to_protected_routes() {
    let app = common::TestApp::new().await;

    let username = format!("bearer{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);
    let token = app.register_and_login(&username, "S3curePassword!").await;

    let (status, _) = app.get("/api/v1/movies", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get("/api/v1/movies", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
