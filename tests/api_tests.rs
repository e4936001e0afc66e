//! API integration tests
//!
//! Exercise the HTTP surface end to end against an in-memory store.

use axum_test::TestServer;
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

use tally::{
    auth::jwt::AuthService, db::Store, utils::config::TallyConfig, AppState,
};

const TEST_SECRET: &str = "test_jwt_secret_key_for_testing_only";

// ============= Test Helpers =============

/// Create the application state backed by an in-memory database
async fn create_test_state() -> AppState {
    let store = Store::new_memory()
        .await
        .expect("Failed to create in-memory database");

    let auth_service = AuthService::new(TEST_SECRET.to_string(), 3600);

    let mut config = TallyConfig::default();
    config.database.url = ":memory:".to_string();

    AppState {
        config: Arc::new(config),
        store: Arc::new(store),
        auth_service: Arc::new(auth_service),
    }
}

/// Create a test server over the full application router
async fn create_test_server() -> TestServer {
    let state = create_test_state().await;
    TestServer::new(tally::api::app(state)).expect("Failed to create test server")
}

/// Create a test server together with its state for store inspection
async fn create_test_server_with_state() -> (TestServer, AppState) {
    let state = create_test_state().await;
    let server =
        TestServer::new(tally::api::app(state.clone())).expect("Failed to create test server");
    (server, state)
}

/// Seed the demo accounts and return the response records
async fn seed_accounts(server: &TestServer) -> Vec<serde_json::Value> {
    let response = server.get("/api/accounts/seed").await;
    response.assert_status_ok();
    response.json()
}

/// Log in and return the bearer token
async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    body["token"].as_str().expect("token should be a string").to_string()
}

// ============= Health Check Tests =============

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server().await;

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
}

// ============= Account Seeding Tests =============

#[tokio::test]
async fn test_seed_accounts() {
    let server = create_test_server().await;

    let records = seed_accounts(&server).await;

    assert_eq!(records.len(), 3);
    let emails: Vec<&str> = records.iter().filter_map(|r| r["email"].as_str()).collect();
    assert_eq!(emails, vec!["admin@dci.de", "user1@dci.de", "user2@dci.de"]);

    for record in &records {
        assert!(record["id"].is_string());
        assert!(record["roles"].is_array());
    }

    assert_eq!(records[2]["roles"], json!(["Reader", "Editor"]));
}

#[tokio::test]
async fn test_seed_response_contains_no_secrets() {
    let server = create_test_server().await;

    let records = seed_accounts(&server).await;

    for record in &records {
        let obj = record.as_object().expect("record should be an object");
        assert!(
            !obj.contains_key("secret_hash") && !obj.contains_key("password"),
            "seed response must not leak secret material: {:?}",
            obj.keys().collect::<Vec<_>>()
        );
    }
}

#[tokio::test]
async fn test_seed_twice_creates_duplicates() {
    let server = create_test_server().await;

    // Seeding is not idempotent: a second call inserts a second set
    let first = seed_accounts(&server).await;
    let second = seed_accounts(&server).await;

    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 3);
    assert_ne!(
        first[0]["id"], second[0]["id"],
        "each seeding run generates fresh ids"
    );

    // Login still resolves to exactly one account
    login(&server, "admin@dci.de", "admin").await;
}

#[tokio::test]
async fn test_stored_hash_is_not_plaintext() {
    let (server, state) = create_test_server_with_state().await;

    seed_accounts(&server).await;

    let account = state
        .store
        .get_account_by_email("admin@dci.de")
        .await
        .expect("Query should succeed")
        .expect("Account should exist");

    assert_ne!(account.secret_hash, "admin");
    assert!(account.secret_hash.starts_with("$argon2"));

    // The stored hash verifies for exactly the original plaintext
    assert!(state
        .auth_service
        .verify_password("admin", &account.secret_hash)
        .unwrap());
    assert!(!state
        .auth_service
        .verify_password("Admin", &account.secret_hash)
        .unwrap());
}

// ============= Authentication Tests =============

#[tokio::test]
async fn test_login_success() {
    let server = create_test_server().await;

    let records = seed_accounts(&server).await;
    let admin_id = records[0]["id"].as_str().unwrap();

    let token = login(&server, "admin@dci.de", "admin").await;
    assert!(!token.is_empty());

    // Round-trip: the token decodes with the signing secret to the
    // account's identity claims
    let verifier = AuthService::new(TEST_SECRET.to_string(), 3600);
    let claims = verifier.verify_token(&token).expect("token should verify");
    assert_eq!(claims.sub, admin_id);
    assert_eq!(claims.email, "admin@dci.de");
}

#[tokio::test]
async fn test_login_response_shape() {
    let server = create_test_server().await;
    seed_accounts(&server).await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "user1@dci.de", "password": "pw1" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let obj = body.as_object().expect("body should be an object");
    assert_eq!(obj.len(), 1, "response carries exactly the token field");
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn test_login_token_rejected_by_other_secret() {
    let server = create_test_server().await;
    seed_accounts(&server).await;

    let token = login(&server, "admin@dci.de", "admin").await;

    let other = AuthService::new("a-completely-different-secret-value".to_string(), 3600);
    assert!(other.verify_token(&token).is_err());
}

#[rstest]
#[case::wrong_password("admin@dci.de", "wrong")]
#[case::unknown_email("nouser@dci.de", "admin")]
#[tokio::test]
async fn test_login_failure(#[case] email: &str, #[case] password: &str) {
    let server = create_test_server().await;
    seed_accounts(&server).await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;

    response.assert_status_unauthorized();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Authentication failed");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let server = create_test_server().await;
    seed_accounts(&server).await;

    // Wrong password for an existing account
    let wrong_secret = server
        .post("/api/auth/login")
        .json(&json!({ "email": "admin@dci.de", "password": "wrong" }))
        .await;

    // Identifier that was never seeded
    let unknown = server
        .post("/api/auth/login")
        .json(&json!({ "email": "nouser@dci.de", "password": "admin" }))
        .await;

    wrong_secret.assert_status_unauthorized();
    unknown.assert_status_unauthorized();

    // Byte-identical bodies: no user enumeration
    assert_eq!(wrong_secret.text(), unknown.text());
}

#[tokio::test]
async fn test_login_missing_fields() {
    let server = create_test_server().await;

    // Axum returns 422 for deserialization errors (missing fields)
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "admin@dci.de" }))
        .await;

    response.assert_status_unprocessable_entity();
}

#[tokio::test]
async fn test_login_before_seeding() {
    let server = create_test_server().await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "admin@dci.de", "password": "admin" }))
        .await;

    response.assert_status_unauthorized();
}

// ============= Task Tests =============

#[cfg(feature = "tasks")]
mod tasks {
    use super::*;

    #[tokio::test]
    async fn test_task_routes_require_auth() {
        let server = create_test_server().await;

        let response = server.get("/api/tasks").await;
        response.assert_status_unauthorized();

        let response = server
            .get("/api/tasks")
            .add_header("Authorization", "Bearer not.a.token")
            .await;
        response.assert_status_unauthorized();

        let response = server
            .get("/api/tasks")
            .add_header("Authorization", "Basic abc")
            .await;
        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_seed_tasks_for_account() {
        let server = create_test_server().await;

        let records = seed_accounts(&server).await;
        let admin_id = records[0]["id"].as_str().unwrap();

        // The task seeder is public bootstrap surface
        let response = server
            .get(&format!("/api/accounts/{}/tasks/seed", admin_id))
            .await;
        response.assert_status_ok();

        let tasks: Vec<serde_json::Value> = response.json();
        assert_eq!(tasks.len(), 3);

        let titles: Vec<&str> = tasks.iter().filter_map(|t| t["title"].as_str()).collect();
        assert_eq!(titles, vec!["Wake up", "Drink coffee", "Go to sleep"]);

        assert_eq!(tasks[0]["status"], "OPEN");
        assert_eq!(tasks[1]["status"], "IN_PROCESS");
        assert_eq!(tasks[2]["status"], "CANCELED");

        for task in &tasks {
            assert_eq!(task["owner"]["email"], "admin@dci.de");
        }
    }

    #[tokio::test]
    async fn test_seed_tasks_unknown_account() {
        let server = create_test_server().await;

        let response = server.get("/api/accounts/no-such-account/tasks/seed").await;
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_task_crud_flow() {
        let server = create_test_server().await;

        let records = seed_accounts(&server).await;
        let owner_id = records[1]["id"].as_str().unwrap();
        let token = login(&server, "user1@dci.de", "pw1").await;
        let bearer = format!("Bearer {}", token);

        // Create
        let response = server
            .post("/api/tasks")
            .add_header("Authorization", bearer.clone())
            .json(&json!({ "title": "Water the plants", "owner": owner_id }))
            .await;
        response.assert_status_ok();
        let created: serde_json::Value = response.json();
        let task_id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["status"], "OPEN");
        assert_eq!(created["owner"]["id"], owner_id);

        // List
        let response = server
            .get("/api/tasks")
            .add_header("Authorization", bearer.clone())
            .await;
        response.assert_status_ok();
        let listed: Vec<serde_json::Value> = response.json();
        assert!(listed.iter().any(|t| t["id"] == task_id.as_str()));

        // Update the status, keeping the title
        let response = server
            .patch(&format!("/api/tasks/{}", task_id))
            .add_header("Authorization", bearer.clone())
            .json(&json!({ "status": "ON_HOLD" }))
            .await;
        response.assert_status_ok();
        let updated: serde_json::Value = response.json();
        assert_eq!(updated["title"], "Water the plants");
        assert_eq!(updated["status"], "ON_HOLD");

        // Delete
        let response = server
            .delete(&format!("/api/tasks/{}", task_id))
            .add_header("Authorization", bearer.clone())
            .await;
        response.assert_status(axum::http::StatusCode::NO_CONTENT);

        // Gone now
        let response = server
            .patch(&format!("/api/tasks/{}", task_id))
            .add_header("Authorization", bearer)
            .json(&json!({ "status": "OPEN" }))
            .await;
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_create_task_unknown_owner() {
        let server = create_test_server().await;
        seed_accounts(&server).await;
        let token = login(&server, "admin@dci.de", "admin").await;

        let response = server
            .post("/api/tasks")
            .add_header("Authorization", format!("Bearer {}", token))
            .json(&json!({ "title": "Homeless task", "owner": "no-such-account" }))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_create_task_empty_title() {
        let server = create_test_server().await;
        let records = seed_accounts(&server).await;
        let owner_id = records[0]["id"].as_str().unwrap();
        let token = login(&server, "admin@dci.de", "admin").await;

        let response = server
            .post("/api/tasks")
            .add_header("Authorization", format!("Bearer {}", token))
            .json(&json!({ "title": "   ", "owner": owner_id }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_delete_unknown_task() {
        let server = create_test_server().await;
        seed_accounts(&server).await;
        let token = login(&server, "admin@dci.de", "admin").await;

        let response = server
            .delete("/api/tasks/no-such-task")
            .add_header("Authorization", format!("Bearer {}", token))
            .await;

        response.assert_status_not_found();
    }
}
