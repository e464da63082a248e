//! Authentication checkpoint and profile endpoints.

use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;

use crate::helpers::TestApp;

const PROFILE: &str = "/api/v1/user/profile";

#[tokio::test]
async fn test_missing_cookie_requires_authentication() {
    let app = TestApp::new();

    let response = app.request("GET", PROFILE, None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Authentication required");
}

#[tokio::test]
async fn test_unknown_token_is_invalid_session() {
    let app = TestApp::new();

    let response = app.request("GET", PROFILE, None, Some("0123abcd")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Invalid session");
}

#[tokio::test]
async fn test_session_expires_after_validity_window() {
    let app = TestApp::new();
    let token = app.signup("a@x.com", "a", "secret1").await;

    app.clock.advance(Duration::hours(24) - Duration::seconds(1));
    let still_valid = app.request("GET", PROFILE, None, Some(&token)).await;
    assert_eq!(still_valid.status, StatusCode::OK);

    app.clock.advance(Duration::seconds(1));
    let expired = app.request("GET", PROFILE, None, Some(&token)).await;
    assert_eq!(expired.status, StatusCode::UNAUTHORIZED);
    assert_eq!(expired.message(), "Session expired");

    // The expired record was removed on access.
    assert_eq!(app.store.session_count().await, 0);
    let again = app.request("GET", PROFILE, None, Some(&token)).await;
    assert_eq!(again.message(), "Invalid session");
}

#[tokio::test]
async fn test_get_profile() {
    let app = TestApp::new();
    let token = app.signup("a@x.com", "a", "secret1").await;

    let response = app.request("GET", PROFILE, None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "a@x.com");
    assert_eq!(response.body["username"], "a");
    assert_eq!(response.body["is_active"], true);
    assert!(response.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_update_profile_partially() {
    let app = TestApp::new();
    let token = app.signup("a@x.com", "a", "secret1").await;

    let response = app
        .request(
            "PUT",
            PROFILE,
            Some(json!({ "first_name": "Ada" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Profile updated successfully");

    let profile = app.request("GET", PROFILE, None, Some(&token)).await;
    assert_eq!(profile.body["first_name"], "Ada");
    assert_eq!(profile.body["last_name"], "User");
    assert_eq!(profile.body["username"], "a");
}

#[tokio::test]
async fn test_update_to_taken_username_conflicts() {
    let app = TestApp::new();
    app.register("a@x.com", "a", "secret1").await;
    let token = app.signup("b@x.com", "b", "secret1").await;

    let response = app
        .request("PUT", PROFILE, Some(json!({ "username": "A" })), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_account_ends_sessions() {
    let app = TestApp::new();
    let token = app.signup("a@x.com", "a", "secret1").await;
    let second = app.login("a@x.com", "secret1").await;

    let response = app.request("DELETE", PROFILE, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "User deleted successfully");
    assert_eq!(response.session_token().as_deref(), Some(""));

    let after = app.request("GET", PROFILE, None, Some(&second)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);

    let login = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": "a@x.com", "password": "secret1" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);
}
