//! Registration, login, and logout over HTTP.

use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new();

    let response = app.register("a@x.com", "a", "secret1").await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.message(), "User created successfully");
    assert!(response.body["user_id"].as_str().is_some());
}

#[tokio::test]
async fn test_duplicate_email_and_username_look_identical() {
    let app = TestApp::new();
    app.register("a@x.com", "a", "secret1").await;

    let same_email = app.register("A@X.com", "b", "secret1").await;
    let same_username = app.register("b@x.com", "a", "secret1").await;

    assert_eq!(same_email.status, StatusCode::BAD_REQUEST);
    assert_eq!(same_email.body, same_username.body);
    assert_eq!(
        same_email.message(),
        "User already exists or failed to create"
    );
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let app = TestApp::new();

    let short_password = app.register("a@x.com", "a", "12345").await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);
    assert_eq!(short_password.message(), "Invalid request body");

    let bad_email = app.register("not-an-email", "a", "secret1").await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_email.message(), "Invalid request body");

    let malformed = app
        .raw_request(
            "POST",
            "/api/v1/auth/register",
            "{not json".to_string(),
            None,
        )
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.message(), "Invalid request body");
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = TestApp::new();
    app.register("a@x.com", "a", "secret1").await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": "a@x.com", "password": "secret1" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Login successful");
    assert_eq!(response.body["user"]["email"], "a@x.com");
    assert_eq!(response.body["user"]["role"], "user");
    assert!(response.body["user"].get("password_hash").is_none());

    let cookie = response.set_cookie.clone().expect("session cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Expires="));
    assert_eq!(response.session_token().map(|t| t.len()), Some(64));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.register("a@x.com", "a", "secret1").await;
    app.register("b@x.com", "b", "secret1").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": "a@x.com", "password": "wrong-one" })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": "nobody@x.com", "password": "secret1" })),
            None,
        )
        .await;

    let admin = app.signup("root@x.com", "root", "secret1").await;
    let users = app
        .request("GET", "/api/v1/admin/users", None, Some(&admin))
        .await;
    let b_id = users.body["users"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["email"] == "b@x.com")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();
    app.request(
        "PATCH",
        &format!("/api/v1/admin/users/{b_id}/status"),
        Some(json!({ "is_active": false })),
        Some(&admin),
    )
    .await;
    let inactive = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": "b@x.com", "password": "secret1" })),
            None,
        )
        .await;

    for response in [&wrong_password, &unknown_email, &inactive] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert!(response.set_cookie.is_none());
    }
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.body, inactive.body);
    assert_eq!(wrong_password.message(), "Invalid credentials");
}

#[tokio::test]
async fn test_logout_without_cookie_requires_authentication() {
    let app = TestApp::new();

    let response = app.request("POST", "/api/v1/auth/logout", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Authentication required");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new();
    let token = app.signup("a@x.com", "a", "secret1").await;

    let response = app
        .request("POST", "/api/v1/auth/logout", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Logout successful");
    assert_eq!(response.session_token().as_deref(), Some(""));
    assert_eq!(app.store.session_count().await, 0);
}

#[tokio::test]
async fn test_logout_with_unknown_token_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/v1/auth/logout", None, Some("deadbeef"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Invalid session");
    assert!(response.set_cookie.is_none());
}

#[tokio::test]
async fn test_logout_with_expired_token_is_rejected() {
    let app = TestApp::new();
    let token = app.signup("a@x.com", "a", "secret1").await;

    app.clock.advance(Duration::hours(25));
    let response = app
        .request("POST", "/api/v1/auth/logout", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Session expired");
}

#[tokio::test]
async fn test_logout_twice_is_rejected_the_second_time() {
    let app = TestApp::new();
    let token = app.signup("a@x.com", "a", "secret1").await;

    let first = app
        .request("POST", "/api/v1/auth/logout", None, Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request("POST", "/api/v1/auth/logout", None, Some(&token))
        .await;
    assert_eq!(second.status, StatusCode::UNAUTHORIZED);
    assert_eq!(second.message(), "Invalid session");
}
