//! Role checkpoint and admin user management.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{ADMIN_EMAIL, TestApp};

const USERS: &str = "/api/v1/admin/users";

fn user_id(app_body: &serde_json::Value, email: &str) -> String {
    app_body["users"]
        .as_array()
        .expect("users array")
        .iter()
        .find(|u| u["email"] == email)
        .and_then(|u| u["id"].as_str())
        .expect("user present")
        .to_string()
}

#[tokio::test]
async fn test_admin_routes_require_authentication() {
    let app = TestApp::new();

    let response = app.request("GET", USERS, None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Authentication required");
}

#[tokio::test]
async fn test_non_admin_is_denied() {
    let app = TestApp::new();
    let token = app.signup("a@x.com", "a", "secret1").await;

    let response = app.request("GET", USERS, None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.message(), "Access denied");
}

#[tokio::test]
async fn test_admin_lists_users() {
    let app = TestApp::new();
    app.register("a@x.com", "a", "secret1").await;
    let admin = app.signup(ADMIN_EMAIL, "root", "secret1").await;

    let response = app.request("GET", USERS, None, Some(&admin)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total"], 2);
    assert_eq!(response.body["users"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_get_user_by_id() {
    let app = TestApp::new();
    app.register("a@x.com", "a", "secret1").await;
    let admin = app.signup(ADMIN_EMAIL, "root", "secret1").await;
    let list = app.request("GET", USERS, None, Some(&admin)).await;
    let id = user_id(&list.body, "a@x.com");

    let found = app
        .request("GET", &format!("{USERS}/{id}"), None, Some(&admin))
        .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["username"], "a");

    let missing = app
        .request(
            "GET",
            &format!("{USERS}/{}", uuid::Uuid::new_v4()),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deactivation_revokes_live_sessions() {
    let app = TestApp::new();
    let member = app.signup("a@x.com", "a", "secret1").await;
    let admin = app.signup(ADMIN_EMAIL, "root", "secret1").await;
    let list = app.request("GET", USERS, None, Some(&admin)).await;
    let id = user_id(&list.body, "a@x.com");

    let response = app
        .request(
            "PATCH",
            &format!("{USERS}/{id}/status"),
            Some(json!({ "is_active": false })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["is_active"], false);

    let profile = app
        .request("GET", "/api/v1/user/profile", None, Some(&member))
        .await;
    assert_eq!(profile.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_promotion_grants_admin_access() {
    let app = TestApp::new();
    let member = app.signup("a@x.com", "a", "secret1").await;
    let admin = app.signup(ADMIN_EMAIL, "root", "secret1").await;
    let list = app.request("GET", USERS, None, Some(&admin)).await;
    let id = user_id(&list.body, "a@x.com");

    let response = app
        .request(
            "PUT",
            &format!("{USERS}/{id}/role"),
            Some(json!({ "role": "admin" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["role"], "admin");

    // Role is resolved from the user record on every request.
    let listed = app.request("GET", USERS, None, Some(&member)).await;
    assert_eq!(listed.status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_cannot_demote_self() {
    let app = TestApp::new();
    let admin = app.signup(ADMIN_EMAIL, "root", "secret1").await;
    let list = app.request("GET", USERS, None, Some(&admin)).await;
    let id = user_id(&list.body, ADMIN_EMAIL);

    let response = app
        .request(
            "PUT",
            &format!("{USERS}/{id}/role"),
            Some(json!({ "role": "user" })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
