//! Full register → login → access → logout flow, plus probes.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_login_access_logout() {
    let app = TestApp::new();

    let registered = app.register("a@x.com", "a", "secret1").await;
    assert_eq!(registered.status, StatusCode::CREATED);

    let login = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": "a@x.com", "password": "secret1" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    let token = login.session_token().expect("session cookie");

    let profile = app
        .request("GET", "/api/v1/user/profile", None, Some(&token))
        .await;
    assert_eq!(profile.status, StatusCode::OK);

    let logout = app
        .request("POST", "/api/v1/auth/logout", None, Some(&token))
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let after = app
        .request("GET", "/api/v1/user/profile", None, Some(&token))
        .await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_probes_report_draining() {
    let app = TestApp::new();

    let ready = app.request("GET", "/readyz", None, None).await;
    assert_eq!(ready.status, StatusCode::OK);
    assert_eq!(ready.body["status"], "ok");

    app.state.readiness.mark_draining();

    for path in ["/healthz", "/readyz"] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.body["status"], "draining");
    }

    let login = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": "a@x.com", "password": "secret1" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::SERVICE_UNAVAILABLE);
}
