//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use chrono::Utc;
use serde_json::{Value, json};
use tower::ServiceExt;

use gatehouse_api::{AppState, build_app};
use gatehouse_auth::{MemoryStore, Stores};
use gatehouse_core::config::AppConfig;
use gatehouse_core::traits::ManualClock;

/// Registrations with this email receive the admin role.
pub const ADMIN_EMAIL: &str = "root@x.com";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for flipping readiness
    pub state: AppState,
    /// Backing store, for direct inspection
    pub store: MemoryStore,
    /// Controls session expiry
    pub clock: Arc<ManualClock>,
}

/// Defaults with cheap hashing and the reaper off.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.argon2_memory_kib = 1024;
    config.auth.argon2_iterations = 1;
    config.auth.argon2_parallelism = 1;
    config.auth.admin_emails = vec![ADMIN_EMAIL.to_string()];
    config.session.cleanup_enabled = false;
    config
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let state = AppState::new(
            Arc::new(test_config()),
            Stores::memory(store.clone()),
            clock.clone(),
        )
        .expect("Failed to build app state");
        let router = build_app(state.clone());

        Self {
            router,
            state,
            store,
            clock,
        }
    }

    /// Register an account with fixed names.
    pub async fn register(&self, email: &str, username: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/v1/auth/register",
            Some(json!({
                "email": email,
                "username": username,
                "first_name": "Test",
                "last_name": "User",
                "password": password,
            })),
            None,
        )
        .await
    }

    /// Login and return the session token from the cookie.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/v1/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .session_token()
            .expect("No session cookie in login response")
    }

    /// Register then login, returning the session token.
    pub async fn signup(&self, email: &str, username: &str, password: &str) -> String {
        let response = self.register(email, username, password).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );
        self.login(email, password).await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.raw_request(method, path, body_str, token).await
    }

    /// Like [`request`](Self::request) with a pre-serialized body.
    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        body: String,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/json")
            .header("user-agent", "gatehouse-tests");

        if let Some(token) = token {
            req = req.header(COOKIE, format!("session_token={token}"));
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("session_token="))
            .map(String::from);
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            set_cookie,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// The `session_token` Set-Cookie header, if any
    pub set_cookie: Option<String>,
}

impl TestResponse {
    /// Value of the session cookie that was set.
    pub fn session_token(&self) -> Option<String> {
        let header = self.set_cookie.as_deref()?;
        let pair = header.split(';').next()?;
        pair.strip_prefix("session_token=").map(String::from)
    }

    /// The `message` field of the body.
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}
