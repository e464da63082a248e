//! Route definitions for the Gatehouse HTTP API.
//!
//! Application routes are mounted under `/api/v1`; probes live at the root.
//! Protected groups carry their checkpoints as route layers, so the outermost
//! (authentication) runs before the role check.

use std::time::Duration;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, patch, post, put},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use gatehouse_entity::user::UserRole;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes(&state))
        .merge(user_routes(&state))
        .merge(admin_routes(&state))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::readiness::readiness_gate,
        ));

    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api/v1", api_routes)
        .merge(health_routes())
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Auth endpoints. Register and login are public; logout needs a live session.
fn auth_routes(state: &AppState) -> Router<AppState> {
    let logout = Router::new()
        .route("/auth/logout", post(handlers::auth::logout))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_authentication,
        ));

    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .merge(logout)
}

/// Self-service profile endpoints (authentication required).
fn user_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/user/profile",
            get(handlers::user::get_profile)
                .put(handlers::user::update_profile)
                .delete(handlers::user::delete_account),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_authentication,
        ))
}

/// Admin endpoints (authentication + admin role required).
fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(handlers::admin::list_users))
        .route("/admin/users/{id}", get(handlers::admin::get_user))
        .route(
            "/admin/users/{id}/status",
            patch(handlers::admin::update_status),
        )
        .route("/admin/users/{id}/role", put(handlers::admin::update_role))
        .route_layer(axum_middleware::from_fn_with_state(
            UserRole::Admin,
            middleware::rbac::require_role,
        ))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_authentication,
        ))
}

/// Liveness and readiness probes.
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(handlers::health::health))
        .route("/readyz", get(handlers::health::health))
}
