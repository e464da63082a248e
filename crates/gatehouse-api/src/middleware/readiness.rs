//! Rejects API traffic once the process starts draining.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn readiness_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if state.readiness.is_draining() {
        return Err(ApiError::Draining);
    }
    Ok(next.run(request).await)
}
