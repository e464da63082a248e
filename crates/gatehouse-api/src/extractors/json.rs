//! JSON body extractor that also runs `validator` rules.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

use crate::error::ApiError;

/// Like [`Json`], but rejects with a generic 400 on parse or validation
/// failure.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            debug!(error = %e, "Rejected request body");
            ApiError::InvalidBody
        })?;
        value.validate().map_err(|e| {
            debug!(error = %e, "Request body failed validation");
            ApiError::InvalidBody
        })?;
        Ok(ValidatedJson(value))
    }
}
