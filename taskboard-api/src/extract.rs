/// Request extractors
///
/// Both extractors reject bad input with an [`ApiError`] so every 400 the
/// API returns has the same JSON shape, and handlers only ever see input that
/// already passed validation.

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Json, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use taskboard_shared::models::TaskId;
use validator::Validate;

/// JSON body that is deserialized and then validated
///
/// Syntax errors, type mismatches and a missing `Content-Type` all become
/// `400 bad_request`; field rule failures become `400 validation_error`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// Task ID taken from the `:id` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskIdPath(pub TaskId);

#[async_trait]
impl<S> FromRequestParts<S> for TaskIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        raw.parse::<TaskId>()
            .map(TaskIdPath)
            .map_err(|_| ApiError::BadRequest(format!("Invalid task id: {}", raw)))
    }
}
