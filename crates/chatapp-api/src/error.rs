use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Request-level failures. Every handler error funnels through here and is
/// mapped to a status plus a JSON `{error}` body; nothing is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("user already exists")]
    DuplicateUser,
    #[error("storage failure")]
    Storage(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Storage(e) = &self {
            error!("storage error: {e:#}");
        }

        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            // Duplicate signups surface as 500, matching the contract the
            // existing clients were written against.
            Self::DuplicateUser | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
