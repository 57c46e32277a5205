use api::{ExerciseError, ValidationError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures as the client sees them. Only two error bodies ever leave the
/// server: `{"Error": "Invalid request"}` and `{"Error": "Not found"}`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Invalid request")]
    InvalidRequest,

    #[error("Not found")]
    NotFound,

    #[error("Internal error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorBody {
    #[serde(rename = "Error")]
    error: &'static str,
}

impl ApiError {
    /// Create and update: a store that refuses the record is reported as a
    /// bad request, only a missing id is distinguished.
    pub fn on_write(err: ExerciseError) -> Self {
        match err {
            ExerciseError::ExerciseNotFoundError => ApiError::NotFound,
            _ => ApiError::InvalidRequest,
        }
    }

    /// Get, list and delete: absence is a 404, anything else failed the request.
    pub fn on_read(err: ExerciseError) -> Self {
        match err {
            ExerciseError::ExerciseNotFoundError => ApiError::NotFound,
            e => {
                tracing::error!("request failed: {}", e);
                ApiError::Internal
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        tracing::debug!("rejected candidate: {}", err);
        ApiError::InvalidRequest
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidRequest => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: "Invalid request",
                }),
            )
                .into_response(),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody { error: "Not found" }),
            )
                .into_response(),
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
