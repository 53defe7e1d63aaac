use axum::{http::StatusCode, response::{IntoResponse, Response}};
use thiserror::Error;

use crate::response::ApiResponse;

/// Everything that can go wrong while validating or executing a course operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourseError {
    #[error("name is required")]
    NameRequired,

    #[error("start date is required")]
    StartDateRequired,

    #[error("end date is required")]
    EndDateRequired,

    #[error("start date is invalid")]
    InvalidStartDate,

    #[error("end date is invalid")]
    InvalidEndDate,

    #[error("end date is earlier than start date")]
    EndBeforeStart,

    #[error("course '{id}' doesn't exist")]
    NotFound { id: String },

    /// Storage or runtime failure. The detail is for logs only.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for CourseError {
    fn from(err: sqlx::Error) -> Self {
        CourseError::Internal(err.to_string())
    }
}

/// Externally visible failure categories.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    InternalServerError,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::InternalServerError => "internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ApiResponse::<()>::error(self.status_code(), self.message()).into_response()
    }
}
