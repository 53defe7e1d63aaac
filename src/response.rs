use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::{Deserialize, Serialize};

use crate::pagination::Meta;

/// JSON envelope shared by every course endpoint, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::OK, message, Some(data), None)
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::CREATED, message, Some(data), None)
    }

    pub fn paginated(message: impl Into<String>, data: T, meta: Meta) -> Self {
        Self::with_status(StatusCode::OK, message, Some(data), Some(meta))
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::OK, message, None, None)
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self::with_status(status, message, None, None)
    }

    fn with_status(
        status: StatusCode,
        message: impl Into<String>,
        data: Option<T>,
        meta: Option<Meta>,
    ) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data,
            meta,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
