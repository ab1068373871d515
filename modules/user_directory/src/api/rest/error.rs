use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::rest::dto::MessageDto;
use crate::domain::error::DomainError;

/// HTTP error rendered as `{"message": ...}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(MessageDto::new(self.message))).into_response()
    }
}

/// Map domain error to an HTTP status and client-facing message
pub fn map_domain_error(e: &DomainError) -> ApiError {
    match e {
        DomainError::UserNotFound { id } => {
            ApiError::new(StatusCode::NOT_FOUND, format!("User with id:{id} not found"))
        }
        DomainError::NoUsersFound => ApiError::new(StatusCode::NOT_FOUND, "No users found"),
        DomainError::FullNameTaken { .. } => ApiError::new(StatusCode::CONFLICT, e.to_string()),
        DomainError::Validation { field, message } => {
            ApiError::bad_request(format!("Invalid {field}: {message}"))
        }
        DomainError::PageOutOfRange { .. } => ApiError::bad_request(e.to_string()),
        DomainError::UpstreamUnavailable { .. } => {
            tracing::error!(error = %e, "Enrichment providers unavailable");
            ApiError::new(
                StatusCode::BAD_GATEWAY,
                "Failed to request additional info for user",
            )
        }
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}
