//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use muslimnet_core::auth::AuthError;
use muslimnet_storage::StorageError;
use serde::Serialize;
use thiserror::Error;

/// API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication required.
    #[error("authentication required")]
    Unauthorized,

    /// Invalid credentials.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Session expired.
    #[error("session expired")]
    SessionExpired,

    /// The caller lacks the required role.
    #[error("insufficient permissions")]
    Forbidden,

    /// The caller's account is banned.
    #[error("account is banned: {0}")]
    Banned(String),

    /// The caller's account is deactivated.
    #[error("account is inactive")]
    Inactive,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Resource already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(StorageError),

    /// Auth error.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(what) => ApiError::NotFound(what),
            StorageError::Conflict(what) => ApiError::Conflict(what),
            StorageError::Banned(id) => ApiError::Banned(format!("user {}", id)),
            StorageError::Workflow(e) => ApiError::BadRequest(e.to_string()),
            other => ApiError::Storage(other),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            ApiError::SessionExpired => (StatusCode::UNAUTHORIZED, "session_expired"),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            ApiError::Banned(_) => (StatusCode::FORBIDDEN, "banned"),
            ApiError::Inactive => (StatusCode::FORBIDDEN, "inactive"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            ApiError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
            ApiError::Auth(AuthError::PasswordEmpty | AuthError::PasswordTooShort) => {
                (StatusCode::BAD_REQUEST, "invalid_password")
            }
            ApiError::Auth(_) => (StatusCode::INTERNAL_SERVER_ERROR, "auth_error"),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
