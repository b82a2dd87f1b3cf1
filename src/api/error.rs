//! API error type
//!
//! Every failure leaves the server as `(status, {"msg": ...})`. Internal
//! details are logged, never returned.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::services::{
    ArticleServiceError, ArticleTagServiceError, TagServiceError, UserServiceError,
};

const INTERNAL_MSG: &str = "an internal error occurred";
const UNAVAILABLE_MSG: &str = "database unavailable";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed input (400)
    Validation(String),
    /// Uniqueness conflict, reported as a bad request (400)
    Conflict(String),
    /// Resource not found (404)
    NotFound(String),
    /// Store unreachable or request timed out (503)
    Unavailable(String),
    /// Anything else (500, logged)
    Internal(String),
}

impl ApiError {
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal_error(err: &anyhow::Error) -> Self {
        Self::Internal(format!("{:#}", err))
    }

    fn store_unavailable(err: &anyhow::Error) -> Self {
        tracing::warn!("Store unavailable: {:#}", err);
        Self::Unavailable(UNAVAILABLE_MSG.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match self {
            Self::Validation(msg)
            | Self::Conflict(msg)
            | Self::NotFound(msg)
            | Self::Unavailable(msg) => msg,
            Self::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                INTERNAL_MSG.to_string()
            }
        };

        (status, Json(json!({ "msg": msg }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<UserServiceError> for ApiError {
    fn from(e: UserServiceError) -> Self {
        match e {
            UserServiceError::ValidationError(msg) => Self::Validation(msg),
            UserServiceError::EmailTaken(_) => Self::Conflict("email already exists".to_string()),
            UserServiceError::Unavailable(err) => Self::store_unavailable(&err),
            UserServiceError::InternalError(err) => Self::internal_error(&err),
        }
    }
}

impl From<TagServiceError> for ApiError {
    fn from(e: TagServiceError) -> Self {
        match e {
            TagServiceError::ValidationError(msg) => Self::Validation(msg),
            TagServiceError::Unavailable(err) => Self::store_unavailable(&err),
            TagServiceError::InternalError(err) => Self::internal_error(&err),
        }
    }
}

impl From<ArticleServiceError> for ApiError {
    fn from(e: ArticleServiceError) -> Self {
        match e {
            ArticleServiceError::NotFound(msg) => Self::NotFound(msg),
            ArticleServiceError::ValidationError(msg) => Self::Validation(msg),
            ArticleServiceError::Unavailable(err) => Self::store_unavailable(&err),
            ArticleServiceError::InternalError(err) => Self::internal_error(&err),
        }
    }
}

impl From<ArticleTagServiceError> for ApiError {
    fn from(e: ArticleTagServiceError) -> Self {
        match e {
            ArticleTagServiceError::ValidationError(msg) => Self::Validation(msg),
            ArticleTagServiceError::Unavailable(err) => Self::store_unavailable(&err),
            ArticleTagServiceError::InternalError(err) => Self::internal_error(&err),
        }
    }
}
