//! Error Handling
//!
//! The centralized error type every failure funnels into, and its
//! translation into the uniform response envelope. Expected failures are
//! modeled as explicit variants; infrastructure failures collapse to a
//! generic 500 so internals never leak to clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::response::ApiResponse;
use crate::utils::messages;

/// A single validation failure, addressed by the field that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: &str, message: &str) -> Self {
        Self {
            path: path.to_string(),
            message: message.to_string(),
        }
    }
}

/// Application error taxonomy, mapped onto HTTP statuses in `into_response`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed input that never reached schema validation (bad JSON,
    /// missing required header)
    #[error("{0}")]
    BadRequest(String),

    /// Schema validation failure with itemized field errors
    #[error("Validation error")]
    Validation(Vec<FieldError>),

    /// Missing, malformed, or expired credentials
    #[error("{0}")]
    Authentication(String),

    /// Valid credentials, insufficient role
    #[error("{0}")]
    Forbidden(String),

    /// Lookup miss
    #[error("{0}")]
    NotFound(String),

    /// Business-rule conflict such as a duplicate email
    #[error("{0}")]
    Conflict(String),

    /// Request quota exceeded
    #[error("{0}")]
    RateLimited(String),

    /// Store-layer failure; surfaced as a generic 500
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failure; surfaced as a generic 500
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Anything else unexpected; surfaced as a generic 500
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiResponse::failure(&msg))
            }
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::failure_with_errors(messages::VALIDATION_ERROR, errors),
            ),
            ApiError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ApiResponse::failure(&msg))
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, ApiResponse::failure(&msg)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiResponse::failure(&msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ApiResponse::failure(&msg)),
            ApiError::RateLimited(msg) => {
                (StatusCode::TOO_MANY_REQUESTS, ApiResponse::failure(&msg))
            }
            ApiError::Database(err) => {
                log::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure(messages::INTERNAL_SERVER_ERROR),
                )
            }
            ApiError::Hashing(err) => {
                log::error!("Password hashing error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure(messages::INTERNAL_SERVER_ERROR),
                )
            }
            ApiError::Internal(msg) => {
                log::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure(messages::INTERNAL_SERVER_ERROR),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Convert a snake_case field name to its camelCase wire form
fn wire_field_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Sort fields for a stable error order; per-field rule order is
        // preserved as declared on the DTO.
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let mut collected = Vec::new();
        for (field, field_errors) in fields {
            let path = wire_field_name(field);
            for error in field_errors {
                let message = error
                    .message
                    .as_deref()
                    .map(str::to_string)
                    .unwrap_or_else(|| error.code.to_string());
                collected.push(FieldError {
                    path: path.clone(),
                    message,
                });
            }
        }

        ApiError::Validation(collected)
    }
}

/// Result type alias for handler and middleware code
pub type ApiResult<T> = Result<T, ApiError>;
