//! Response Envelope
//!
//! Every endpoint, success or failure, answers with the same JSON shape:
//! `{success, message, data, errors?}`. `data` is always present (null when
//! there is no payload); `errors` appears only on validation failures.

use serde::Serialize;

use crate::utils::error::FieldError;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response carrying a payload
    pub fn ok(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: Some(data),
            errors: None,
        }
    }
}

impl ApiResponse<serde_json::Value> {
    /// Successful response with no payload
    pub fn success_message(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: None,
            errors: None,
        }
    }

    /// Failed response with no payload
    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            data: None,
            errors: None,
        }
    }

    /// Failed response with itemized field errors
    pub fn failure_with_errors(message: &str, errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            data: None,
            errors: Some(errors),
        }
    }
}
