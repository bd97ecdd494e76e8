//! Utilities Module
//!
//! Shared utilities for error handling, security, validation, and message
//! constants used throughout the service.

pub mod error;
pub mod messages;
pub mod security;
pub mod validation;

// Re-export commonly used utilities
pub use error::{ApiError, ApiResult, FieldError};
pub use security::{hash_password, hash_password_with_cost, verify_password, DEFAULT_BCRYPT_COST};
pub use validation::{normalize_email, validate_email};
