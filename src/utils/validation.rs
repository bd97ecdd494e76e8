//! Validation Utilities
//!
//! Custom validator functions for request fields, plugged into the
//! `validator` derive on the request DTOs. Password rules are split into
//! one validator per rule so a weak password reports every violated rule,
//! not just the first.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use validator::ValidationError;

/// Special characters a password must draw from.
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*";

/// Minimum and maximum accepted password length.
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 20;

pub const INVALID_EMAIL_FORMAT: &str = "Invalid email format";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const FIRST_NAME_TOO_SHORT: &str = "First name must be at least 2 characters long";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD2_REQUIRED: &str = "Password2 is required";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long";
const PASSWORD_TOO_LONG: &str = "Password must not exceed 20 characters";
const PASSWORD_NO_UPPERCASE: &str = "Password must contain at least one uppercase letter";
const PASSWORD_NO_LOWERCASE: &str = "Password must contain at least one lowercase letter";
const PASSWORD_NO_NUMBER: &str = "Password must contain at least one number";
const PASSWORD_NO_SPECIAL: &str =
    "Password must contain at least one special character (!@#$%^&*)";

/// Validates email address format.
pub fn validate_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    regex.is_match(email)
}

/// Normalizes email address to lowercase and removes surrounding whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn rule_violation(message: &'static str) -> ValidationError {
    let mut error = ValidationError::new("invalid");
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Custom validator for email fields: required, then well-formed
pub fn email_validator(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(rule_violation(EMAIL_REQUIRED));
    }
    if !validate_email(email) {
        return Err(rule_violation(INVALID_EMAIL_FORMAT));
    }
    Ok(())
}

/// Custom validator for the first name field
pub fn first_name_validator(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < 2 {
        return Err(rule_violation(FIRST_NAME_TOO_SHORT));
    }
    Ok(())
}

/// Custom validator for login passwords: presence only, complexity rules
/// apply at signup
pub fn login_password_validator(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(rule_violation(PASSWORD_REQUIRED));
    }
    Ok(())
}

/// Custom validator for the password confirmation field
pub fn password2_required_validator(password2: &str) -> Result<(), ValidationError> {
    if password2.is_empty() {
        return Err(rule_violation(PASSWORD2_REQUIRED));
    }
    Ok(())
}

pub fn password_length_validator(password: &str) -> Result<(), ValidationError> {
    let length = password.chars().count();
    if length < PASSWORD_MIN_LEN {
        return Err(rule_violation(PASSWORD_TOO_SHORT));
    }
    if length > PASSWORD_MAX_LEN {
        return Err(rule_violation(PASSWORD_TOO_LONG));
    }
    Ok(())
}

pub fn password_uppercase_validator(password: &str) -> Result<(), ValidationError> {
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(rule_violation(PASSWORD_NO_UPPERCASE));
    }
    Ok(())
}

pub fn password_lowercase_validator(password: &str) -> Result<(), ValidationError> {
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(rule_violation(PASSWORD_NO_LOWERCASE));
    }
    Ok(())
}

pub fn password_number_validator(password: &str) -> Result<(), ValidationError> {
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(rule_violation(PASSWORD_NO_NUMBER));
    }
    Ok(())
}

pub fn password_special_validator(password: &str) -> Result<(), ValidationError> {
    if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        return Err(rule_violation(PASSWORD_NO_SPECIAL));
    }
    Ok(())
}
