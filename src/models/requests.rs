//! Request and Response Types
//!
//! Wire-level DTOs for each endpoint, with declarative schema validation
//! via the `validator` derive. Fields default to empty strings on
//! deserialization so that missing fields surface as itemized "required"
//! errors instead of a JSON parse failure. Password rules are stacked one
//! validator per rule so every violation is reported.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{
    email_validator, first_name_validator, login_password_validator,
    password2_required_validator, password_length_validator, password_lowercase_validator,
    password_number_validator, password_special_validator, password_uppercase_validator,
};

/// Registration request body
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    #[validate(custom(function = "email_validator"))]
    pub email: String,

    #[validate(custom(function = "first_name_validator"))]
    pub first_name: String,

    #[validate(custom(function = "password_length_validator"))]
    #[validate(custom(function = "password_uppercase_validator"))]
    #[validate(custom(function = "password_lowercase_validator"))]
    #[validate(custom(function = "password_number_validator"))]
    #[validate(custom(function = "password_special_validator"))]
    pub password: String,

    #[validate(custom(function = "password2_required_validator"))]
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password2: String,
}

/// Login request body
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(custom(function = "email_validator"))]
    pub email: String,

    #[validate(custom(function = "login_password_validator"))]
    pub password: String,
}

/// Payload returned by a successful registration
#[derive(Debug, Serialize)]
pub struct RegistrationData {
    pub token: String,
}

/// Payload returned by a successful login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user_id: Uuid,
    pub role: String,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{ApiError, FieldError};
    use crate::utils::validation::{
        EMAIL_REQUIRED, INVALID_EMAIL_FORMAT, PASSWORDS_DO_NOT_MATCH, PASSWORD_REQUIRED,
    };

    fn field_errors<T: Validate>(value: &T) -> Vec<FieldError> {
        match ApiError::from(value.validate().unwrap_err()) {
            ApiError::Validation(errors) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    fn valid_register_request() -> RegisterRequest {
        RegisterRequest {
            email: "a@x.com".to_string(),
            first_name: "Ada".to_string(),
            password: "Abc12345!".to_string(),
            password2: "Abc12345!".to_string(),
        }
    }

    #[test]
    fn test_register_valid() {
        assert!(valid_register_request().validate().is_ok());
    }

    #[test]
    fn test_register_missing_fields_all_reported() {
        let errors = field_errors(&RegisterRequest::default());

        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert!(paths.contains(&"email"));
        assert!(paths.contains(&"firstName"));
        assert!(paths.contains(&"password"));
        assert!(paths.contains(&"password2"));
    }

    #[test]
    fn test_register_invalid_email_format() {
        let mut request = valid_register_request();
        request.email = "not-an-email".to_string();

        let errors = field_errors(&request);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "email");
        assert_eq!(errors[0].message, INVALID_EMAIL_FORMAT);
    }

    #[test]
    fn test_register_short_first_name() {
        let mut request = valid_register_request();
        request.first_name = "A".to_string();

        let errors = field_errors(&request);
        assert_eq!(errors[0].path, "firstName");
    }

    #[test]
    fn test_register_weak_password_lists_each_rule() {
        let mut request = valid_register_request();
        request.password = "abc".to_string();
        request.password2 = "abc".to_string();

        let errors = field_errors(&request);
        let password_errors: Vec<_> =
            errors.iter().filter(|e| e.path == "password").collect();
        // Short, no uppercase, no digit, no special character.
        assert_eq!(password_errors.len(), 4);
    }

    #[test]
    fn test_register_mismatch_attached_to_password2() {
        let mut request = valid_register_request();
        request.password2 = "Different1!".to_string();

        let errors = field_errors(&request);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "password2");
        assert_eq!(errors[0].message, PASSWORDS_DO_NOT_MATCH);
    }

    #[test]
    fn test_register_mismatch_reported_even_with_weak_password() {
        let mut request = valid_register_request();
        request.password = "weak".to_string();
        request.password2 = "alsoweak".to_string();

        let errors = field_errors(&request);
        assert!(errors.iter().any(|e| e.path == "password"));
        assert!(errors
            .iter()
            .any(|e| e.path == "password2" && e.message == PASSWORDS_DO_NOT_MATCH));
    }

    #[test]
    fn test_register_deserializes_with_missing_fields() {
        let request: RegisterRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(request.email, "a@x.com");
        assert!(request.password.is_empty());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_login_valid() {
        let request = LoginRequest {
            email: "a@x.com".to_string(),
            password: "anything".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_login_missing_both_fields() {
        let errors = field_errors(&LoginRequest::default());
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, EMAIL_REQUIRED);
        assert_eq!(errors[1].message, PASSWORD_REQUIRED);
    }

    #[test]
    fn test_login_password_not_complexity_checked() {
        // Login only requires presence; complexity rules apply at signup.
        let request = LoginRequest {
            email: "a@x.com".to_string(),
            password: "x".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
