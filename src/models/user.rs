//! User Model
//!
//! Record shapes the user store exchanges with the service layer. Each is a
//! projection scoped to one operation; the full row, and in particular the
//! password hash, is never handed to API responses.

use serde::Serialize;
use uuid::Uuid;

/// Credential projection used by login and by register's existence check
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    /// Unique identifier for the user
    pub id: Uuid,

    /// bcrypt hashed password; None for accounts created without one
    pub password_hash: Option<String>,

    /// Role name; None falls back to the default role
    pub role: Option<String>,
}

/// Sanitized profile projection returned by the profile endpoint
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
}

/// Fields required to persist a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Normalized (lowercased, trimmed) email address
    pub email: String,
    pub first_name: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_serializes_camel_case_without_password() {
        let profile = UserProfile {
            id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: Some("Lovelace".to_string()),
            email: "ada@example.com".to_string(),
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
        assert_eq!(json["email"], "ada@example.com");
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
    }
}
