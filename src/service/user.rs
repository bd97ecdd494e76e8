//! User Service
//!
//! Business logic for the three account use cases: register, login, and
//! profile retrieval. Expected failures are explicit variants; nothing in
//! this layer panics on bad input.

use std::sync::Arc;

use thiserror::Error;

use crate::database::users::{StoreError, UserStore};
use crate::models::auth::DEFAULT_ROLE;
use crate::models::requests::{LoginData, LoginRequest, RegisterRequest, RegistrationData};
use crate::models::user::{NewUser, UserProfile};
use crate::service::jwt::{JwtError, JwtService};
use crate::utils::error::{ApiError, FieldError};
use crate::utils::messages;
use crate::utils::security::{hash_password_with_cost, verify_password, DEFAULT_BCRYPT_COST};
use crate::utils::validation::{normalize_email, PASSWORDS_DO_NOT_MATCH};
use uuid::Uuid;

/// Errors produced by user account operations
#[derive(Error, Debug)]
pub enum UserServiceError {
    #[error("User not found")]
    UserNotFound,

    #[error("User already exists with the provided Email")]
    EmailAlreadyExists,

    /// Account exists but was created without a password
    #[error("No password set for this account")]
    NoPasswordSet,

    #[error("Incorrect password")]
    IncorrectPassword,

    /// Password and confirmation diverged past the validation layer
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error(transparent)]
    Store(StoreError),

    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Token(#[from] JwtError),
}

impl From<StoreError> for UserServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            // A constraint violation on create means someone else won the
            // insert race; same domain outcome as the existence check.
            StoreError::Conflict(_) => UserServiceError::EmailAlreadyExists,
            other => UserServiceError::Store(other),
        }
    }
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::UserNotFound => {
                ApiError::NotFound(messages::USER_NOT_FOUND.to_string())
            }
            UserServiceError::EmailAlreadyExists => {
                ApiError::Conflict(messages::USER_EXISTS_WITH_EMAIL.to_string())
            }
            UserServiceError::NoPasswordSet => {
                ApiError::Authentication(messages::NO_PASSWORD_SET.to_string())
            }
            UserServiceError::IncorrectPassword => {
                ApiError::Authentication(messages::INCORRECT_PASSWORD.to_string())
            }
            UserServiceError::PasswordMismatch => ApiError::Validation(vec![FieldError::new(
                "password2",
                PASSWORDS_DO_NOT_MATCH,
            )]),
            UserServiceError::Store(StoreError::Database(e)) => ApiError::Database(e),
            UserServiceError::Store(StoreError::Conflict(_)) => {
                ApiError::Conflict(messages::USER_EXISTS_WITH_EMAIL.to_string())
            }
            UserServiceError::Hashing(e) => ApiError::Hashing(e),
            UserServiceError::Token(e) => e.into(),
        }
    }
}

/// Result type for user service operations
pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// Orchestrates the user store, password hashing, and token issuance
pub struct UserService {
    store: Arc<dyn UserStore>,
    jwt: Arc<JwtService>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, jwt: Arc<JwtService>) -> Self {
        Self {
            store,
            jwt,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    /// Override the bcrypt cost, mainly to keep test suites fast
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Create a new account and issue its first token.
    ///
    /// The existence check is a fast-path courtesy; the store's unique
    /// constraint is what actually prevents duplicates under concurrent
    /// registration. Nothing is hashed or persisted unless the password
    /// pair matches.
    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> UserServiceResult<RegistrationData> {
        if request.password != request.password2 {
            return Err(UserServiceError::PasswordMismatch);
        }

        let email = normalize_email(&request.email);

        if self.store.find_credentials_by_email(&email).await?.is_some() {
            return Err(UserServiceError::EmailAlreadyExists);
        }

        let password_hash = hash_password_with_cost(&request.password, self.bcrypt_cost)?;

        let user_id = self
            .store
            .create_user(NewUser {
                email,
                first_name: request.first_name,
                password_hash,
            })
            .await?;

        let token = self.jwt.issue(user_id, DEFAULT_ROLE)?;

        log::info!("Registered user {}", user_id);
        Ok(RegistrationData { token })
    }

    /// Authenticate by email and password, issuing a fresh token
    pub async fn login(&self, request: LoginRequest) -> UserServiceResult<LoginData> {
        let email = normalize_email(&request.email);

        let credentials = self
            .store
            .find_credentials_by_email(&email)
            .await?
            .ok_or(UserServiceError::UserNotFound)?;

        let password_hash = credentials
            .password_hash
            .as_deref()
            .ok_or(UserServiceError::NoPasswordSet)?;

        if !verify_password(&request.password, password_hash)? {
            return Err(UserServiceError::IncorrectPassword);
        }

        let role = credentials
            .role
            .unwrap_or_else(|| DEFAULT_ROLE.to_string());
        let token = self.jwt.issue(credentials.id, &role)?;

        log::info!("User {} logged in", credentials.id);
        Ok(LoginData {
            user_id: credentials.id,
            role,
            token,
        })
    }

    /// Fetch the sanitized profile for an authenticated user
    pub async fn get_profile(&self, user_id: Uuid) -> UserServiceResult<UserProfile> {
        self.store
            .find_profile_by_id(user_id)
            .await?
            .ok_or(UserServiceError::UserNotFound)
    }
}
