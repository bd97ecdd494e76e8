//! User Store
//!
//! The persistence seam for user accounts. Services depend on the
//! `UserStore` trait, which keeps them testable against in-memory fakes;
//! `PgUserStore` is the production implementation.
//!
//! The store exposes exactly three operations: credential lookup by email,
//! profile lookup by id, and account creation. Each returns a projection
//! scoped to its caller; nothing ever hands back a raw row with more than
//! the caller needs.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::user::{NewUser, UserCredentials, UserProfile};

/// Store-layer errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// A unique constraint rejected the write; carries the field name
    #[error("Duplicate value for {0}")]
    Conflict(&'static str),

    /// Connectivity or query failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence operations for user accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up login credentials by normalized email
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, StoreError>;

    /// Look up the sanitized profile projection by user id
    async fn find_profile_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, StoreError>;

    /// Persist a new account, returning its generated id.
    ///
    /// The unique constraint on email is the real duplicate guard; callers
    /// must treat `StoreError::Conflict` as a domain conflict even after a
    /// prior existence check passed.
    async fn create_user(&self, user: NewUser) -> Result<Uuid, StoreError>;
}

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, StoreError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            r#"
            SELECT u.id, u.password_hash, r.name AS role
            FROM users u
            LEFT JOIN roles r ON r.id = u.role_id
            WHERE u.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credentials)
    }

    async fn find_profile_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, first_name, last_name, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn create_user(&self, user: NewUser) -> Result<Uuid, StoreError> {
        let row: (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO users (email, password_hash, first_name)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.constraint() == Some("users_email_key") => {
                StoreError::Conflict("email")
            }
            _ => StoreError::Database(e),
        })?;

        Ok(row.0)
    }
}
