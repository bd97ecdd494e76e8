//! JWT Token Service
//!
//! Issues and verifies the signed identity tokens carried as bearer
//! credentials. Tokens embed `{userId, role}` and expire after a fixed
//! 30-day window; there is no server-side revocation.
//!
//! Verification failures are logged with their real cause but always
//! surface to callers as the same invalid-token error, so clients cannot
//! distinguish a forged token from an expired one.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use uuid::Uuid;

use crate::models::auth::TokenClaims;
use crate::utils::messages;

/// Minimum accepted signing secret length
pub const MIN_SECRET_LEN: usize = 32;

/// Fixed token lifetime
const TOKEN_TTL_DAYS: i64 = 30;

#[derive(Error, Debug)]
pub enum JwtError {
    /// The signing secret is too short to be trusted. Fatal at startup,
    /// never a per-request condition.
    #[error("JWT secret must be at least {MIN_SECRET_LEN} characters")]
    WeakSecret,

    /// Encoding failure while issuing a token
    #[error("Token generation failed: {0}")]
    Generation(jsonwebtoken::errors::Error),

    /// Any verification failure: bad signature, malformed token, expired
    #[error("Invalid token")]
    InvalidToken,
}

impl From<JwtError> for crate::utils::error::ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::InvalidToken => {
                crate::utils::error::ApiError::Authentication(messages::INVALID_TOKEN.to_string())
            }
            other => crate::utils::error::ApiError::Internal(other.to_string()),
        }
    }
}

/// Stateless token issuance and verification
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in: Duration,
}

impl JwtService {
    /// Create a token service with the fixed 30-day expiry.
    ///
    /// Fails when the secret is shorter than [`MIN_SECRET_LEN`]; callers
    /// are expected to treat that as a startup error.
    pub fn new(secret: &str) -> Result<Self, JwtError> {
        Self::with_expiration(secret, Duration::days(TOKEN_TTL_DAYS))
    }

    /// Create a token service with a custom expiry window
    pub fn with_expiration(secret: &str, expires_in: Duration) -> Result<Self, JwtError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(JwtError::WeakSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in,
        })
    }

    /// Issue a signed token embedding the user id and role
    pub fn issue(&self, user_id: Uuid, role: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = TokenClaims {
            user_id,
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + self.expires_in).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(JwtError::Generation)
    }

    /// Verify a token and return its claims.
    ///
    /// The concrete failure reason is only logged at debug level.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, JwtError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("Token verification failed: {}", e);
                JwtError::InvalidToken
            })
    }
}
