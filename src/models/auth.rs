//! Authentication Models
//!
//! JWT claim payloads and the per-request identity context populated by the
//! authentication middleware.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned when an account has no explicit role reference
pub const DEFAULT_ROLE: &str = "user";

/// Claims embedded in every issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Identifier of the authenticated user
    #[serde(rename = "userId")]
    pub user_id: Uuid,

    /// Role name at issuance time
    pub role: String,

    /// Issued-at timestamp (seconds since epoch)
    pub iat: i64,

    /// Expiry timestamp (seconds since epoch)
    pub exp: i64,
}

/// Request-scoped identity attached to request extensions once a bearer
/// token has been verified. Immutable; created at request start and
/// discarded with the request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub role: String,
}

impl From<TokenClaims> for AuthContext {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            role: claims.role,
        }
    }
}
