//! Service Layer
//!
//! Business logic: account orchestration and token issuance.

pub mod jwt;
pub mod user;

// Re-export commonly used types
pub use jwt::{JwtError, JwtService};
pub use user::{UserService, UserServiceError, UserServiceResult};
