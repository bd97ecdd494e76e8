//! Data Models Module
//!
//! Data structures used throughout the service: user records,
//! request/response DTOs, token claims, and the response envelope.

pub mod auth;
pub mod requests;
pub mod response;
pub mod user;

// Re-export commonly used types
pub use auth::{AuthContext, TokenClaims, DEFAULT_ROLE};
pub use requests::{LoginData, LoginRequest, RegisterRequest, RegistrationData};
pub use response::ApiResponse;
pub use user::{NewUser, UserCredentials, UserProfile};
