//! API Module
//!
//! HTTP surface: handlers, routing, authentication middleware, and the
//! perimeter security controls.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod security;

// Re-export commonly used types
pub use handlers::AppState;
pub use routes::create_router;
pub use security::{RateLimiter, RateLimiterConfig};
