//! Database Module
//!
//! Connection pool management and the user store abstraction.

pub mod connection;
pub mod users;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolConfig};
pub use users::{PgUserStore, StoreError, UserStore};
