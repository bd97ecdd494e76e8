//! Account API
//!
//! A small user-account service: registration, login, profile retrieval,
//! and a heartbeat, fronted by JWT authentication, schema validation, rate
//! limiting, and an origin whitelist. Every response uses the same JSON
//! envelope: `{success, message, data, errors?}`.

pub mod api;
pub mod config;
pub mod database;
pub mod models;
pub mod service;
pub mod utils;

/// Crate version, exposed for logging at startup
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
