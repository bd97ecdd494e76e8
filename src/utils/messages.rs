//! User-Facing Message Constants
//!
//! Every message that can appear in a response envelope lives here so the
//! API surface stays consistent and tests can assert against one source.

// Success messages
pub const USER_FOUND: &str = "User Found";
pub const REGISTRATION_SUCCESSFUL: &str = "Registration successful";
pub const LOGIN_SUCCESSFUL: &str = "Login successful";
pub const HEARTBEAT_OK: &str = "Ok, From user";

// Error messages
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
pub const USER_NOT_FOUND: &str = "User not found";
pub const USER_EXISTS_WITH_EMAIL: &str = "User already exists with the provided Email";
pub const INCORRECT_PASSWORD: &str = "Incorrect password";
pub const NO_PASSWORD_SET: &str = "No password set for this account";
pub const NO_TOKEN_PROVIDED: &str = "No token provided";
pub const INVALID_TOKEN: &str = "Invalid token";
pub const INSUFFICIENT_PERMISSIONS: &str = "Forbidden: Insufficient permissions";
pub const ORIGIN_HEADER_IS_MISSING: &str = "Origin header is missing";
pub const ACCESS_FORBIDDEN: &str = "Access Forbidden";
pub const ROUTE_NOT_FOUND: &str = "Route not found or wrong API method";
pub const INVALID_JSON: &str = "Invalid JSON";
pub const VALIDATION_ERROR: &str = "Validation error";
pub const TOO_MANY_REQUESTS: &str = "Too many requests, please try again later";
