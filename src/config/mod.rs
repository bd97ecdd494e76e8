//! Application Configuration
//!
//! Environment-driven configuration with startup validation. `from_env`
//! collects everything the process needs; `validate` rejects configurations
//! that would only fail later at request time. A missing required variable
//! or an invalid value is fatal at boot.

use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::database::connection::PoolConfig;
use crate::service::jwt::MIN_SECRET_LEN;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

/// Token issuance settings
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

/// Perimeter security settings
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Origins accepted by the application root
    pub whitelist_urls: Vec<String>,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window: Duration,
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: PoolConfig,
    pub jwt: JwtConfig,
    pub security: SecurityConfig,
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    env::var(var).map_err(|_| ConfigError::MissingVar(var))
}

fn optional(var: &str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: std::str::FromStr>(
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(value) => value.parse().map_err(|e| ConfigError::InvalidValue {
            var,
            reason: format!("{}", e),
        }),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Required: `DATABASE_URL`, `JWT_SECRET`, `WHITE_LIST_URLS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;
        let whitelist_raw = required("WHITE_LIST_URLS")?;

        let whitelist_urls: Vec<String> = whitelist_raw
            .split(',')
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .collect();

        let mut database = PoolConfig::new(database_url);
        database.max_connections = parse_var("DB_MAX_CONNECTIONS", database.max_connections)?;
        database.min_connections = parse_var("DB_MIN_CONNECTIONS", database.min_connections)?;
        database.connect_timeout = Duration::from_secs(parse_var(
            "DB_CONNECT_TIMEOUT_SECS",
            database.connect_timeout.as_secs(),
        )?);

        let config = Self {
            server: ServerConfig {
                host: optional("SERVER_HOST", "0.0.0.0"),
                port: parse_var("PORT", 5001)?,
                log_level: optional("LOG_LEVEL", "info"),
            },
            database,
            jwt: JwtConfig { secret: jwt_secret },
            security: SecurityConfig {
                whitelist_urls,
                rate_limit_max_requests: parse_var("RATE_LIMIT_MAX_REQUESTS", 100)?,
                rate_limit_window: Duration::from_secs(
                    parse_var("RATE_LIMIT_WINDOW_SECS", 15 * 60)?,
                ),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would fail at request time
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                var: "PORT",
                reason: "port must be non-zero".to_string(),
            });
        }

        match self.server.log_level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    var: "LOG_LEVEL",
                    reason: format!("unknown log level '{}'", other),
                });
            }
        }

        if self.jwt.secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::InvalidValue {
                var: "JWT_SECRET",
                reason: format!("must be at least {} characters", MIN_SECRET_LEN),
            });
        }

        if self.security.whitelist_urls.is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "WHITE_LIST_URLS",
                reason: "at least one origin is required".to_string(),
            });
        }

        for url in &self.security.whitelist_urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    var: "WHITE_LIST_URLS",
                    reason: format!("'{}' is not an http(s) origin", url),
                });
            }
        }

        if self.database.max_connections == 0
            || self.database.min_connections > self.database.max_connections
        {
            return Err(ConfigError::InvalidValue {
                var: "DB_MAX_CONNECTIONS",
                reason: "pool bounds must satisfy 0 < min <= max".to_string(),
            });
        }

        if self.security.rate_limit_max_requests == 0 {
            return Err(ConfigError::InvalidValue {
                var: "RATE_LIMIT_MAX_REQUESTS",
                reason: "must be positive".to_string(),
            });
        }

        Ok(())
    }
}
