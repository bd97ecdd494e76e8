//! Request Security
//!
//! Perimeter controls applied before routing: a fixed-window in-process
//! rate limiter keyed by client IP, and an Origin-header whitelist for the
//! service root. Neither shares state across processes; counters reset on
//! restart.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::header::ORIGIN,
    middleware::Next,
    response::Response,
};

use crate::utils::error::{ApiError, ApiResult};
use crate::utils::messages;

/// Rate limiter tuning
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Requests allowed per window per client
    pub max_requests: u32,
    /// Window length before counters reset
    pub window: Duration,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
        }
    }
}

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window request counter keyed by client identity
pub struct RateLimiter {
    config: RateLimiterConfig,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Record a request for `key` and report whether it is within quota.
    ///
    /// Expired windows are evicted on every call so the map stays bounded
    /// by the number of clients active within one window, not by every key
    /// ever seen.
    pub fn check(&self, key: &str) -> bool {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();

        windows.retain(|_, window| now.duration_since(window.started) < self.config.window);

        let window = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        window.count += 1;
        window.count <= self.config.max_requests
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimiterConfig::default())
    }
}

/// Best-effort client identity for rate limiting. Prefers the socket peer
/// address, falls back to x-forwarded-for when running behind a proxy.
fn client_key(request: &Request) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Reject clients that exceed the request quota
pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let key = client_key(&request);

    if !limiter.check(&key) {
        log::warn!("Rate limit exceeded for {}", key);
        return Err(ApiError::RateLimited(
            messages::TOO_MANY_REQUESTS.to_string(),
        ));
    }

    Ok(next.run(request).await)
}

/// Reject requests whose Origin header is missing or not whitelisted
pub async fn host_whitelist(
    State(allowed): State<Arc<Vec<String>>>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let origin = request
        .headers()
        .get(ORIGIN)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::BadRequest(messages::ORIGIN_HEADER_IS_MISSING.to_string()))?;

    if !allowed.iter().any(|host| host == origin) {
        log::warn!("Rejected request from origin {}", origin);
        return Err(ApiError::Forbidden(messages::ACCESS_FORBIDDEN.to_string()));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    #[test]
    fn test_allows_up_to_limit() {
        let limiter = RateLimiter::new(RateLimiterConfig {
            max_requests: 3,
            window: Duration::from_secs(60),
        });

        assert!(limiter.check("1.2.3.4"));
        assert!(limiter.check("1.2.3.4"));
        assert!(limiter.check("1.2.3.4"));
        assert!(!limiter.check("1.2.3.4"));
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::new(RateLimiterConfig {
            max_requests: 1,
            window: Duration::from_secs(60),
        });

        assert!(limiter.check("1.2.3.4"));
        assert!(!limiter.check("1.2.3.4"));
        assert!(limiter.check("5.6.7.8"));
    }

    #[test]
    fn test_expired_windows_are_evicted() {
        let limiter = RateLimiter::new(RateLimiterConfig {
            max_requests: 1,
            window: Duration::from_millis(10),
        });

        for i in 0..1000 {
            limiter.check(&format!("10.0.{}.{}", i / 256, i % 256));
        }
        assert_eq!(limiter.windows.lock().unwrap().len(), 1000);

        std::thread::sleep(Duration::from_millis(15));
        limiter.check("fresh-client");

        // Every stale key is gone; only the fresh client remains tracked.
        assert_eq!(limiter.windows.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_window_resets() {
        let limiter = RateLimiter::new(RateLimiterConfig {
            max_requests: 1,
            window: Duration::from_millis(10),
        });

        assert!(limiter.check("1.2.3.4"));
        assert!(!limiter.check("1.2.3.4"));
        std::thread::sleep(Duration::from_millis(15));
        assert!(limiter.check("1.2.3.4"));
    }

    async fn ok_handler() -> &'static str {
        "ok"
    }

    #[tokio::test]
    async fn test_rate_limit_middleware_returns_429() {
        let limiter = Arc::new(RateLimiter::new(RateLimiterConfig {
            max_requests: 2,
            window: Duration::from_secs(60),
        }));
        let app = Router::new()
            .route("/", get(ok_handler))
            .layer(middleware::from_fn_with_state(limiter, rate_limit));

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(HttpRequest::get("/").body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .oneshot(HttpRequest::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    fn whitelist_app() -> Router {
        let allowed = Arc::new(vec!["http://localhost:3000".to_string()]);
        Router::new()
            .route("/", get(ok_handler))
            .layer(middleware::from_fn_with_state(allowed, host_whitelist))
    }

    #[tokio::test]
    async fn test_whitelist_missing_origin_is_bad_request() {
        let response = whitelist_app()
            .oneshot(HttpRequest::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_whitelist_unknown_origin_is_forbidden() {
        let response = whitelist_app()
            .oneshot(
                HttpRequest::get("/")
                    .header(ORIGIN, "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_whitelist_allowed_origin_passes() {
        let response = whitelist_app()
            .oneshot(
                HttpRequest::get("/")
                    .header(ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
