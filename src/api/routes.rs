//! Route Definitions
//!
//! Assembles the router: the user endpoints under `/v1/users`, the
//! whitelisted application root, the bare liveness probe, the not-found
//! fallback, and the shared middleware stack. Layer order matters; layers
//! added last run first, so tracing wraps the rate limiter which wraps the
//! security headers, CORS, and the routes.

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::{middleware, routing::get, routing::post, Router};
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{self, AppState};
use crate::api::middleware::require_auth;
use crate::api::security::{self, RateLimiter};

/// Build the complete application router
pub fn create_router(
    state: AppState,
    limiter: Arc<RateLimiter>,
    whitelist: Arc<Vec<String>>,
) -> Router {
    let user_routes = Router::new()
        .route("/", get(handlers::heartbeat))
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route(
            "/profile",
            get(handlers::get_profile).route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_auth,
            )),
        );

    Router::new()
        .route(
            "/",
            get(handlers::root).route_layer(middleware::from_fn_with_state(
                whitelist,
                security::host_whitelist,
            )),
        )
        .route("/heartbeat", get(handlers::liveness))
        .nest("/v1/users", user_routes)
        .fallback(handlers::route_not_found)
        .layer(CorsLayer::permissive())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(middleware::from_fn_with_state(
            limiter,
            security::rate_limit,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
