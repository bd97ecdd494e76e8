//! Authentication Middleware
//!
//! Bearer-token gate for protected routes, plus an optional role guard. A
//! missing or malformed Authorization header and a failed verification are
//! reported with distinct messages; every other detail stays in the logs.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::handlers::AppState;
use crate::models::auth::AuthContext;
use crate::utils::error::{ApiError, ApiResult};
use crate::utils::messages;

/// Extract the token from a `Bearer <token>` Authorization header
fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}

/// Require a valid bearer token; attaches [`AuthContext`] to the request
/// extensions for downstream handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = bearer_token(&request)
        .ok_or_else(|| ApiError::Authentication(messages::NO_TOKEN_PROVIDED.to_string()))?;

    let claims = state
        .jwt_service
        .verify(token)
        .map_err(|_| ApiError::Authentication(messages::INVALID_TOKEN.to_string()))?;

    request.extensions_mut().insert(AuthContext::from(claims));
    Ok(next.run(request).await)
}

/// Require a valid bearer token carrying one of the allowed roles.
///
/// Wire it up with a closure so the role list can be route-specific:
///
/// ```ignore
/// middleware::from_fn_with_state(state.clone(), |state, req, next| {
///     role_guard(state, &["admin"], req, next)
/// })
/// ```
pub async fn role_guard(
    State(state): State<AppState>,
    allowed: &'static [&'static str],
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = bearer_token(&request)
        .ok_or_else(|| ApiError::Authentication(messages::NO_TOKEN_PROVIDED.to_string()))?;

    let claims = state
        .jwt_service
        .verify(token)
        .map_err(|_| ApiError::Authentication(messages::INVALID_TOKEN.to_string()))?;

    if !allowed.contains(&claims.role.as_str()) {
        log::warn!(
            "User {} with role {} denied access to {}",
            claims.user_id,
            claims.role,
            request.uri().path()
        );
        return Err(ApiError::Forbidden(
            messages::INSUFFICIENT_PERMISSIONS.to_string(),
        ));
    }

    request.extensions_mut().insert(AuthContext::from(claims));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{NewUser, UserCredentials, UserProfile};
    use crate::service::{JwtService, UserService};
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
        Extension, Json, Router,
    };
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    struct NullStore;

    #[async_trait::async_trait]
    impl crate::database::users::UserStore for NullStore {
        async fn find_credentials_by_email(
            &self,
            _email: &str,
        ) -> Result<Option<UserCredentials>, crate::database::users::StoreError> {
            Ok(None)
        }
        async fn find_profile_by_id(
            &self,
            _id: Uuid,
        ) -> Result<Option<UserProfile>, crate::database::users::StoreError> {
            Ok(None)
        }
        async fn create_user(
            &self,
            _user: NewUser,
        ) -> Result<Uuid, crate::database::users::StoreError> {
            Ok(Uuid::new_v4())
        }
    }

    fn test_state() -> AppState {
        let jwt =
            Arc::new(JwtService::new("test-secret-that-is-long-enough-to-pass").unwrap());
        let user_service = Arc::new(UserService::new(Arc::new(NullStore), jwt.clone()));
        AppState {
            user_service,
            jwt_service: jwt,
        }
    }

    async fn whoami(Extension(auth): Extension<AuthContext>) -> Json<serde_json::Value> {
        Json(serde_json::json!({"userId": auth.user_id, "role": auth.role}))
    }

    fn guarded_router(state: AppState) -> Router {
        Router::new()
            .route("/me", get(whoami))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_auth,
            ))
            .with_state(state)
    }

    fn admin_router(state: AppState) -> Router {
        Router::new()
            .route("/admin", get(whoami))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                |state: State<AppState>, req: Request, next: Next| {
                    role_guard(state, &["admin"], req, next)
                },
            ))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let response = guarded_router(test_state())
            .oneshot(HttpRequest::get("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_bearer_header_is_unauthorized() {
        let response = guarded_router(test_state())
            .oneshot(
                HttpRequest::get("/me")
                    .header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthorized() {
        let response = guarded_router(test_state())
            .oneshot(
                HttpRequest::get("/me")
                    .header(AUTHORIZATION, "Bearer not.a.token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_passes_and_attaches_context() {
        let state = test_state();
        let user_id = Uuid::new_v4();
        let token = state.jwt_service.issue(user_id, "user").unwrap();

        let response = guarded_router(state)
            .oneshot(
                HttpRequest::get("/me")
                    .header(AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["userId"], user_id.to_string());
        assert_eq!(json["role"], "user");
    }

    #[tokio::test]
    async fn test_role_guard_allows_matching_role() {
        let state = test_state();
        let token = state.jwt_service.issue(Uuid::new_v4(), "admin").unwrap();

        let response = admin_router(state)
            .oneshot(
                HttpRequest::get("/admin")
                    .header(AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_role_guard_forbids_other_roles() {
        let state = test_state();
        let token = state.jwt_service.issue(Uuid::new_v4(), "user").unwrap();

        let response = admin_router(state)
            .oneshot(
                HttpRequest::get("/admin")
                    .header(AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_role_guard_without_token_is_unauthorized() {
        let response = admin_router(test_state())
            .oneshot(HttpRequest::get("/admin").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
