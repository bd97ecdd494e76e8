//! Request Handlers
//!
//! One handler per endpoint. Each handler parses the body, runs schema
//! validation, delegates to the service layer, and wraps the result in the
//! response envelope. All failure paths go through `ApiError`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use crate::models::auth::AuthContext;
use crate::models::requests::{LoginData, LoginRequest, RegisterRequest, RegistrationData};
use crate::models::response::ApiResponse;
use crate::models::user::UserProfile;
use crate::service::{JwtService, UserService};
use crate::utils::error::{ApiError, ApiResult};
use crate::utils::messages;

/// Shared state handed to every handler and middleware
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub jwt_service: Arc<JwtService>,
}

/// Unwrap a JSON body, folding parse failures into a single 400
fn parse_json<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            log::debug!("Rejected request body: {}", rejection);
            Err(ApiError::BadRequest(messages::INVALID_JSON.to_string()))
        }
    }
}

/// GET /v1/users/
pub async fn heartbeat() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success_message(messages::HEARTBEAT_OK))
}

/// GET / at the application root, gated by the origin whitelist
pub async fn root() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success_message(messages::HEARTBEAT_OK))
}

/// GET /heartbeat, a bare liveness probe outside the envelope
pub async fn liveness() -> &'static str {
    log::info!("Heartbeat ok");
    "ok"
}

/// POST /v1/users/register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<RegistrationData>>)> {
    let request = parse_json(payload)?;
    request.validate().map_err(ApiError::from)?;

    let data = state.user_service.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(messages::REGISTRATION_SUCCESSFUL, data)),
    ))
}

/// POST /v1/users/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<LoginData>>> {
    let request = parse_json(payload)?;
    request.validate().map_err(ApiError::from)?;

    let data = state.user_service.login(request).await?;

    Ok(Json(ApiResponse::ok(messages::LOGIN_SUCCESSFUL, data)))
}

/// GET /v1/users/profile, behind the authentication middleware
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ApiResponse<UserProfile>>> {
    let profile = state.user_service.get_profile(auth.user_id).await?;

    Ok(Json(ApiResponse::ok(messages::USER_FOUND, profile)))
}

/// Fallback for unmatched paths and methods; keeps 404s in the envelope
pub async fn route_not_found() -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::failure(messages::ROUTE_NOT_FOUND)),
    )
}
