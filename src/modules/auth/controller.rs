use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::{info, instrument};
use utoipa::ToSchema;

use taskgate_core::AppError;
use taskgate_models::{AuthResponse, LoginRequest, RegisterRequest};

use super::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse),
        (status = 422, description = "Invalid email or password too short", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let response =
        AuthService::register(state.users.as_ref(), &state.codec, state.token_ttl(), dto).await?;

    info!(user_id = %response.user.id, "User registered");
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in and receive a token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = AuthService::login(
        state.users.as_ref(),
        &state.codec,
        state.token_ttl(),
        &dto.email,
        &dto.password,
    )
    .await?;

    info!(user_id = %response.user.id, "User logged in");
    Ok(Json(response))
}
