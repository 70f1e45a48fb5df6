use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

use super::model::{AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest};
use super::service::AuthService;

#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), AppError> {
    let response = AuthService::register(&state.db, dto, &state.jwt_config).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("User registered successfully", response),
    ))
}

#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let response = AuthService::login(&state.db, dto, &state.jwt_config).await?;

    Ok(ApiResponse::with_message("Login successful", response))
}

#[instrument(skip(state, user))]
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<CurrentUserResponse>>, AppError> {
    let user = AuthService::current_user(&state.db, user.user_id()?).await?;

    Ok(ApiResponse::data(CurrentUserResponse { user }))
}
