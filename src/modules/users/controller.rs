use axum::Json;
use axum::extract::{Path, Query, State};
use tracing::instrument;

use crate::middleware::auth::{AuthUser, RequireAdmin};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::ids::parse_id;
use crate::utils::pagination::PaginationParams;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

use super::model::{
    AdminUpdateUserRequest, ChangePasswordRequest, ListUsersQuery, ProfileResponse,
    UpdateProfileRequest, UserDetailResponse, UserListResponse,
};
use super::service::UserService;

#[instrument(skip(state, user))]
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<ProfileResponse>>, AppError> {
    let user = UserService::get_profile(&state.db, user.user_id()?).await?;

    Ok(ApiResponse::data(ProfileResponse { user }))
}

#[instrument(skip(state, user, dto))]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<ProfileResponse>>, AppError> {
    let user = UserService::update_profile(&state.db, user.user_id()?, dto).await?;

    Ok(ApiResponse::with_message(
        "Profile updated successfully",
        ProfileResponse { user },
    ))
}

#[instrument(skip(state, user, dto))]
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    UserService::change_password(&state.db, user.user_id()?, dto).await?;

    Ok(ApiResponse::message("Password changed successfully"))
}

#[instrument(skip(state, user))]
pub async fn delete_account(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<()>>, AppError> {
    UserService::delete_account(&state.db, user.user_id()?).await?;

    Ok(ApiResponse::message("Account deleted successfully"))
}

#[instrument(skip(state, _admin))]
pub async fn get_users(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ApiResponse<UserListResponse>>, AppError> {
    let pagination = PaginationParams::new(query.page, query.limit);
    let (users, total) = UserService::list(&state.db, &query).await?;

    Ok(ApiResponse::data(UserListResponse {
        users,
        pagination: pagination.meta(total),
    }))
}

#[instrument(skip(state, _admin))]
pub async fn get_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserDetailResponse>>, AppError> {
    let id = parse_id(&id, "user")?;
    let user = UserService::get_detail(&state.db, id).await?;

    Ok(ApiResponse::data(UserDetailResponse { user }))
}

#[instrument(skip(state, _admin, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<AdminUpdateUserRequest>,
) -> Result<Json<ApiResponse<ProfileResponse>>, AppError> {
    let id = parse_id(&id, "user")?;
    let user = UserService::admin_update(&state.db, id, dto).await?;

    Ok(ApiResponse::with_message(
        "User updated successfully",
        ProfileResponse { user },
    ))
}

#[instrument(skip(state, admin))]
pub async fn delete_user(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = parse_id(&id, "user")?;
    UserService::admin_delete(&state.db, admin.0.user_id()?, id).await?;

    Ok(ApiResponse::message("User deleted successfully"))
}
