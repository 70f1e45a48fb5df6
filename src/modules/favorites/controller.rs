use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::ids::parse_id;
use crate::utils::response::ApiResponse;

use super::model::FavoritesResponse;
use super::service::FavoritesService;

#[instrument(skip(state, user))]
pub async fn get_favorites(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<FavoritesResponse>>, AppError> {
    let favorites = FavoritesService::get(&state.db, user.user_id()?).await?;

    Ok(ApiResponse::data(FavoritesResponse { favorites }))
}

#[instrument(skip(state, user))]
pub async fn add_scholarship_to_favorites(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FavoritesResponse>>, AppError> {
    let id = parse_id(&id, "scholarship")?;
    let (favorites, message) =
        FavoritesService::add_scholarship(&state.db, user.user_id()?, id).await?;

    Ok(ApiResponse::with_message(
        message,
        FavoritesResponse { favorites },
    ))
}

#[instrument(skip(state, user))]
pub async fn remove_scholarship_from_favorites(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FavoritesResponse>>, AppError> {
    let id = parse_id(&id, "scholarship")?;
    let favorites = FavoritesService::remove_scholarship(&state.db, user.user_id()?, id).await?;

    Ok(ApiResponse::with_message(
        "Scholarship removed from favorites",
        FavoritesResponse { favorites },
    ))
}
