use axum::Json;
use axum::extract::State;
use axum_extra::extract::Query;
use tracing::instrument;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;

use super::model::{SearchQuery, SearchResponse};
use super::service::SearchService;

#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<SearchResponse>>, AppError> {
    let response = SearchService::search(&state.db, query).await?;

    Ok(ApiResponse::data(response))
}
