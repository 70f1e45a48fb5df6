use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum_extra::extract::Query as MultiQuery;
use tracing::instrument;

use crate::middleware::auth::{MaybeAuthUser, RequireAdmin};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::ids::parse_id;
use crate::utils::pagination::PaginationParams;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

use super::model::{
    AdminListScholarshipsQuery, AdminScholarshipListResponse, AdminScholarshipResponse,
    CreateScholarshipRequest, ListScholarshipsQuery, ScholarshipListResponse,
    ScholarshipResponse, UpdateScholarshipRequest,
};
use super::service::ScholarshipService;

/// Public listing. Callers who say nothing about publication state only see
/// published records.
#[instrument(skip(state))]
pub async fn get_scholarships(
    State(state): State<AppState>,
    MultiQuery(query): MultiQuery<ListScholarshipsQuery>,
) -> Result<Json<ApiResponse<ScholarshipListResponse>>, AppError> {
    let pagination = PaginationParams::new(query.page, query.limit);
    let sort = query.sort.clone();

    let mut filters = query.into_filters();
    if filters.published.is_none() {
        filters.published = Some(true);
    }

    let (scholarships, total) =
        ScholarshipService::list(&state.db, &filters, pagination, sort.as_deref()).await?;

    Ok(ApiResponse::data(ScholarshipListResponse {
        scholarships,
        pagination: pagination.meta(total),
    }))
}

/// Public detail. An authenticated admin may view unpublished records;
/// everyone else gets a 404 for them.
#[instrument(skip(state, user))]
pub async fn get_scholarship(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ScholarshipResponse>>, AppError> {
    let id = parse_id(&id, "scholarship")?;
    let scholarship = ScholarshipService::get(&state.db, id, user.is_admin()).await?;

    Ok(ApiResponse::data(ScholarshipResponse { scholarship }))
}

#[instrument(skip(state, _admin))]
pub async fn get_scholarships_admin(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(query): Query<AdminListScholarshipsQuery>,
) -> Result<Json<ApiResponse<AdminScholarshipListResponse>>, AppError> {
    let pagination = PaginationParams::new(query.page, query.limit);
    let (scholarships, total) = ScholarshipService::list_admin(&state.db, &query).await?;

    Ok(ApiResponse::data(AdminScholarshipListResponse {
        scholarships,
        pagination: pagination.meta(total),
    }))
}

#[instrument(skip(state, _admin))]
pub async fn get_scholarship_admin(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AdminScholarshipResponse>>, AppError> {
    let id = parse_id(&id, "scholarship")?;
    let scholarship = ScholarshipService::get_admin(&state.db, id).await?;

    Ok(ApiResponse::data(AdminScholarshipResponse { scholarship }))
}

#[instrument(skip(state, admin, dto))]
pub async fn create_scholarship(
    State(state): State<AppState>,
    admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateScholarshipRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AdminScholarshipResponse>>), AppError> {
    let admin_id = admin.0.user_id()?;
    let scholarship = ScholarshipService::create(&state.db, admin_id, dto).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(
            "Scholarship created successfully",
            AdminScholarshipResponse { scholarship },
        ),
    ))
}

#[instrument(skip(state, _admin, dto))]
pub async fn update_scholarship(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateScholarshipRequest>,
) -> Result<Json<ApiResponse<AdminScholarshipResponse>>, AppError> {
    let id = parse_id(&id, "scholarship")?;
    let scholarship = ScholarshipService::update(&state.db, id, dto).await?;

    Ok(ApiResponse::with_message(
        "Scholarship updated successfully",
        AdminScholarshipResponse { scholarship },
    ))
}

#[instrument(skip(state, _admin))]
pub async fn delete_scholarship(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = parse_id(&id, "scholarship")?;
    ScholarshipService::delete(&state.db, id).await?;

    Ok(ApiResponse::message("Scholarship deleted successfully"))
}
