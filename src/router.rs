use std::sync::Arc;

use axum::http::{HeaderValue, Method, Uri};
use axum::{Json, Router, middleware, routing::get};
use serde_json::{Value, json};
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;

use crate::logging::logging_middleware;
use crate::modules::auth::router::init_auth_router;
use crate::modules::favorites::router::init_favorites_router;
use crate::modules::scholarships::router::{
    init_admin_scholarships_router, init_scholarships_router,
};
use crate::modules::search::router::init_search_router;
use crate::modules::users::router::{init_admin_users_router, init_users_router};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;

async fn health() -> Json<ApiResponse<Value>> {
    ApiResponse::with_message(
        "Server is running",
        json!({ "timestamp": chrono::Utc::now().to_rfc3339() }),
    )
}

async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found(anyhow::anyhow!("Route {} not found", uri.path()))
}

pub fn init_router(state: AppState) -> Router {
    let auth_governor = state.rate_limit_config.auth_governor_config();
    let general_governor = state.rate_limit_config.general_governor_config();

    Router::new()
        .route("/health", get(health))
        .nest(
            "/api",
            Router::new()
                .nest(
                    "/auth",
                    init_auth_router().layer(GovernorLayer::new(Arc::new(auth_governor))),
                )
                .nest("/users", init_users_router())
                .nest("/scholarships", init_scholarships_router())
                .nest("/favorites", init_favorites_router())
                .nest("/search", init_search_router())
                .nest("/admin/users", init_admin_users_router())
                .nest("/admin/scholarships", init_admin_scholarships_router())
                .layer(GovernorLayer::new(Arc::new(general_governor))),
        )
        .fallback(not_found_handler)
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
