use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    add_scholarship_to_favorites, get_favorites, remove_scholarship_from_favorites,
};

pub fn init_favorites_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_favorites))
        .route(
            "/scholarships/{id}",
            post(add_scholarship_to_favorites).delete(remove_scholarship_from_favorites),
        )
}
