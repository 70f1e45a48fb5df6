use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_scholarship, delete_scholarship, get_scholarship, get_scholarship_admin,
    get_scholarships, get_scholarships_admin, update_scholarship,
};

pub fn init_scholarships_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_scholarships))
        .route("/{id}", get(get_scholarship))
}

pub fn init_admin_scholarships_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_scholarships_admin).post(create_scholarship))
        .route(
            "/{id}",
            get(get_scholarship_admin)
                .put(update_scholarship)
                .delete(delete_scholarship),
        )
}
