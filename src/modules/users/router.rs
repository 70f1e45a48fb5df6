use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{
    change_password, delete_account, delete_user, get_profile, get_user, get_users,
    update_profile, update_user,
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(get_profile).put(update_profile).delete(delete_account),
        )
        .route("/change-password", put(change_password))
}

pub fn init_admin_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}
