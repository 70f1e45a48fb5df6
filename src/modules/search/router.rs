use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::search;

pub fn init_search_router() -> Router<AppState> {
    Router::new().route("/", get(search))
}
