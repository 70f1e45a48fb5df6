use serde::Serialize;
use uuid::Uuid;

use crate::modules::scholarships::model::Scholarship;

/// A user's favorites with the scholarship references resolved to published
/// records. Jobs stay as raw ids until a job catalog exists.
#[derive(Debug, Serialize)]
pub struct Favorites {
    pub scholarships: Vec<Scholarship>,
    pub jobs: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Favorites,
}
