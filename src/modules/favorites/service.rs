use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::scholarships::model::{PUBLIC_COLUMNS, Scholarship};
use crate::utils::errors::AppError;

use super::model::Favorites;

#[derive(sqlx::FromRow)]
struct FavoriteIds {
    favorite_scholarships: Vec<Uuid>,
    favorite_jobs: Vec<Uuid>,
}

pub struct FavoritesService;

impl FavoritesService {
    /// The caller's favorites with scholarship references resolved. Dangling
    /// ids and unpublished records are dropped silently; insertion order is
    /// preserved for the rest.
    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, user_id: Uuid) -> Result<Favorites, AppError> {
        let ids = Self::fetch_ids(db, user_id).await?;
        Self::resolve(db, ids).await
    }

    /// Adds a published scholarship to the caller's favorites. Adding one
    /// that is already present succeeds without duplicating it.
    #[instrument(skip(db))]
    pub async fn add_scholarship(
        db: &PgPool,
        user_id: Uuid,
        scholarship_id: Uuid,
    ) -> Result<(Favorites, &'static str), AppError> {
        let published: Option<(bool,)> =
            sqlx::query_as("SELECT published FROM scholarships WHERE id = $1")
                .bind(scholarship_id)
                .fetch_optional(db)
                .await?;

        match published {
            None => {
                return Err(AppError::not_found(anyhow::anyhow!("Scholarship not found")));
            }
            Some((false,)) => {
                return Err(AppError::not_found(anyhow::anyhow!(
                    "Scholarship is not available"
                )));
            }
            Some((true,)) => {}
        }

        let ids = Self::fetch_ids(db, user_id).await?;

        if ids.favorite_scholarships.contains(&scholarship_id) {
            let favorites = Self::resolve(db, ids).await?;
            return Ok((favorites, "Scholarship is already in favorites"));
        }

        // The containment guard keeps a concurrent double-add from appending
        // twice.
        sqlx::query(
            "UPDATE users SET \
             favorite_scholarships = array_append(favorite_scholarships, $1), \
             updated_at = now() \
             WHERE id = $2 AND NOT favorite_scholarships @> ARRAY[$1]",
        )
        .bind(scholarship_id)
        .bind(user_id)
        .execute(db)
        .await?;

        let ids = Self::fetch_ids(db, user_id).await?;
        let favorites = Self::resolve(db, ids).await?;

        Ok((favorites, "Scholarship added to favorites"))
    }

    #[instrument(skip(db))]
    pub async fn remove_scholarship(
        db: &PgPool,
        user_id: Uuid,
        scholarship_id: Uuid,
    ) -> Result<Favorites, AppError> {
        let ids = Self::fetch_ids(db, user_id).await?;

        if !ids.favorite_scholarships.contains(&scholarship_id) {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Scholarship is not in favorites"
            )));
        }

        sqlx::query(
            "UPDATE users SET \
             favorite_scholarships = array_remove(favorite_scholarships, $1), \
             updated_at = now() \
             WHERE id = $2",
        )
        .bind(scholarship_id)
        .bind(user_id)
        .execute(db)
        .await?;

        let ids = Self::fetch_ids(db, user_id).await?;
        Self::resolve(db, ids).await
    }

    async fn fetch_ids(db: &PgPool, user_id: Uuid) -> Result<FavoriteIds, AppError> {
        sqlx::query_as::<_, FavoriteIds>(
            "SELECT favorite_scholarships, favorite_jobs FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    async fn resolve(db: &PgPool, ids: FavoriteIds) -> Result<Favorites, AppError> {
        let scholarships = if ids.favorite_scholarships.is_empty() {
            Vec::new()
        } else {
            let sql = format!(
                "SELECT {PUBLIC_COLUMNS} FROM scholarships \
                 WHERE id = ANY($1) AND published = true \
                 ORDER BY array_position($1, id)"
            );
            sqlx::query_as::<_, Scholarship>(&sql)
                .bind(&ids.favorite_scholarships)
                .fetch_all(db)
                .await?
        };

        Ok(Favorites {
            scholarships,
            jobs: ids.favorite_jobs,
        })
    }
}
