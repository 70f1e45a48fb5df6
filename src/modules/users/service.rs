use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::scholarships::model::{PUBLIC_COLUMNS, Scholarship};
use crate::utils::errors::AppError;
use crate::utils::pagination::{PaginationParams, parse_sort};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::sql::escape_like;

use super::model::{
    AdminUpdateUserRequest, ChangePasswordRequest, ListUsersQuery, USER_COLUMNS, UpdateProfileRequest,
    User, UserDetail, UserRole,
};

const SORTABLE_COLUMNS: &[&str] = &[
    "created_at",
    "updated_at",
    "email",
    "first_name",
    "last_name",
    "role",
];

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_profile(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_profile(
        db: &PgPool,
        user_id: Uuid,
        dto: UpdateProfileRequest,
    ) -> Result<User, AppError> {
        let email = dto.email.map(|email| email.to_lowercase());

        if let Some(email) = &email {
            Self::ensure_email_available(db, email, user_id).await?;
        }

        let sql = format!(
            "UPDATE users SET \
             email = COALESCE($1, email), \
             first_name = COALESCE($2, first_name), \
             last_name = COALESCE($3, last_name), \
             updated_at = now() \
             WHERE id = $4 \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&email)
            .bind(&dto.first_name)
            .bind(&dto.last_name)
            .bind(user_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn change_password(
        db: &PgPool,
        user_id: Uuid,
        dto: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let stored: Option<(String,)> = sqlx::query_as("SELECT password FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(db)
            .await?;

        let (password_hash,) =
            stored.ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        if !verify_password(&dto.current_password, &password_hash)? {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Current password is incorrect"
            )));
        }

        let new_hash = hash_password(&dto.new_password)?;

        sqlx::query("UPDATE users SET password = $1, updated_at = now() WHERE id = $2")
            .bind(&new_hash)
            .bind(user_id)
            .execute(db)
            .await?;

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn delete_account(db: &PgPool, user_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        Ok(())
    }

    fn push_filters(
        query: &mut QueryBuilder<'_, Postgres>,
        role: Option<UserRole>,
        search: Option<&str>,
    ) {
        query.push(" WHERE TRUE");

        if let Some(role) = role {
            query.push(" AND role = ").push_bind(role);
        }
        if let Some(search) = search {
            let pattern = format!("%{}%", escape_like(search));
            query
                .push(" AND (email ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR first_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR last_name ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }

    /// Admin listing: optional role filter and substring search across email
    /// and names.
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, params: &ListUsersQuery) -> Result<(Vec<User>, i64), AppError> {
        let role = match &params.role {
            Some(raw) => Some(UserRole::parse(raw).ok_or_else(|| {
                AppError::bad_request(anyhow::anyhow!("Role must be 'user' or 'admin'"))
            })?),
            None => None,
        };
        let pagination = PaginationParams::new(params.page, params.limit);
        let (column, direction) = parse_sort(params.sort.as_deref(), SORTABLE_COLUMNS, "created_at");

        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM users");
        Self::push_filters(&mut count_query, role, params.search.as_deref());
        let total: i64 = count_query.build_query_scalar().fetch_one(db).await?;

        let mut query = QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users"));
        Self::push_filters(&mut query, role, params.search.as_deref());
        query.push(format!(" ORDER BY {column} {direction}"));
        query.push(" LIMIT ").push_bind(pagination.limit());
        query.push(" OFFSET ").push_bind(pagination.offset());

        let users = query.build_query_as::<User>().fetch_all(db).await?;

        Ok((users, total))
    }

    /// Admin detail view with the favorite scholarships populated. Dangling
    /// or unpublished references are dropped, keeping insertion order.
    #[instrument(skip(db))]
    pub async fn get_detail(db: &PgPool, id: Uuid) -> Result<UserDetail, AppError> {
        let user = Self::get_profile(db, id).await?;

        let favorites = if user.favorite_scholarships.is_empty() {
            Vec::new()
        } else {
            let sql = format!(
                "SELECT {PUBLIC_COLUMNS} FROM scholarships \
                 WHERE id = ANY($1) AND published = true \
                 ORDER BY array_position($1, id)"
            );
            sqlx::query_as::<_, Scholarship>(&sql)
                .bind(&user.favorite_scholarships)
                .fetch_all(db)
                .await?
        };

        Ok(UserDetail::from_user(user, favorites))
    }

    #[instrument(skip(db, dto))]
    pub async fn admin_update(
        db: &PgPool,
        id: Uuid,
        dto: AdminUpdateUserRequest,
    ) -> Result<User, AppError> {
        let role = match &dto.role {
            Some(raw) => Some(UserRole::parse(raw).ok_or_else(|| {
                AppError::bad_request(anyhow::anyhow!("Role must be 'user' or 'admin'"))
            })?),
            None => None,
        };

        let email = dto.email.map(|email| email.to_lowercase());

        if let Some(email) = &email {
            Self::ensure_email_available(db, email, id).await?;
        }

        let sql = format!(
            "UPDATE users SET \
             email = COALESCE($1, email), \
             first_name = COALESCE($2, first_name), \
             last_name = COALESCE($3, last_name), \
             role = COALESCE($4, role), \
             updated_at = now() \
             WHERE id = $5 \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&email)
            .bind(&dto.first_name)
            .bind(&dto.last_name)
            .bind(role)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    /// Admin delete. Admins cannot delete their own account through this
    /// path; that would orphan the session issuing the request.
    #[instrument(skip(db))]
    pub async fn admin_delete(db: &PgPool, admin_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if admin_id == id {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "You cannot delete your own account"
            )));
        }

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        Ok(())
    }

    async fn ensure_email_available(
        db: &PgPool,
        email: &str,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        let existing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM users WHERE email = $1 AND id <> $2")
                .bind(email)
                .bind(user_id)
                .fetch_optional(db)
                .await?;

        if existing.is_some() {
            return Err(AppError::conflict(anyhow::anyhow!("Email is already in use")));
        }

        Ok(())
    }
}
