use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::{USER_COLUMNS, User};
use crate::utils::errors::AppError;
use crate::utils::jwt::create_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{AuthResponse, LoginRequest, RegisterRequest};

pub struct AuthService;

impl AuthService {
    /// Registers a new account. The role is always `user`; promotion happens
    /// through the admin user endpoints only.
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn register(
        db: &PgPool,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let email = dto.email.to_lowercase();

        let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(db)
            .await?;

        if existing.is_some() {
            return Err(AppError::conflict(anyhow::anyhow!(
                "User with this email already exists"
            )));
        }

        let hashed_password = hash_password(&dto.password)?;

        let sql = format!(
            "INSERT INTO users (email, password, first_name, last_name) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&email)
            .bind(&hashed_password)
            .bind(&dto.first_name)
            .bind(&dto.last_name)
            .fetch_one(db)
            .await?;

        let token = create_token(user.id, &user.email, user.role, jwt_config)?;

        Ok(AuthResponse { user, token })
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            #[sqlx(flatten)]
            user: User,
            password: String,
        }

        let sql = format!("SELECT {USER_COLUMNS}, password FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserWithPassword>(&sql)
            .bind(dto.email.to_lowercase())
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Invalid email or password")))?;

        if !verify_password(&dto.password, &row.password)? {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid email or password"
            )));
        }

        let token = create_token(row.user.id, &row.user.email, row.user.role, jwt_config)?;

        Ok(AuthResponse {
            user: row.user,
            token,
        })
    }

    #[instrument(skip(db))]
    pub async fn current_user(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }
}
