use chrono::{DateTime, Utc};
use scholarhub::config::cors::CorsConfig;
use scholarhub::config::jwt::JwtConfig;
use scholarhub::config::rate_limit::RateLimitConfig;
use scholarhub::modules::users::model::UserRole;
use scholarhub::router::init_router;
use scholarhub::state::AppState;
use scholarhub::utils::jwt::create_token;
use scholarhub::utils::password::hash_password;
#[allow(unused_imports)]
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Create a test user with the given role ("user" or "admin").
#[allow(dead_code)]
pub async fn create_test_user(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    password: &str,
    role: &str,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO users (email, password, role) \
         VALUES ($1, $2, $3::user_role) \
         RETURNING id",
    )
    .bind(email)
    .bind(&hashed)
    .bind(role)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
        role: UserRole::parse(role).unwrap(),
    }
}

#[allow(dead_code)]
pub struct TestScholarship {
    pub id: Uuid,
}

#[allow(dead_code)]
pub async fn create_test_scholarship(
    tx: &mut Transaction<'_, Postgres>,
    title: &str,
    published: bool,
    deadline: DateTime<Utc>,
    tags: &[&str],
) -> TestScholarship {
    let tags: Vec<String> = tags.iter().map(|tag| tag.to_string()).collect();

    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO scholarships (title, description, organizer, deadline, published, tags) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id",
    )
    .bind(title)
    .bind("Awarded annually to outstanding applicants.")
    .bind("Test Organizer")
    .bind(deadline)
    .bind(published)
    .bind(&tags)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestScholarship { id }
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        token_expiry: 3600,
    }
}

#[allow(dead_code)]
pub fn setup_test_app(pool: PgPool) -> axum::Router {
    let state = AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig::default(),
        rate_limit_config: RateLimitConfig::default(),
    };
    init_router(state)
}

/// Mint a token for a fixture user without going through the login endpoint.
#[allow(dead_code)]
pub fn token_for(user: &TestUser) -> String {
    create_token(user.id, &user.email, user.role, &test_jwt_config()).unwrap()
}
