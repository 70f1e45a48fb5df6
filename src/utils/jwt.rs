use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::Claims;
use crate::modules::users::model::UserRole;
use crate::utils::errors::AppError;

pub fn create_token(
    user_id: Uuid,
    email: &str,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.token_expiry as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role: role.as_str().to_string(),
        iat: now,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies a token, mapping each failure class to a distinct message so the
/// caller can return a precise 401.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => {
            AppError::unauthorized(anyhow::anyhow!("Token has expired. Please login again."))
        }
        ErrorKind::InvalidToken | ErrorKind::InvalidSignature | ErrorKind::Base64(_) => {
            AppError::unauthorized(anyhow::anyhow!("Invalid token. Please login again."))
        }
        _ => AppError::unauthorized(anyhow::anyhow!("Authentication failed.")),
    })
}

/// Parses a two-part `Bearer <token>` Authorization header value. A missing
/// or malformed header is `None`, not an error; callers decide whether
/// absence is fatal.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    let parts: Vec<&str> = header.split(' ').collect();
    if parts.len() != 2 || parts[0] != "Bearer" || parts[1].is_empty() {
        return None;
    }
    Some(parts[1])
}
