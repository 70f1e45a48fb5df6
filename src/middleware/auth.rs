use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::modules::auth::model::Claims;
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_bearer_token, verify_token};

/// Extractor that validates the bearer token and provides the caller's
/// claims. Rejection is a 401 naming the specific failure (missing header,
/// malformed header, expired or invalid token).
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<uuid::Uuid, AppError> {
        uuid::Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid user ID in token")))
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn is_admin(&self) -> bool {
        self.0.role == UserRole::Admin.as_str()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::unauthorized(anyhow::anyhow!(
                    "Authentication required. Please provide a token."
                ))
            })?;

        let token = extract_bearer_token(auth_header).ok_or_else(|| {
            AppError::unauthorized(anyhow::anyhow!("Invalid authorization header format"))
        })?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Optional-auth extractor: same extraction and verification path as
/// [`AuthUser`], but every failure is swallowed and the request proceeds
/// anonymously. Used by endpoints that broaden behavior for authenticated
/// callers while remaining usable without a token.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<Claims>);

impl MaybeAuthUser {
    pub fn is_admin(&self) -> bool {
        self.0
            .as_ref()
            .is_some_and(|claims| claims.role == UserRole::Admin.as_str())
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = AuthUser::from_request_parts(parts, state)
            .await
            .map(|user| user.0)
            .ok();

        Ok(MaybeAuthUser(claims))
    }
}

/// Role gate for admin routes. Runs the required-auth path first, so a
/// request without credentials fails with the auth 401 before the role
/// check can 403.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        if !auth_user.is_admin() {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Admin access required. Insufficient permissions."
            )));
        }

        Ok(RequireAdmin(auth_user))
    }
}
