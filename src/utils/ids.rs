use uuid::Uuid;

use crate::utils::errors::AppError;

/// Parses a path-parameter identifier. A malformed value is a 400, distinct
/// from the 404 a well-formed-but-unknown id produces later.
pub fn parse_id(raw: &str, resource: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::bad_request(anyhow::anyhow!("Invalid {} ID", resource)))
}
