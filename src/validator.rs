use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::utils::errors::AppError;

fn collect_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                match error.message.as_ref() {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{} is invalid", field),
                }
            })
        })
        .collect();
    messages.sort();
    messages
}

/// JSON extractor that runs `validator` rules on the deserialized payload.
/// Failures surface as a 400 with a joined message plus the structured
/// per-field list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let error_msg = rejection.body_text();

                if error_msg.contains("missing field") {
                    let field = error_msg
                        .split("missing field `")
                        .nth(1)
                        .and_then(|s| s.split('`').next())
                        .unwrap_or("unknown");
                    return AppError::bad_request(anyhow!("{} is required", field));
                }

                if error_msg.contains("invalid type") {
                    return AppError::bad_request(anyhow!("Invalid field type in request"));
                }

                if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
                    return AppError::bad_request(anyhow!(
                        "Missing 'Content-Type: application/json' header"
                    ));
                }

                AppError::bad_request(anyhow!("Invalid request body"))
            })?;

        value.validate().map_err(|errors| {
            let details = collect_errors(&errors);
            AppError::validation(details.join(", "), details)
        })?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Validate)]
    struct Sample {
        #[validate(email(message = "must be a valid email"))]
        email: String,
        #[validate(length(min = 6, message = "must be at least 6 characters"))]
        password: String,
    }

    #[test]
    fn test_collect_errors_formats_field_messages() {
        let sample = Sample {
            email: "not-an-email".to_string(),
            password: "abc".to_string(),
        };
        let errors = sample.validate().unwrap_err();
        let messages = collect_errors(&errors);

        assert_eq!(messages.len(), 2);
        assert!(messages.iter().any(|m| m == "email: must be a valid email"));
        assert!(
            messages
                .iter()
                .any(|m| m == "password: must be at least 6 characters")
        );
    }

    #[test]
    fn test_collect_errors_empty_for_valid_payload() {
        let sample = Sample {
            email: "user@example.com".to_string(),
            password: "secret123".to_string(),
        };
        assert!(sample.validate().is_ok());
    }
}
