use axum::Json;
use serde::Serialize;

/// Success envelope shared by every endpoint: `{success, data?, message?}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            data: Some(data),
        })
    }

    pub fn with_message(message: &str, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.to_string()),
            data: Some(data),
        })
    }
}

impl ApiResponse<()> {
    pub fn message(message: &str) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.to_string()),
            data: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_envelope() {
        let Json(resp) = ApiResponse::data(42);
        let serialized = serde_json::to_string(&resp).unwrap();
        assert_eq!(serialized, r#"{"success":true,"data":42}"#);
    }

    #[test]
    fn test_message_only_envelope() {
        let Json(resp) = ApiResponse::message("Account deleted successfully");
        let serialized = serde_json::to_string(&resp).unwrap();
        assert!(serialized.contains(r#""success":true"#));
        assert!(serialized.contains("Account deleted successfully"));
        assert!(!serialized.contains("data"));
    }
}
