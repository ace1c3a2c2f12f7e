//! Response types and helpers for mock handlers.

use serde::Serialize;
use serde_json::Value;

/// Result of a handled mock request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MockResponse {
    /// HTTP-like status code
    pub code: u16,
    /// JSON body; `Value::Null` for empty responses
    pub body: Value,
}

impl MockResponse {
    pub fn new(code: u16, body: Value) -> Self {
        Self { code, body }
    }

    /// Returns true for 2xx codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// Serializes the body, or returns an empty buffer for a null body.
    pub fn body_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        if self.body.is_null() {
            Ok(Vec::new())
        } else {
            serde_json::to_vec(&self.body)
        }
    }
}

/// Consistent API error response wrapper
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error code (HTTP status code as string)
    pub code: String,
    /// Error message
    pub message: String,
    /// Optional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Consistent error response wrapper
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always false for error responses
    pub success: bool,
    /// Error information
    pub error: ApiError,
}

/// Helper to create error response
pub fn error_response(code: u16, message: String, details: Option<String>) -> ErrorResponse {
    ErrorResponse {
        success: false,
        error: ApiError {
            code: code.to_string(),
            message,
            details,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(error_response(404, "Not Found".to_string(), None)).unwrap();
        assert_eq!(
            body,
            json!({"success": false, "error": {"code": "404", "message": "Not Found"}})
        );
    }

    #[test]
    fn test_empty_body_bytes() {
        let response = MockResponse::new(204, Value::Null);
        assert!(response.is_success());
        assert!(response.body_bytes().unwrap().is_empty());
    }
}
