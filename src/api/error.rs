// API error type module

use std::fmt;

use hyper::StatusCode;

/// Structured API error carrying an HTTP status and an optional message
///
/// Rendered by `response::error_response` as `{"error":"<message>"}` with
/// the carried status. The status defaults to 400 when unspecified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
        }
    }

    /// An error with a status but no message; formats as "(none)"
    pub const fn with_status(status: StatusCode) -> Self {
        Self {
            status,
            message: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// The message to serialize, substituting "(none)" when absent
    pub fn message_or_default(&self) -> &str {
        self.message.as_deref().unwrap_or("(none)")
    }
}

impl Default for ApiError {
    fn default() -> Self {
        Self::with_status(StatusCode::BAD_REQUEST)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message_or_default())
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_400() {
        let err = ApiError::default();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message_or_default(), "(none)");
    }

    #[test]
    fn test_not_found_carries_status_and_message() {
        let err = ApiError::not_found("Item [bogus] not found");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message_or_default(), "Item [bogus] not found");
    }

    #[test]
    fn test_missing_message_substitutes_none() {
        let err = ApiError::with_status(StatusCode::NOT_FOUND);
        assert_eq!(err.message_or_default(), "(none)");
    }
}
