//! Directions client error types

use thiserror::Error;

/// Errors that can occur while fetching directions
#[derive(Debug, Error)]
pub enum DirectionsError {
    /// Connection to the Directions service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request returned a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The API answered with a non-OK status field
    #[error("Directions API error: {status}{}", .message.as_deref().map(|m| format!(" - {m}")).unwrap_or_default())]
    ApiStatus {
        /// Status field from the response body (e.g. "REQUEST_DENIED")
        status: String,
        /// Optional `error_message` accompanying the status
        message: Option<String>,
    },

    /// Failed to parse the response body
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Request timed out
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Request was rejected before reaching the network
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl DirectionsError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(DirectionsError::ConnectionFailed("test".to_string()).is_retryable());
        assert!(DirectionsError::RequestFailed("HTTP 502".to_string()).is_retryable());
        assert!(DirectionsError::Timeout { timeout_secs: 10 }.is_retryable());
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!DirectionsError::ParseError("test".to_string()).is_retryable());
        assert!(!DirectionsError::InvalidRequest("test".to_string()).is_retryable());
        assert!(
            !DirectionsError::ApiStatus {
                status: "REQUEST_DENIED".to_string(),
                message: None,
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_api_status_display() {
        let err = DirectionsError::ApiStatus {
            status: "REQUEST_DENIED".to_string(),
            message: Some("The provided API key is invalid.".to_string()),
        };
        let text = err.to_string();
        assert!(text.contains("REQUEST_DENIED"));
        assert!(text.contains("API key is invalid"));

        let bare = DirectionsError::ApiStatus {
            status: "ZERO_RESULTS".to_string(),
            message: None,
        };
        assert_eq!(bare.to_string(), "Directions API error: ZERO_RESULTS");
    }

    #[test]
    fn test_timeout_display() {
        let err = DirectionsError::Timeout { timeout_secs: 10 };
        assert!(err.to_string().contains("10"));
    }
}
