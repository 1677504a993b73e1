//! Client error types

use shared::ErrorCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend rejected the request with a `{message}` body
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Message supplied by the backend, if the error carried one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Text to show a user: the backend's message when available,
    /// otherwise the error itself
    pub fn user_message(&self) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| self.to_string())
    }

    /// Closest shared error code
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            ClientError::Http(e) => match e.status() {
                Some(status) => ErrorCode::from_http_status(status),
                None => ErrorCode::NetworkError,
            },
            ClientError::Api { status, .. } => shared::http::StatusCode::from_u16(*status)
                .map(ErrorCode::from_http_status)
                .unwrap_or(ErrorCode::Unknown),
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => {
                ErrorCode::InvalidFormat
            }
            ClientError::Unauthorized(_) => ErrorCode::NotAuthenticated,
            ClientError::Forbidden(_) => ErrorCode::PermissionDenied,
            ClientError::NotFound(_) => ErrorCode::NotFound,
            ClientError::Validation(_) => ErrorCode::ValidationFailed,
            ClientError::Internal(_) => ErrorCode::InternalError,
            ClientError::Config(_) => ErrorCode::ConfigError,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_backend_message() {
        let err = ClientError::Api {
            status: 400,
            message: "Insufficient stock".into(),
        };
        assert_eq!(err.user_message(), "Insufficient stock");
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_user_message_falls_back_to_display() {
        let err = ClientError::Internal("boom".into());
        assert_eq!(err.server_message(), None);
        assert_eq!(err.user_message(), "Internal error: boom");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[test]
    fn test_unauthorized_code() {
        assert_eq!(
            ClientError::Unauthorized("expired".into()).code(),
            ErrorCode::NotAuthenticated
        );
    }
}
