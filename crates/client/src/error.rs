//! Client error types

use crate::session::StorageError;
use maidease_core::ValidationError;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Payload rejected before it was sent
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// The session could not be recovered after an authorization failure;
    /// tokens have been cleared and the user must log in again
    #[error("Session expired: {0}")]
    SessionExpired(Box<ClientError>),

    /// A refresh was needed but no refresh token is stored
    #[error("No refresh token available")]
    MissingRefreshToken,

    /// Session persistence failed
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code and the raw response body
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = extract_detail(status, body);
        match status.as_u16() {
            400 | 422 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether this is a 401 from the server
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }

    /// Whether the user has to log in again
    pub const fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired(_))
    }

    /// HTTP status of a server-side failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::ServerError { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self {
            Self::Request(e) if e.is_timeout() => {
                "The server took too long to respond. Please try again.".to_string()
            }
            Self::Request(e) if e.is_decode() => {
                "The server sent a response that could not be read.".to_string()
            }
            Self::Request(_) => {
                "Could not reach the server. Please check your connection.".to_string()
            }
            Self::BadRequest(message)
            | Self::AuthenticationFailed(message)
            | Self::NotFound(message)
            | Self::Forbidden(message)
            | Self::ServerError { message, .. } => message.clone(),
            Self::Validation(e) => e.to_string(),
            Self::SessionExpired(_) | Self::MissingRefreshToken => {
                "Your session has expired. Please log in again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Pull the human readable detail out of an API error body
///
/// The API answers with `{"detail": "..."}`, with a list of field errors
/// (`{"detail": [{"loc": [...], "msg": "..."}]}`) or with `{"message": "..."}`.
/// Anything else falls back to the status line.
pub fn extract_detail(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        match value.get("detail") {
            Some(Value::String(detail)) => return detail.clone(),
            Some(Value::Array(items)) if !items.is_empty() => {
                return items
                    .iter()
                    .map(format_field_error)
                    .collect::<Vec<_>>()
                    .join("; ");
            }
            _ => {}
        }
        if let Some(Value::String(message)) = value.get("message") {
            return message.clone();
        }
    }

    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

fn format_field_error(item: &Value) -> String {
    let Some(msg) = item.get("msg").and_then(Value::as_str) else {
        return match item {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
    };

    let loc = item
        .get("loc")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .map(|p| match p {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(".")
        })
        .unwrap_or_default();

    format!("{loc}: {msg}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail() {
        let msg = extract_detail(
            StatusCode::BAD_REQUEST,
            r#"{"detail":"Email already registered"}"#,
        );
        assert_eq!(msg, "Email already registered");
    }

    #[test]
    fn test_field_error_list() {
        let body = r#"{"detail":[
            {"loc":["body","password"],"msg":"too short","type":"value_error"},
            {"loc":["body","rating",0],"msg":"out of range"}
        ]}"#;
        assert_eq!(
            extract_detail(StatusCode::UNPROCESSABLE_ENTITY, body),
            "body.password: too short; body.rating.0: out of range"
        );
    }

    #[test]
    fn test_message_field_and_status_fallback() {
        assert_eq!(
            extract_detail(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":"boom"}"#),
            "boom"
        );
        assert_eq!(
            extract_detail(StatusCode::SERVICE_UNAVAILABLE, "<html>oops</html>"),
            "503 Service Unavailable"
        );
    }

    #[test]
    fn test_status_classification() {
        assert!(ClientError::from_status(StatusCode::UNAUTHORIZED, "").is_unauthorized());
        assert!(matches!(
            ClientError::from_status(StatusCode::NOT_FOUND, ""),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_GATEWAY, ""),
            ClientError::ServerError { status: 502, .. }
        ));
    }

    #[test]
    fn test_session_expired_user_message() {
        let err = ClientError::SessionExpired(Box::new(ClientError::MissingRefreshToken));
        assert!(err.is_session_expired());
        assert_eq!(err.user_message(), "Your session has expired. Please log in again.");
    }
}
