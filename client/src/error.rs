//! Error types for the inventory API client
//!
//! Every failed call surfaces as an [`ApiError`]. [`ApiError::envelope`] turns
//! it into the uniform [`ErrorEnvelope`] shape presented to callers.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Message used for every HTTP 500 response
pub const BACKEND_ERROR_MESSAGE: &str = "Backend Server Error (500): This is likely a backend issue \
     related to database field mappings or entity configuration. Check server logs for details.";

/// Message used when a request was sent but no response arrived
pub const NETWORK_ERROR_MESSAGE: &str =
    "No response received from server. Please check your connection.";

/// Errors that can occur when talking to the inventory backend
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    /// The server answered with a non-2xx status
    #[error("{message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status, if any
        status_text: String,
        /// Human-readable message (backend-provided or synthesized)
        message: String,
        /// Response body as received
        body: Value,
        /// Set for HTTP 500, which points at backend misconfiguration
        backend_error: bool,
    },

    /// The request went out but no response came back (includes timeouts)
    #[error("No response received from server. Please check your connection.")]
    Network(String),

    /// The request could not be constructed or sent
    #[error("Request failed: {0}")]
    Request(String),

    /// A 2xx body did not have the expected shape
    #[error("Unexpected response from server: {0}")]
    UnexpectedPayload(String),
}

impl ApiError {
    /// Classify a non-2xx response
    #[must_use]
    pub fn from_status(status: StatusCode, body: Value) -> Self {
        let status_text = status.canonical_reason().unwrap_or_default().to_string();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            return Self::Server {
                status: status.as_u16(),
                status_text,
                message: BACKEND_ERROR_MESSAGE.to_string(),
                body,
                backend_error: true,
            };
        }

        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .map_or_else(
                || format!("Error: {} {status_text}", status.as_u16()).trim_end().to_string(),
                str::to_string,
            );

        Self::Server {
            status: status.as_u16(),
            status_text,
            message,
            body,
            backend_error: false,
        }
    }

    /// Classify a transport-level failure from `reqwest`
    #[must_use]
    pub fn from_transport(error: &reqwest::Error) -> Self {
        if error.is_builder() {
            Self::Request(error.to_string())
        } else {
            Self::Network(error.to_string())
        }
    }

    /// HTTP status, when a response was received
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Network(_) | Self::Request(_) | Self::UnexpectedPayload(_) => None,
        }
    }

    /// Whether this failure is an HTTP 500 from the backend
    #[must_use]
    pub const fn is_backend_error(&self) -> bool {
        matches!(self, Self::Server { backend_error: true, .. })
    }

    /// Normalize into the uniform error envelope
    #[must_use]
    pub fn envelope(&self) -> ErrorEnvelope {
        let (data, original_error, backend_error) = match self {
            Self::Server {
                status,
                status_text,
                body,
                backend_error,
                ..
            } => (
                body.clone(),
                Some(format!("HTTP {status} {status_text}").trim_end().to_string()),
                backend_error.then_some(true),
            ),
            Self::Network(detail) | Self::Request(detail) | Self::UnexpectedPayload(detail) => {
                (Value::Null, Some(detail.clone()), None)
            },
        };

        ErrorEnvelope {
            success: false,
            message: self.to_string(),
            data,
            original_error,
            status: self.status(),
            backend_error,
        }
    }
}

/// Uniform shape of every failed API call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Always `false`
    pub success: bool,
    /// Human-readable failure message
    pub message: String,
    /// Response body for server errors, `null` otherwise
    pub data: Value,
    /// Underlying transport or status detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_error: Option<String>,
    /// HTTP status, absent when no response arrived
    pub status: Option<u16>,
    /// `Some(true)` for HTTP 500
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_error: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_500_is_a_backend_error() {
        let error = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, json!({"message": "boom"}));
        assert!(error.is_backend_error());
        assert!(error.to_string().contains("Check server logs"));

        let envelope = error.envelope();
        assert!(!envelope.success);
        assert_eq!(envelope.status, Some(500));
        assert_eq!(envelope.backend_error, Some(true));
        assert_eq!(envelope.data, json!({"message": "boom"}));
    }

    #[test]
    fn backend_message_is_surfaced() {
        let error = ApiError::from_status(StatusCode::NOT_FOUND, json!({"message": "SKU not found"}));
        assert_eq!(error.to_string(), "SKU not found");
        assert!(!error.is_backend_error());
        assert_eq!(error.envelope().backend_error, None);
    }

    #[test]
    fn missing_message_falls_back_to_status_line() {
        let error = ApiError::from_status(StatusCode::CONFLICT, Value::Null);
        assert_eq!(error.to_string(), "Error: 409 Conflict");

        let blank = ApiError::from_status(StatusCode::BAD_REQUEST, json!({"message": ""}));
        assert_eq!(blank.to_string(), "Error: 400 Bad Request");
    }

    #[test]
    fn network_error_has_no_status() {
        let envelope = ApiError::Network("connection reset".to_string()).envelope();
        assert_eq!(envelope.message, NETWORK_ERROR_MESSAGE);
        assert_eq!(envelope.status, None);
        assert_eq!(envelope.original_error.as_deref(), Some("connection reset"));
    }

    #[test]
    fn request_error_embeds_detail() {
        let error = ApiError::Request("relative URL without a base".to_string());
        assert_eq!(error.to_string(), "Request failed: relative URL without a base");
        assert_eq!(error.envelope().data, Value::Null);
    }

    #[test]
    fn envelope_serializes_camel_case() {
        let envelope = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, Value::Null).envelope();
        let value = serde_json::to_value(&envelope).unwrap_or_default();
        assert_eq!(value["backendError"], json!(true));
        assert_eq!(value["status"], json!(500));
        assert!(value.get("originalError").is_some());
    }
}
