//! Response body normalization
//!
//! Some backend endpoints wrap their payload as `{success, data, message}`,
//! others return it bare. [`Payload::parse`] tells the two shapes apart
//! explicitly so callers always see the inner payload.

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A 2xx response body, classified by shape
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// `{success, data, message?}` wrapper
    Wrapped {
        /// The backend's `success` flag (`false` if it was not a boolean)
        success: bool,
        /// The wrapped payload
        data: Value,
        /// Optional backend message
        message: Option<String>,
    },
    /// Anything else, passed through untouched
    Bare(Value),
}

impl Payload {
    /// Classify a decoded body
    ///
    /// An object counts as wrapped when it carries both a `success` and a
    /// `data` key, whatever their values.
    #[must_use]
    pub fn parse(body: Value) -> Self {
        match body {
            Value::Object(mut fields) if is_wrapped(&fields) => {
                let success = fields
                    .get("success")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                let message = fields
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let data = fields.remove("data").unwrap_or(Value::Null);
                Self::Wrapped {
                    success,
                    data,
                    message,
                }
            },
            other => Self::Bare(other),
        }
    }

    /// The payload the caller asked for
    #[must_use]
    pub fn into_data(self) -> Value {
        match self {
            Self::Wrapped { data, .. } => data,
            Self::Bare(value) => value,
        }
    }
}

fn is_wrapped(fields: &Map<String, Value>) -> bool {
    fields.contains_key("success") && fields.contains_key("data")
}

/// Decode raw response text
///
/// Empty bodies become `null`; bodies that are not JSON are kept as a string.
#[must_use]
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Decode an unwrapped payload into a typed value
///
/// # Errors
///
/// Returns [`ApiError::UnexpectedPayload`] if the payload does not match `T`.
pub fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, ApiError> {
    serde_json::from_value(payload).map_err(|e| ApiError::UnexpectedPayload(e.to_string()))
}

/// Decode a payload that may or may not carry an object
///
/// `null`, strings, numbers and arrays yield `None`: the backend answered
/// with a status only.
///
/// # Errors
///
/// Returns [`ApiError::UnexpectedPayload`] if an object does not match `T`.
pub fn decode_optional<T: DeserializeOwned>(payload: Value) -> Result<Option<T>, ApiError> {
    if payload.is_object() {
        decode(payload).map(Some)
    } else {
        Ok(None)
    }
}

/// Decode a list payload, treating an absent body as an empty list
///
/// # Errors
///
/// Returns [`ApiError::UnexpectedPayload`] if the payload is not a list of `T`.
pub fn decode_list<T: DeserializeOwned>(payload: Value) -> Result<Vec<T>, ApiError> {
    if payload.is_null() {
        return Ok(Vec::new());
    }
    decode(payload)
}
