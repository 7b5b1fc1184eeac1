//
//  pantry-cli
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! Shared error and container types used by every resource module.
//!
//! # Overview
//!
//! - [`ApiError`] - Error type for all client operations
//! - [`ErrorObject`] - The uniform shape every non-2xx response is turned into
//! - [`Paginated`] - Canonical `{ data, meta }` container (from [`pagination`])
//!
//! # Example
//!
//! ```rust
//! use pantry_cli::api::common::{ApiError, ErrorObject};
//!
//! fn describe(result: Result<(), ApiError>) -> String {
//!     match result {
//!         Ok(()) => "ok".to_string(),
//!         Err(e) if e.is_not_found() => "missing".to_string(),
//!         Err(e) => e.to_string(),
//!     }
//! }
//!
//! let err = ApiError::Api(ErrorObject::new("not found").with_status(404));
//! assert_eq!(describe(Err(err)), "missing");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::response::Payload;

mod pagination;

pub use pagination::*;

/// Unified error type for all API client operations.
///
/// # Variants
///
/// | Variant | Description |
/// |---------|-------------|
/// | `Api` | The server answered with a non-2xx status |
/// | `Network` | The transport failed; no response was received |
/// | `Encode` | A request body could not be serialized |
/// | `Decode` | A 2xx body could not be read as the requested type |
/// | `InvalidMethod` | A method name is not a valid HTTP token |
/// | `InvalidHeader` | A header name or value is not valid |
///
/// # Notes
///
/// - `Network` converts automatically from `reqwest::Error`
/// - Only `Api` carries an HTTP status, see [`ApiError::status`]
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server rejected the request.
    ///
    /// The payload is the shaped [`ErrorObject`], including every field the
    /// server put in its error body.
    #[error("{} (HTTP {})", .0.message, .0.status)]
    Api(ErrorObject),

    /// A network-level error occurred during the request.
    ///
    /// Covers connection failures, timeouts, DNS resolution errors and
    /// failures while reading the response body.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request body could not be serialized to JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A successful response did not match the expected type.
    #[error("Unexpected response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The HTTP method name is not a valid token.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// A header name or value contains characters HTTP does not allow.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl ApiError {
    /// Returns the HTTP status for API errors, `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(body) => Some(body.status),
            _ => None,
        }
    }

    /// Returns the shaped error body for API errors.
    pub fn error_object(&self) -> Option<&ErrorObject> {
        match self {
            Self::Api(body) => Some(body),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

/// The uniform error shape produced for every non-2xx response.
///
/// Serializes as a flat object: `message`, `status`, and every other field
/// the server sent, untouched.
///
/// ```rust
/// use pantry_cli::api::common::ErrorObject;
/// use serde_json::json;
///
/// let error = ErrorObject::new("not found").with_status(404);
/// assert_eq!(
///     serde_json::to_value(&error).unwrap(),
///     json!({"message": "not found", "status": 404})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Human readable description of the failure.
    pub message: String,

    /// HTTP status code. Defaults to 500 when nothing better is known.
    #[serde(default = "default_status")]
    pub status: u16,

    /// Any other fields from the server's error payload.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

fn default_status() -> u16 {
    ErrorObject::DEFAULT_STATUS
}

impl Default for ErrorObject {
    fn default() -> Self {
        Self::new(default_message(Self::DEFAULT_STATUS))
    }
}

impl ErrorObject {
    /// Status used when the server gave no usable information.
    pub const DEFAULT_STATUS: u16 = 500;

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Self::DEFAULT_STATUS,
            fields: Map::new(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Looks up a passthrough field from the server payload.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Shapes a normalized error payload.
    ///
    /// Object payloads keep all of their fields and get `status` overwritten
    /// with the HTTP status. A `message` that is not a string (validation
    /// errors often send a list) is kept as `messages`; a list of strings is
    /// also joined into the message. Text payloads become the message.
    /// Anything else gets a generic message.
    pub fn from_payload(status: u16, payload: Payload) -> Self {
        match payload {
            Payload::Json(Value::Object(mut fields)) => {
                fields.remove("status");
                let message = match fields.remove("message") {
                    Some(Value::String(message)) => Some(message),
                    Some(other) => {
                        let joined = join_messages(&other);
                        fields.entry("messages").or_insert(other);
                        joined.or_else(|| extract_message(&fields))
                    }
                    None => extract_message(&fields),
                }
                .unwrap_or_else(|| default_message(status));
                Self {
                    message,
                    status,
                    fields,
                }
            }
            Payload::Json(Value::String(text)) | Payload::Text(text)
                if !text.trim().is_empty() =>
            {
                Self::new(text.trim()).with_status(status)
            }
            _ => Self::new(default_message(status)).with_status(status),
        }
    }
}

fn join_messages(value: &Value) -> Option<String> {
    let parts: Vec<&str> = value.as_array()?.iter().filter_map(Value::as_str).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

fn default_message(status: u16) -> String {
    format!("Request failed with status {}", status)
}

/// Pulls a human readable message out of the error formats seen in the wild.
///
/// Tried in order: `{"message": ".."}`, `{"error": ".."}`,
/// `{"error": {"message": ".."}}`, `{"errors": [{"message": ".."}]}`,
/// `{"error": {"detail": ".."}}`, `{"detail": ".."}`.
fn extract_message(fields: &Map<String, Value>) -> Option<String> {
    if let Some(message) = fields.get("message").and_then(|m| m.as_str()) {
        return Some(message.to_string());
    }

    if let Some(message) = fields.get("error").and_then(|e| e.as_str()) {
        return Some(message.to_string());
    }

    if let Some(message) = fields
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
    {
        return Some(message.to_string());
    }

    if let Some(message) = fields
        .get("errors")
        .and_then(|e| e.as_array())
        .and_then(|arr| arr.first())
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
    {
        return Some(message.to_string());
    }

    if let Some(detail) = fields
        .get("error")
        .and_then(|e| e.get("detail"))
        .and_then(|m| m.as_str())
    {
        return Some(detail.to_string());
    }

    fields
        .get("detail")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Payload {
        Payload::Json(value)
    }

    #[test]
    fn test_object_payload_keeps_fields_and_overwrites_status() {
        let error = ErrorObject::from_payload(
            422,
            object(json!({"message": "invalid", "status": 200, "field": "name"})),
        );
        assert_eq!(error.message, "invalid");
        assert_eq!(error.status, 422);
        assert_eq!(error.field("field"), Some(&json!("name")));
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({"message": "invalid", "status": 422, "field": "name"})
        );
    }

    #[test]
    fn test_message_extracted_from_nested_formats() {
        let error = ErrorObject::from_payload(400, object(json!({"errors": [{"message": "bad"}]})));
        assert_eq!(error.message, "bad");
        assert!(error.field("errors").is_some());

        let error = ErrorObject::from_payload(401, object(json!({"error": "Invalid credentials"})));
        assert_eq!(error.message, "Invalid credentials");

        let error = ErrorObject::from_payload(400, object(json!({"detail": "nope"})));
        assert_eq!(error.message, "nope");
    }

    #[test]
    fn test_non_string_message_is_passed_through() {
        let error = ErrorObject::from_payload(
            400,
            object(json!({
                "message": ["name is required", "email is invalid"],
                "error": "Bad Request"
            })),
        );
        assert_eq!(error.message, "name is required; email is invalid");
        assert_eq!(
            error.field("messages"),
            Some(&json!(["name is required", "email is invalid"]))
        );
        assert_eq!(error.field("error"), Some(&json!("Bad Request")));

        let error = ErrorObject::from_payload(
            409,
            object(json!({"message": {"code": "DUPLICATE"}, "error": "Conflict"})),
        );
        assert_eq!(error.message, "Conflict");
        assert_eq!(error.field("messages"), Some(&json!({"code": "DUPLICATE"})));
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({
                "message": "Conflict",
                "status": 409,
                "messages": {"code": "DUPLICATE"},
                "error": "Conflict"
            })
        );
    }

    #[test]
    fn test_text_and_empty_payloads() {
        let error = ErrorObject::from_payload(502, Payload::Text("Bad Gateway\n".to_string()));
        assert_eq!(error.message, "Bad Gateway");
        assert_eq!(error.status, 502);
        assert!(error.fields.is_empty());

        let error = ErrorObject::from_payload(503, Payload::Null);
        assert_eq!(error.message, "Request failed with status 503");
        assert_eq!(error.status, 503);
    }

    #[test]
    fn test_default_status_is_500() {
        assert_eq!(ErrorObject::default().status, 500);
        assert_eq!(ErrorObject::new("boom").status, 500);
        let parsed: ErrorObject = serde_json::from_value(json!({"message": "x"})).unwrap();
        assert_eq!(parsed.status, 500);
    }

    #[test]
    fn test_api_error_helpers() {
        let err = ApiError::Api(ErrorObject::new("gone").with_status(404));
        assert!(err.is_not_found());
        assert!(!err.is_unauthorized());
        assert_eq!(err.to_string(), "gone (HTTP 404)");

        let err = ApiError::InvalidMethod("BAD METHOD".to_string());
        assert_eq!(err.status(), None);
        assert!(err.error_object().is_none());
    }
}
