//! Response interpretation.
//!
//! Wraps a raw HTTP response into a uniform decoded view. Classification
//! happens at construction: a status in the error ranges never yields an
//! [`ApiResponse`], it yields a [`DwollaError`] carrying the decoded body,
//! headers and a best-effort message.

use std::collections::HashMap;
use tracing::warn;

use crate::error::DwollaError;

/// Response body after a single JSON decode attempt.
///
/// Decoding never fails loudly: a body that is not valid JSON degrades to
/// its raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedBody {
    /// Body parsed as JSON.
    Json(serde_json::Value),
    /// Body that failed JSON decoding, kept verbatim.
    Raw(String),
}

impl DecodedBody {
    /// Decode `text` as JSON, falling back to the raw string.
    pub fn decode(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Raw(text.to_string()),
        }
    }

    /// The decoded JSON value, if decoding succeeded.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    /// The body as a JSON value; a raw body becomes a JSON string.
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Raw(raw) => serde_json::Value::String(raw.clone()),
        }
    }

    /// Best-effort error message: the `message` field of a JSON object
    /// body, otherwise the body text itself.
    pub fn error_message(&self) -> String {
        if let Self::Json(serde_json::Value::Object(map)) = self
            && let Some(serde_json::Value::String(message)) = map.get("message")
        {
            return message.clone();
        }
        match self {
            Self::Json(value) => value.to_string(),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

/// A classified, decoded HTTP response.
///
/// Only success-range statuses are representable; see
/// [`ApiResponse::from_raw`].
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, keys lowercased.
    pub headers: HashMap<String, String>,
    /// Decoded body.
    pub body: DecodedBody,
}

impl ApiResponse {
    /// Wrap a raw response, classifying its status code.
    ///
    /// Statuses in `500..=510` and `299..=426` never produce an
    /// `ApiResponse`; they come back as [`DwollaError::Server`] and
    /// [`DwollaError::Client`] carrying the decoded body. All other codes
    /// (including 427-499 and 511+) pass through as success; the ranges
    /// are the wrapped API's and are preserved exactly.
    pub fn from_raw(
        status: u16,
        headers: HashMap<String, String>,
        body_text: &str,
    ) -> Result<Self, DwollaError> {
        let body = DecodedBody::decode(body_text);
        match status {
            500..=510 => {
                warn!(status, "server error response");
                Err(DwollaError::Server {
                    code: status,
                    message: body.error_message(),
                    body: body.to_value(),
                    headers,
                })
            }
            299..=426 => {
                warn!(status, "client error response");
                Err(DwollaError::Client {
                    code: status,
                    message: body.error_message(),
                    body: body.to_value(),
                    headers,
                })
            }
            _ => Ok(Self {
                status,
                headers,
                body,
            }),
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Format token from the `Content-Type` header
    /// (`application/json; charset=utf-8` becomes `json`).
    pub fn format(&self) -> Option<String> {
        let content_type = self.header("Content-Type")?;
        let first = content_type.split(';').next()?;
        let format = first.rsplit('/').next()?;
        Some(format.trim().to_lowercase())
    }

    pub fn is_json(&self) -> bool {
        self.format().as_deref() == Some("json")
    }

    /// Pretty-printed body when the response format is JSON.
    pub fn pretty_body(&self) -> Option<String> {
        if self.format().as_deref() != Some("json") {
            return None;
        }
        let value = self.body.as_json()?;
        serde_json::to_string_pretty(value).ok()
    }
}
