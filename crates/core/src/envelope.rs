//! Normalized response envelope.
//!
//! Every entry point answers with `{ success, data?, error?, message? }`.
//! [`normalize`] turns a raw collaborator response into that shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `{ success, data?, error?, message? }` response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn failure(error: impl Into<String>, message: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// A collaborator response as received, before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    /// Parsed JSON body. Non-JSON text is kept as a string, an empty body
    /// is `null`.
    pub body: Value,
}

impl RawResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Build from a status and the raw body text.
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        };
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body rendered as text, for error reporting.
    pub fn body_text(&self) -> String {
        match &self.body {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Human-readable message from an error body: the `message` or `error`
    /// member when it is a string, otherwise the whole body text.
    pub fn remote_message(&self) -> Option<String> {
        let member = ["message", "error", "msg"]
            .iter()
            .find_map(|key| self.body.get(key).and_then(Value::as_str));
        match member {
            Some(m) => Some(m.to_string()),
            None => Some(self.body_text()).filter(|t| !t.is_empty()),
        }
    }
}

/// Map a raw collaborator response onto the envelope.
///
/// A 2xx response carries its body unchanged as `data`.
pub fn normalize(raw: RawResponse) -> Envelope {
    if raw.is_success() {
        return Envelope::ok(raw.body);
    }
    let message = raw.remote_message();
    Envelope::failure(
        format!("Remote service returned HTTP {}", raw.status),
        message,
    )
}
