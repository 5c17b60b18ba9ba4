//! BiDi wire message types and inbound message classification.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outgoing command envelope.
#[derive(Debug, Serialize)]
pub struct CommandRequest {
    pub id: u64,
    pub method: String,
    pub params: Value,
}

/// Error response from the remote end.
///
/// The `id` is absent when the remote end could not correlate the error
/// to a command it received.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub id: Option<u64>,
    pub error: String,
    pub message: String,
}

/// An inbound message, classified by shape.
#[derive(Debug)]
pub enum InboundMessage {
    /// Success response correlated to a command by id.
    CommandSuccess { id: u64, result: Value },
    /// Error response, possibly uncorrelated (absent id).
    CommandError(ErrorResponse),
    /// Unsolicited event notification.
    Event { method: String, params: Value },
    /// Anything that matches no protocol message shape, raw text preserved.
    Unrecognized(String),
}

/// Loose decode target used only for classification.
#[derive(Deserialize)]
struct RawMessage {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    params: Option<Value>,
}

/// Classify an inbound text payload into exactly one [`InboundMessage`].
///
/// Never fails; unparseable input classifies as `Unrecognized`.
pub fn classify(text: &str) -> InboundMessage {
    let raw: RawMessage = match serde_json::from_str(text) {
        Ok(raw) => raw,
        Err(_) => return InboundMessage::Unrecognized(text.to_string()),
    };

    if let (Some(id), Some(result)) = (raw.id, raw.result) {
        return InboundMessage::CommandSuccess { id, result };
    }

    if let (Some(error), Some(message)) = (raw.error, raw.message) {
        return InboundMessage::CommandError(ErrorResponse {
            id: raw.id,
            error,
            message,
        });
    }

    if raw.id.is_none() {
        if let (Some(method), Some(params)) = (raw.method, raw.params) {
            return InboundMessage::Event { method, params };
        }
    }

    InboundMessage::Unrecognized(text.to_string())
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
