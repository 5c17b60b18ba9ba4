//! BiDi client error types.

use thiserror::Error;

/// Errors surfaced by the BiDi client.
#[derive(Debug, Error)]
pub enum BiDiError {
    /// Failed to establish the WebSocket connection.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// WebSocket-level send or receive error.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// An operation that requires an open connection was invoked before
    /// `connect` (or after `disconnect`).
    #[error("Not connected to a remote end")]
    NotConnected,

    /// The remote end answered a command with an error response.
    #[error("'{kind}' error executing command {method}: {message}")]
    Command {
        kind: String,
        message: String,
        method: String,
    },

    /// No response for a command within the configured timeout.
    #[error("Command {method} timed out after {timeout_ms}ms")]
    CommandTimeout { method: String, timeout_ms: u64 },

    /// A success response arrived but its `result` payload did not match
    /// the shape the caller declared.
    #[error("Could not convert response for {method} to {expected}: {source}")]
    ResponseShape {
        method: String,
        expected: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Serialization error building an outgoing message.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A module is already registered under this name.
    #[error("Module '{0}' is already registered with this driver")]
    DuplicateModule(String),

    /// No module is registered under this name.
    #[error("Module '{0}' is not registered with this driver")]
    ModuleNotFound(String),

    /// A module is registered under this name, but it is not of the
    /// requested concrete type.
    #[error("Module '{name}' is registered with this driver, but the module object is not of type {expected}")]
    ModuleTypeMismatch { name: String, expected: &'static str },
}

impl From<tokio_tungstenite::tungstenite::Error> for BiDiError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        BiDiError::WebSocket(e.to_string())
    }
}
