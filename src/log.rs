//! The `log` protocol domain: remote log entry events.

use std::any::Any;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::module::Module;
use crate::transport::Transport;

/// Event raised when the remote end emits a log entry.
pub const ENTRY_ADDED_EVENT: &str = "log.entryAdded";

/// The log domain has no commands; constructing the module registers the
/// `log.entryAdded` event so entries arrive as typed [`LogEntry`] payloads.
pub struct LogModule {
    _transport: Transport,
}

impl LogModule {
    pub const MODULE_NAME: &'static str = "log";

    pub fn new(transport: Transport) -> Self {
        transport.register_event::<LogEntry>(ENTRY_ADDED_EVENT);
        Self {
            _transport: transport,
        }
    }
}

impl Module for LogModule {
    fn module_name(&self) -> &'static str {
        Self::MODULE_NAME
    }

    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Severity of a remote log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogEntryLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Realm and context a log entry originated from.
#[derive(Debug, Clone, Deserialize)]
pub struct LogEntrySource {
    #[serde(default)]
    pub realm: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

/// Payload of the `log.entryAdded` event.
#[derive(Debug, Clone, Deserialize)]
pub struct LogEntry {
    /// Entry kind, e.g. `"console"` or `"javascript"`.
    #[serde(rename = "type")]
    pub entry_type: String,
    pub level: LogEntryLevel,
    #[serde(default)]
    pub text: Option<String>,
    pub timestamp: u64,
    pub source: LogEntrySource,
    /// Console method for console entries (`"log"`, `"error"`, ...).
    #[serde(default)]
    pub method: Option<String>,
    /// Console arguments for console entries.
    #[serde(default)]
    pub args: Option<Vec<Value>>,
}
