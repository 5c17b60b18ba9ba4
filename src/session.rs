//! The `session` protocol domain.

use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::command::{Command, EmptyResult};
use crate::error::BiDiError;
use crate::module::Module;
use crate::transport::Transport;

/// Commands for session status and event subscription.
#[derive(Debug)]
pub struct SessionModule {
    transport: Transport,
}

impl SessionModule {
    pub const MODULE_NAME: &'static str = "session";

    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Query whether the remote end is ready to accept new sessions.
    pub async fn status(&self, params: StatusParameters) -> Result<StatusResult, BiDiError> {
        self.transport.execute_command(params).await
    }

    /// Subscribe to events by name, optionally scoped to contexts.
    pub async fn subscribe(&self, params: SubscribeParameters) -> Result<EmptyResult, BiDiError> {
        self.transport.execute_command(params).await
    }

    /// Remove event subscriptions previously added with `subscribe`.
    pub async fn unsubscribe(&self, params: UnsubscribeParameters) -> Result<EmptyResult, BiDiError> {
        self.transport.execute_command(params).await
    }
}

impl Module for SessionModule {
    fn module_name(&self) -> &'static str {
        Self::MODULE_NAME
    }

    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Parameters for `session.status`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusParameters {}

impl Command for StatusParameters {
    type Result = StatusResult;

    fn method_name(&self) -> &'static str {
        "session.status"
    }
}

/// Result of `session.status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResult {
    pub ready: bool,
    pub message: String,
}

/// Parameters for `session.subscribe`.
#[derive(Debug, Clone, Serialize)]
pub struct SubscribeParameters {
    pub events: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contexts: Option<Vec<String>>,
}

impl SubscribeParameters {
    pub fn new(events: Vec<String>) -> Self {
        Self {
            events,
            contexts: None,
        }
    }
}

impl Command for SubscribeParameters {
    type Result = EmptyResult;

    fn method_name(&self) -> &'static str {
        "session.subscribe"
    }
}

/// Parameters for `session.unsubscribe`.
#[derive(Debug, Clone, Serialize)]
pub struct UnsubscribeParameters {
    pub events: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contexts: Option<Vec<String>>,
}

impl UnsubscribeParameters {
    pub fn new(events: Vec<String>) -> Self {
        Self {
            events,
            contexts: None,
        }
    }
}

impl Command for UnsubscribeParameters {
    type Result = EmptyResult;

    fn method_name(&self) -> &'static str {
        "session.unsubscribe"
    }
}
