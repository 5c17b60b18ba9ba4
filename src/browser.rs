//! The `browser` protocol domain: browser lifetime and user contexts.

use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::command::{Command, EmptyResult};
use crate::error::BiDiError;
use crate::module::Module;
use crate::transport::Transport;

/// Commands for closing the browser and managing user contexts.
pub struct BrowserModule {
    transport: Transport,
}

impl BrowserModule {
    pub const MODULE_NAME: &'static str = "browser";

    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Terminate all WebDriver sessions and clean up automation state.
    pub async fn close(&self, params: CloseParameters) -> Result<EmptyResult, BiDiError> {
        self.transport.execute_command(params).await
    }

    /// Create a new user context (an isolated storage/cookie partition).
    pub async fn create_user_context(
        &self,
        params: CreateUserContextParameters,
    ) -> Result<CreateUserContextResult, BiDiError> {
        self.transport.execute_command(params).await
    }

    /// List all user contexts, including the default one.
    pub async fn get_user_contexts(
        &self,
        params: GetUserContextsParameters,
    ) -> Result<GetUserContextsResult, BiDiError> {
        self.transport.execute_command(params).await
    }

    /// Remove a user context and close every context belonging to it.
    pub async fn remove_user_context(
        &self,
        params: RemoveUserContextParameters,
    ) -> Result<EmptyResult, BiDiError> {
        self.transport.execute_command(params).await
    }
}

impl Module for BrowserModule {
    fn module_name(&self) -> &'static str {
        Self::MODULE_NAME
    }

    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Parameters for `browser.close`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CloseParameters {}

impl Command for CloseParameters {
    type Result = EmptyResult;

    fn method_name(&self) -> &'static str {
        "browser.close"
    }
}

/// Parameters for `browser.createUserContext`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CreateUserContextParameters {}

impl Command for CreateUserContextParameters {
    type Result = CreateUserContextResult;

    fn method_name(&self) -> &'static str {
        "browser.createUserContext"
    }
}

/// A user context id, as returned by the remote end.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserContextInfo {
    #[serde(rename = "userContext")]
    pub user_context: String,
}

/// Result of `browser.createUserContext`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserContextResult {
    #[serde(rename = "userContext")]
    pub user_context: String,
}

/// Parameters for `browser.getUserContexts`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct GetUserContextsParameters {}

impl Command for GetUserContextsParameters {
    type Result = GetUserContextsResult;

    fn method_name(&self) -> &'static str {
        "browser.getUserContexts"
    }
}

/// Result of `browser.getUserContexts`.
#[derive(Debug, Clone, Deserialize)]
pub struct GetUserContextsResult {
    #[serde(rename = "userContexts")]
    pub user_contexts: Vec<UserContextInfo>,
}

/// Parameters for `browser.removeUserContext`.
#[derive(Debug, Clone, Serialize)]
pub struct RemoveUserContextParameters {
    #[serde(rename = "userContext")]
    pub user_context: String,
}

impl RemoveUserContextParameters {
    pub fn new(user_context: impl Into<String>) -> Self {
        Self {
            user_context: user_context.into(),
        }
    }
}

impl Command for RemoveUserContextParameters {
    type Result = EmptyResult;

    fn method_name(&self) -> &'static str {
        "browser.removeUserContext"
    }
}

#[cfg(test)]
#[path = "browser_tests.rs"]
mod tests;
