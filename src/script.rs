//! The `script` protocol domain: script evaluation targets and results.

use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command::Command;
use crate::error::BiDiError;
use crate::module::Module;
use crate::transport::Transport;

/// Commands for evaluating script in a realm or browsing context.
pub struct ScriptModule {
    transport: Transport,
}

impl ScriptModule {
    pub const MODULE_NAME: &'static str = "script";

    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Evaluate an expression against a target realm or context.
    pub async fn evaluate(&self, params: EvaluateParameters) -> Result<EvaluateResult, BiDiError> {
        self.transport.execute_command(params).await
    }
}

impl Module for ScriptModule {
    fn module_name(&self) -> &'static str {
        Self::MODULE_NAME
    }

    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Where a script runs: a browsing context (with optional sandbox) or a
/// realm. The two branches are distinguished by which field is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    Context {
        context: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        sandbox: Option<String>,
    },
    Realm {
        realm: String,
    },
}

/// Parameters for `script.evaluate`.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluateParameters {
    pub expression: String,
    pub target: Target,
    #[serde(rename = "awaitPromise")]
    pub await_promise: bool,
}

impl EvaluateParameters {
    pub fn new(expression: impl Into<String>, target: Target) -> Self {
        Self {
            expression: expression.into(),
            target,
            await_promise: false,
        }
    }
}

impl Command for EvaluateParameters {
    type Result = EvaluateResult;

    fn method_name(&self) -> &'static str {
        "script.evaluate"
    }
}

/// Result of `script.evaluate`, discriminated by `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EvaluateResult {
    Success {
        result: Value,
        realm: String,
    },
    Exception {
        #[serde(rename = "exceptionDetails")]
        exception_details: Value,
        realm: String,
    },
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
