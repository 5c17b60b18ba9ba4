//! The `input` protocol domain: action sources and their action lists.
//!
//! Action payloads are the canonical discriminator-tagged variant family in
//! this protocol: every source and every action carries a `type` field that
//! selects the decoding branch, pause actions are markers with a single
//! optional field, and unset optional fields are omitted from the encoded
//! form rather than written as null.

use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::command::{Command, EmptyResult};
use crate::error::BiDiError;
use crate::module::Module;
use crate::transport::Transport;

/// Commands for synthesizing user input.
pub struct InputModule {
    transport: Transport,
}

impl InputModule {
    pub const MODULE_NAME: &'static str = "input";

    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Perform a sequence of actions from one or more input sources.
    pub async fn perform_actions(
        &self,
        params: PerformActionsParameters,
    ) -> Result<EmptyResult, BiDiError> {
        self.transport.execute_command(params).await
    }

    /// Release all input state accumulated by previous `performActions`.
    pub async fn release_actions(
        &self,
        params: ReleaseActionsParameters,
    ) -> Result<EmptyResult, BiDiError> {
        self.transport.execute_command(params).await
    }
}

impl Module for InputModule {
    fn module_name(&self) -> &'static str {
        Self::MODULE_NAME
    }

    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Parameters for `input.performActions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformActionsParameters {
    pub context: String,
    pub actions: Vec<SourceActions>,
}

impl PerformActionsParameters {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            actions: Vec::new(),
        }
    }
}

impl Command for PerformActionsParameters {
    type Result = EmptyResult;

    fn method_name(&self) -> &'static str {
        "input.performActions"
    }
}

/// Parameters for `input.releaseActions`.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseActionsParameters {
    pub context: String,
}

impl ReleaseActionsParameters {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
        }
    }
}

impl Command for ReleaseActionsParameters {
    type Result = EmptyResult;

    fn method_name(&self) -> &'static str {
        "input.releaseActions"
    }
}

/// One input source and its action list, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceActions {
    None {
        id: String,
        actions: Vec<NoneSourceAction>,
    },
    Key {
        id: String,
        actions: Vec<KeySourceAction>,
    },
    Pointer {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        parameters: Option<PointerParameters>,
        actions: Vec<PointerSourceAction>,
    },
    Wheel {
        id: String,
        actions: Vec<WheelSourceAction>,
    },
}

/// Pointer device kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerType {
    Mouse,
    Pen,
    Touch,
}

/// Parameters describing a pointer source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerParameters {
    #[serde(rename = "pointerType")]
    pub pointer_type: PointerType,
}

impl Default for PointerParameters {
    fn default() -> Self {
        Self {
            pointer_type: PointerType::Mouse,
        }
    }
}

/// Actions valid for a source with no input device attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NoneSourceAction {
    Pause {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        duration: Option<u64>,
    },
}

/// Actions valid for a key source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum KeySourceAction {
    Pause {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        duration: Option<u64>,
    },
    KeyDown {
        value: String,
    },
    KeyUp {
        value: String,
    },
}

/// Actions valid for a pointer source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerSourceAction {
    Pause {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        duration: Option<u64>,
    },
    PointerDown {
        button: u64,
    },
    PointerUp {
        button: u64,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        duration: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        origin: Option<String>,
    },
}

/// Actions valid for a wheel source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WheelSourceAction {
    Pause {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        duration: Option<u64>,
    },
    Scroll {
        x: i64,
        y: i64,
        #[serde(rename = "deltaX")]
        delta_x: i64,
        #[serde(rename = "deltaY")]
        delta_y: i64,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        duration: Option<u64>,
    },
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
