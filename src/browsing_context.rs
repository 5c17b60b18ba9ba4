//! The `browsingContext` protocol domain: navigation, screenshots, printing.

use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::error::BiDiError;
use crate::module::Module;
use crate::serialization::{self, RangeError};
use crate::transport::Transport;

/// Event raised when a new browsing context is created.
pub const CONTEXT_CREATED_EVENT: &str = "browsingContext.contextCreated";
/// Event raised when a browsing context is destroyed.
pub const CONTEXT_DESTROYED_EVENT: &str = "browsingContext.contextDestroyed";

/// Commands for navigating and capturing browsing contexts.
pub struct BrowsingContextModule {
    transport: Transport,
}

impl BrowsingContextModule {
    pub const MODULE_NAME: &'static str = "browsingContext";

    pub fn new(transport: Transport) -> Self {
        transport.register_event::<BrowsingContextInfo>(CONTEXT_CREATED_EVENT);
        transport.register_event::<BrowsingContextInfo>(CONTEXT_DESTROYED_EVENT);
        Self { transport }
    }

    /// Navigate a context to a URL, optionally waiting for a readiness state.
    pub async fn navigate(&self, params: NavigateParameters) -> Result<NavigateResult, BiDiError> {
        self.transport.execute_command(params).await
    }

    /// Capture a screenshot of a context as base64-encoded image data.
    pub async fn capture_screenshot(
        &self,
        params: CaptureScreenshotParameters,
    ) -> Result<CaptureScreenshotResult, BiDiError> {
        self.transport.execute_command(params).await
    }

    /// Render a context to a paginated PDF, returned base64 encoded.
    pub async fn print(&self, params: PrintParameters) -> Result<PrintResult, BiDiError> {
        self.transport.execute_command(params).await
    }
}

impl Module for BrowsingContextModule {
    fn module_name(&self) -> &'static str {
        Self::MODULE_NAME
    }

    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Readiness state the remote end waits for before answering a navigate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessState {
    None,
    Interactive,
    Complete,
}

/// Parameters for `browsingContext.navigate`.
#[derive(Debug, Clone, Serialize)]
pub struct NavigateParameters {
    pub context: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait: Option<ReadinessState>,
}

impl NavigateParameters {
    pub fn new(context: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            url: url.into(),
            wait: None,
        }
    }
}

impl Command for NavigateParameters {
    type Result = NavigateResult;

    fn method_name(&self) -> &'static str {
        "browsingContext.navigate"
    }
}

/// Result of `browsingContext.navigate`.
#[derive(Debug, Clone, Deserialize)]
pub struct NavigateResult {
    pub url: String,
    #[serde(default)]
    pub navigation: Option<String>,
}

/// Parameters for `browsingContext.captureScreenshot`.
#[derive(Debug, Clone, Serialize)]
pub struct CaptureScreenshotParameters {
    pub context: String,
}

impl CaptureScreenshotParameters {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
        }
    }
}

impl Command for CaptureScreenshotParameters {
    type Result = CaptureScreenshotResult;

    fn method_name(&self) -> &'static str {
        "browsingContext.captureScreenshot"
    }
}

/// Result of `browsingContext.captureScreenshot`.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptureScreenshotResult {
    /// Base64-encoded image data.
    pub data: String,
}

/// Page orientation for `browsingContext.print`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintOrientation {
    Portrait,
    Landscape,
}

/// Print margins in centimeters. All values must be non-negative; unset
/// values are omitted from the encoded form entirely.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PrintMarginParameters {
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        deserialize_with = "serialization::non_negative_f64"
    )]
    top: Option<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        deserialize_with = "serialization::non_negative_f64"
    )]
    bottom: Option<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        deserialize_with = "serialization::non_negative_f64"
    )]
    left: Option<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        deserialize_with = "serialization::non_negative_f64"
    )]
    right: Option<f64>,
}

impl PrintMarginParameters {
    pub fn top(&self) -> Option<f64> {
        self.top
    }

    pub fn bottom(&self) -> Option<f64> {
        self.bottom
    }

    pub fn left(&self) -> Option<f64> {
        self.left
    }

    pub fn right(&self) -> Option<f64> {
        self.right
    }

    pub fn set_top(&mut self, value: f64) -> Result<(), RangeError> {
        self.top = Some(serialization::check_non_negative(value)?);
        Ok(())
    }

    pub fn set_bottom(&mut self, value: f64) -> Result<(), RangeError> {
        self.bottom = Some(serialization::check_non_negative(value)?);
        Ok(())
    }

    pub fn set_left(&mut self, value: f64) -> Result<(), RangeError> {
        self.left = Some(serialization::check_non_negative(value)?);
        Ok(())
    }

    pub fn set_right(&mut self, value: f64) -> Result<(), RangeError> {
        self.right = Some(serialization::check_non_negative(value)?);
        Ok(())
    }
}

/// Paper size in centimeters. Dimensions must be non-negative.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PrintPageParameters {
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        deserialize_with = "serialization::non_negative_f64"
    )]
    width: Option<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        deserialize_with = "serialization::non_negative_f64"
    )]
    height: Option<f64>,
}

impl PrintPageParameters {
    pub fn width(&self) -> Option<f64> {
        self.width
    }

    pub fn height(&self) -> Option<f64> {
        self.height
    }

    pub fn set_width(&mut self, value: f64) -> Result<(), RangeError> {
        self.width = Some(serialization::check_non_negative(value)?);
        Ok(())
    }

    pub fn set_height(&mut self, value: f64) -> Result<(), RangeError> {
        self.height = Some(serialization::check_non_negative(value)?);
        Ok(())
    }
}

/// Parameters for `browsingContext.print`.
///
/// `scale` is range checked (0.1 to 2.0) at set time and again on decode,
/// so an out-of-range wire value is rejected rather than clamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintParameters {
    pub context: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub background: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub margin: Option<PrintMarginParameters>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub orientation: Option<PrintOrientation>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub page: Option<PrintPageParameters>,
    #[serde(
        rename = "pageRanges",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub page_ranges: Option<Vec<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        deserialize_with = "serialization::print_scale_f64"
    )]
    scale: Option<f64>,
    #[serde(
        rename = "shrinkToFit",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub shrink_to_fit: Option<bool>,
}

impl PrintParameters {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            background: None,
            margin: None,
            orientation: None,
            page: None,
            page_ranges: None,
            scale: None,
            shrink_to_fit: None,
        }
    }

    pub fn scale(&self) -> Option<f64> {
        self.scale
    }

    pub fn set_scale(&mut self, value: f64) -> Result<(), RangeError> {
        self.scale = Some(serialization::check_bounded(value, 0.1, 2.0)?);
        Ok(())
    }
}

impl Command for PrintParameters {
    type Result = PrintResult;

    fn method_name(&self) -> &'static str {
        "browsingContext.print"
    }
}

/// Result of `browsingContext.print`.
#[derive(Debug, Clone, Deserialize)]
pub struct PrintResult {
    /// Base64-encoded PDF data.
    pub data: String,
}

/// Payload of `contextCreated` and `contextDestroyed` events.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowsingContextInfo {
    pub context: String,
    pub url: String,
    #[serde(default)]
    pub children: Option<Vec<BrowsingContextInfo>>,
    #[serde(default)]
    pub parent: Option<String>,
}

#[cfg(test)]
#[path = "browsing_context_tests.rs"]
mod tests;
