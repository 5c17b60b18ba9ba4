//! Command parameter trait tying a method name to its expected result shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Parameters for a single protocol command.
///
/// An implementation serializes as the wire-level `params` object and
/// declares the shape the correlated success response decodes into.
pub trait Command: Serialize + Send + Sync {
    /// Result payload shape for this command.
    type Result: DeserializeOwned + Send + 'static;

    /// Fully qualified method name, e.g. `"session.status"`.
    fn method_name(&self) -> &'static str;
}

/// Result payload for commands whose success response carries no data.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct EmptyResult {}
