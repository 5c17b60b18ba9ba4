//! Protocol module trait for the driver's module registry.

use std::any::Any;
use std::sync::Arc;

/// A named group of domain commands built atop the correlation engine.
///
/// Modules hold a [`Transport`](crate::Transport) clone (a shared handle,
/// not ownership of the engine) and expose one async method per command.
/// The registry keys them by `module_name`.
pub trait Module: Send + Sync + 'static {
    /// Registry key, e.g. `"browsingContext"`.
    fn module_name(&self) -> &'static str;

    /// Upcast used by the registry for typed retrieval.
    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}
