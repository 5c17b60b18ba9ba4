//! Driver: module registry over the transport's correlation engine.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;

use crate::browser::BrowserModule;
use crate::browsing_context::BrowsingContextModule;
use crate::command::Command;
use crate::connection::WebSocketConnection;
use crate::error::BiDiError;
use crate::input::InputModule;
use crate::log::LogModule;
use crate::module::Module;
use crate::script::ScriptModule;
use crate::session::SessionModule;
use crate::transport::{Transport, TransportEvent};

/// Entry point for protocol callers.
///
/// Owns the module registry and hands each module a [`Transport`] clone so
/// domain commands all flow through the same correlation engine. The
/// standard protocol modules are registered at construction; additional
/// modules attach through [`Driver::register_module`].
pub struct Driver {
    transport: Transport,
    modules: RwLock<HashMap<&'static str, Arc<dyn Module>>>,
    session: Arc<SessionModule>,
    browser: Arc<BrowserModule>,
    browsing_context: Arc<BrowsingContextModule>,
    input: Arc<InputModule>,
    script: Arc<ScriptModule>,
    log: Arc<LogModule>,
}

impl Driver {
    /// Create a driver over an existing transport.
    pub fn new(transport: Transport) -> Self {
        let session = Arc::new(SessionModule::new(transport.clone()));
        let browser = Arc::new(BrowserModule::new(transport.clone()));
        let browsing_context = Arc::new(BrowsingContextModule::new(transport.clone()));
        let input = Arc::new(InputModule::new(transport.clone()));
        let script = Arc::new(ScriptModule::new(transport.clone()));
        let log = Arc::new(LogModule::new(transport.clone()));

        let mut modules: HashMap<&'static str, Arc<dyn Module>> = HashMap::new();
        modules.insert(SessionModule::MODULE_NAME, session.clone());
        modules.insert(BrowserModule::MODULE_NAME, browser.clone());
        modules.insert(BrowsingContextModule::MODULE_NAME, browsing_context.clone());
        modules.insert(InputModule::MODULE_NAME, input.clone());
        modules.insert(ScriptModule::MODULE_NAME, script.clone());
        modules.insert(LogModule::MODULE_NAME, log.clone());

        Self {
            transport,
            modules: RwLock::new(modules),
            session,
            browser,
            browsing_context,
            input,
            script,
            log,
        }
    }

    /// Connect to the remote end and start processing inbound messages.
    pub async fn start(&self, url: &str) -> Result<(), BiDiError> {
        self.transport.connect(url).await
    }

    /// Disconnect from the remote end.
    pub async fn stop(&self) -> Result<(), BiDiError> {
        self.transport.disconnect().await
    }

    /// Execute a command and wait for its typed result.
    pub async fn execute_command<C: Command>(&self, command: C) -> Result<C::Result, BiDiError> {
        self.transport.execute_command(command).await
    }

    /// Register an event by name, decoding its payload into `T`.
    pub fn register_event<T: DeserializeOwned + Send + 'static>(&self, name: &str) {
        self.transport.register_event::<T>(name);
    }

    /// Take the notification stream (events, unexpected errors, unknown
    /// messages, connection log lines). Single consumer.
    pub fn take_events(&self) -> Option<mpsc::UnboundedReceiver<TransportEvent>> {
        self.transport.take_events()
    }

    /// Register an additional protocol module under its declared name.
    ///
    /// Fails with `DuplicateModule` if the name is taken; duplicate
    /// registration is treated as a configuration error.
    pub fn register_module(&self, module: Arc<dyn Module>) -> Result<(), BiDiError> {
        let name = module.module_name();
        let mut modules = self.modules.write();
        if modules.contains_key(name) {
            return Err(BiDiError::DuplicateModule(name.to_string()));
        }
        modules.insert(name, module);
        Ok(())
    }

    /// Look up a registered module by name as a concrete type.
    pub fn get_module<M: Module>(&self, name: &str) -> Result<Arc<M>, BiDiError> {
        let module = self
            .modules
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| BiDiError::ModuleNotFound(name.to_string()))?;
        module
            .as_any()
            .downcast::<M>()
            .map_err(|_| BiDiError::ModuleTypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<M>(),
            })
    }

    pub fn session(&self) -> &SessionModule {
        &self.session
    }

    pub fn browser(&self) -> &BrowserModule {
        &self.browser
    }

    pub fn browsing_context(&self) -> &BrowsingContextModule {
        &self.browsing_context
    }

    pub fn input(&self) -> &InputModule {
        &self.input
    }

    pub fn script(&self) -> &ScriptModule {
        &self.script
    }

    pub fn log(&self) -> &LogModule {
        &self.log
    }
}

impl Default for Driver {
    /// A driver over the standard WebSocket transport.
    fn default() -> Self {
        Self::new(Transport::new(Box::new(WebSocketConnection::new())))
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
