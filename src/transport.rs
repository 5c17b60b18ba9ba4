//! Command correlation and event dispatch over a [`Connection`].
//!
//! Commands are sent with auto-incrementing ids and responses are matched
//! back to the waiting caller through per-command oneshot channels, so a
//! pending command resolves exactly once no matter which of success, error,
//! or timeout wins. Event messages decode into caller-registered shapes and
//! fan out through a notification channel; anything that matches no protocol
//! shape degrades to an unknown-message notification instead of faulting
//! the receive loop.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace, warn};

use crate::command::Command;
use crate::connection::{Connection, ConnectionEvent, LogLevel};
use crate::error::BiDiError;
use crate::protocol::{classify, CommandRequest, ErrorResponse, InboundMessage};

/// Default wait for a command response.
const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

type PendingMap = HashMap<u64, oneshot::Sender<Result<Value, ErrorResponse>>>;
type EventDecoder = Box<dyn Fn(Value) -> Result<Box<dyn Any + Send>, serde_json::Error> + Send + Sync>;
type DecoderMap = HashMap<String, EventDecoder>;

/// Notification raised by the transport outside command correlation.
pub enum TransportEvent {
    /// A registered event arrived; `data` holds the decoded payload and
    /// downcasts to the type given at registration.
    EventReceived {
        name: String,
        data: Box<dyn Any + Send>,
    },
    /// An error response that could not be tied to any pending command.
    UnexpectedError(ErrorResponse),
    /// Inbound text matching no protocol message shape, preserved verbatim.
    UnknownMessage(String),
    /// Diagnostic line from the underlying connection.
    Log { level: LogLevel, message: String },
}

impl fmt::Debug for TransportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportEvent::EventReceived { name, .. } => {
                f.debug_struct("EventReceived").field("name", name).finish_non_exhaustive()
            }
            TransportEvent::UnexpectedError(err) => {
                f.debug_tuple("UnexpectedError").field(err).finish()
            }
            TransportEvent::UnknownMessage(raw) => {
                f.debug_tuple("UnknownMessage").field(raw).finish()
            }
            TransportEvent::Log { level, message } => f
                .debug_struct("Log")
                .field("level", level)
                .field("message", message)
                .finish(),
        }
    }
}

struct TransportInner {
    connection: tokio::sync::Mutex<Box<dyn Connection>>,
    /// Command id counter, connection-scoped, starts at 1.
    next_id: AtomicU64,
    /// Pending commands awaiting responses.
    pending: Arc<Mutex<PendingMap>>,
    /// Event name -> decode routine captured at registration.
    event_decoders: Arc<RwLock<DecoderMap>>,
    notifications_tx: mpsc::UnboundedSender<TransportEvent>,
    notifications_rx: Mutex<Option<mpsc::UnboundedReceiver<TransportEvent>>>,
    command_timeout: Duration,
    receive_task: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

/// Correlation engine and event dispatcher, shared by cloning.
#[derive(Clone)]
pub struct Transport {
    inner: Arc<TransportInner>,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport").finish_non_exhaustive()
    }
}

impl Transport {
    /// Create a transport over the given connection with the default
    /// command timeout.
    pub fn new(connection: Box<dyn Connection>) -> Self {
        Self::with_command_timeout(connection, DEFAULT_COMMAND_TIMEOUT)
    }

    /// Create a transport with a custom command timeout.
    pub fn with_command_timeout(connection: Box<dyn Connection>, timeout: Duration) -> Self {
        let (notifications_tx, notifications_rx) = mpsc::unbounded_channel();
        Self {
            inner: Arc::new(TransportInner {
                connection: tokio::sync::Mutex::new(connection),
                next_id: AtomicU64::new(1),
                pending: Arc::new(Mutex::new(HashMap::new())),
                event_decoders: Arc::new(RwLock::new(HashMap::new())),
                notifications_tx,
                notifications_rx: Mutex::new(Some(notifications_rx)),
                command_timeout: timeout,
                receive_task: Mutex::new(None),
            }),
        }
    }

    /// Open the connection and start the receive loop.
    pub async fn connect(&self, url: &str) -> Result<(), BiDiError> {
        let events = {
            let mut connection = self.inner.connection.lock().await;
            connection.connect(url).await?
        };

        let task = tokio::spawn(Self::receive_loop(
            events,
            Arc::clone(&self.inner.pending),
            Arc::clone(&self.inner.event_decoders),
            self.inner.notifications_tx.clone(),
        ));
        *self.inner.receive_task.lock() = Some(task);
        Ok(())
    }

    /// Close the connection. Outstanding commands fail their callers.
    pub async fn disconnect(&self) -> Result<(), BiDiError> {
        {
            let mut connection = self.inner.connection.lock().await;
            connection.disconnect().await?;
        }
        if let Some(task) = self.inner.receive_task.lock().take() {
            task.abort();
        }
        // Dropping the senders resolves every suspended caller with an error.
        self.inner.pending.lock().clear();
        Ok(())
    }

    /// Send a command and wait for its correlated response.
    pub async fn execute_command<C: Command>(&self, command: C) -> Result<C::Result, BiDiError> {
        let method = command.method_name();
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);

        let request = CommandRequest {
            id,
            method: method.to_string(),
            params: serde_json::to_value(&command)?,
        };
        let json = serde_json::to_string(&request)?;
        trace!(id, method, "BiDi send: {}", json);

        // Register the pending entry before sending to avoid racing a
        // fast response.
        let (tx, rx) = oneshot::channel();
        self.inner.pending.lock().insert(id, tx);

        let send_result = {
            let connection = self.inner.connection.lock().await;
            connection.send(json).await
        };
        if let Err(e) = send_result {
            self.inner.pending.lock().remove(&id);
            return Err(e);
        }

        let timeout = self.inner.command_timeout;
        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(Ok(result))) => {
                serde_json::from_value(result).map_err(|source| BiDiError::ResponseShape {
                    method: method.to_string(),
                    expected: std::any::type_name::<C::Result>(),
                    source,
                })
            }
            Ok(Ok(Err(err))) => Err(BiDiError::Command {
                kind: err.error,
                message: err.message,
                method: method.to_string(),
            }),
            // Sender dropped without resolution: the connection was torn down.
            Ok(Err(_)) => Err(BiDiError::NotConnected),
            Err(_) => {
                // Remove the entry so a late response is dropped silently.
                self.inner.pending.lock().remove(&id);
                Err(BiDiError::CommandTimeout {
                    method: method.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                })
            }
        }
    }

    /// Register an event by name, decoding its `params` into `T`.
    ///
    /// Re-registering a name replaces the previous registration.
    pub fn register_event<T: DeserializeOwned + Send + 'static>(&self, name: &str) {
        let decoder: EventDecoder = Box::new(|params: Value| {
            serde_json::from_value::<T>(params).map(|data| Box::new(data) as Box<dyn Any + Send>)
        });
        self.inner
            .event_decoders
            .write()
            .insert(name.to_string(), decoder);
    }

    /// Take the notification stream. Yields `None` after the first call;
    /// there is a single consumer.
    pub fn take_events(&self) -> Option<mpsc::UnboundedReceiver<TransportEvent>> {
        self.inner.notifications_rx.lock().take()
    }

    /// Receive loop: classifies each inbound payload and either resolves a
    /// pending command or raises a notification. Never blocks on a caller.
    async fn receive_loop(
        mut events: mpsc::UnboundedReceiver<ConnectionEvent>,
        pending: Arc<Mutex<PendingMap>>,
        decoders: Arc<RwLock<DecoderMap>>,
        notify: mpsc::UnboundedSender<TransportEvent>,
    ) {
        while let Some(event) = events.recv().await {
            match event {
                ConnectionEvent::TextReceived(text) => {
                    Self::process_message(&text, &pending, &decoders, &notify);
                }
                ConnectionEvent::Log { level, message } => {
                    let _ = notify.send(TransportEvent::Log { level, message });
                }
            }
        }

        // Connection gone: dropping the senders fails outstanding callers.
        let drained = pending.lock().drain().count();
        if drained > 0 {
            debug!(count = drained, "connection closed with commands outstanding");
        }
    }

    fn process_message(
        text: &str,
        pending: &Mutex<PendingMap>,
        decoders: &RwLock<DecoderMap>,
        notify: &mpsc::UnboundedSender<TransportEvent>,
    ) {
        trace!("BiDi recv: {}", text);
        match classify(text) {
            InboundMessage::CommandSuccess { id, result } => {
                match pending.lock().remove(&id) {
                    Some(tx) => {
                        let _ = tx.send(Ok(result));
                    }
                    // Late arrival after timeout: an expected race, drop it.
                    None => debug!(id, "dropping response with no pending command"),
                }
            }
            InboundMessage::CommandError(err) => match err.id {
                Some(id) => match pending.lock().remove(&id) {
                    Some(tx) => {
                        let _ = tx.send(Err(err));
                    }
                    None => debug!(id, "dropping error response with no pending command"),
                },
                None => {
                    let _ = notify.send(TransportEvent::UnexpectedError(err));
                }
            },
            InboundMessage::Event { method, params } => {
                let decoded = decoders.read().get(&method).map(|decode| decode(params));
                match decoded {
                    Some(Ok(data)) => {
                        let _ = notify.send(TransportEvent::EventReceived { name: method, data });
                    }
                    Some(Err(e)) => {
                        warn!(event = %method, error = %e, "event payload did not match registered shape");
                        let _ = notify.send(TransportEvent::UnknownMessage(text.to_string()));
                    }
                    None => {
                        let _ = notify.send(TransportEvent::UnknownMessage(text.to_string()));
                    }
                }
            }
            InboundMessage::Unrecognized(raw) => {
                let _ = notify.send(TransportEvent::UnknownMessage(raw));
            }
        }
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
