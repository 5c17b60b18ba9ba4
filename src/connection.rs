//! Duplex connection abstraction and the WebSocket implementation.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

use crate::error::BiDiError;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

/// Severity of a connection diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Inbound notification from a connection.
#[derive(Debug, Clone)]
pub enum ConnectionEvent {
    /// A text payload arrived from the remote end.
    TextReceived(String),
    /// A diagnostic line about the connection itself.
    Log { level: LogLevel, message: String },
}

/// A duplex text connection to a remote end.
///
/// The transport consumes this abstraction only; it never parses the
/// address or manages socket-level framing itself. Implementations deliver
/// inbound text and diagnostics through the receiver returned by `connect`.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Open the connection, returning the inbound notification stream.
    async fn connect(
        &mut self,
        url: &str,
    ) -> Result<mpsc::UnboundedReceiver<ConnectionEvent>, BiDiError>;

    /// Send one text payload to the remote end.
    async fn send(&self, text: String) -> Result<(), BiDiError>;

    /// Close the connection.
    async fn disconnect(&mut self) -> Result<(), BiDiError>;
}

/// WebSocket connection to a BiDi remote end.
#[derive(Default)]
pub struct WebSocketConnection {
    /// Write half, shared with callers of `send`.
    sink: Option<Arc<tokio::sync::Mutex<WsSink>>>,
    /// Background reader forwarding frames into the notification channel.
    read_task: Option<tokio::task::JoinHandle<()>>,
}

impl WebSocketConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reader task: forwards text frames and connection diagnostics until
    /// the socket closes or errors.
    async fn read_loop(mut source: WsSource, events: mpsc::UnboundedSender<ConnectionEvent>) {
        while let Some(frame) = source.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    let _ = events.send(ConnectionEvent::TextReceived(text.to_string()));
                }
                Ok(Message::Close(_)) => {
                    debug!("WebSocket closed by remote");
                    let _ = events.send(ConnectionEvent::Log {
                        level: LogLevel::Info,
                        message: "Connection closed by remote end".to_string(),
                    });
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "WebSocket read error, stopping reader");
                    let _ = events.send(ConnectionEvent::Log {
                        level: LogLevel::Error,
                        message: format!("Connection read error: {e}"),
                    });
                    break;
                }
            }
        }
    }
}

#[async_trait]
impl Connection for WebSocketConnection {
    async fn connect(
        &mut self,
        url: &str,
    ) -> Result<mpsc::UnboundedReceiver<ConnectionEvent>, BiDiError> {
        debug!(url, "connecting to BiDi WebSocket");

        let (stream, _) = tokio_tungstenite::connect_async(url)
            .await
            .map_err(|e| BiDiError::ConnectionFailed(format!("{url}: {e}")))?;

        let (sink, source) = stream.split();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        self.sink = Some(Arc::new(tokio::sync::Mutex::new(sink)));
        self.read_task = Some(tokio::spawn(Self::read_loop(source, events_tx)));

        debug!(url, "BiDi WebSocket connection established");
        Ok(events_rx)
    }

    async fn send(&self, text: String) -> Result<(), BiDiError> {
        let sink = self.sink.as_ref().ok_or(BiDiError::NotConnected)?;
        let mut sink = sink.lock().await;
        sink.send(Message::Text(text.into())).await?;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), BiDiError> {
        if let Some(sink) = self.sink.take() {
            let mut sink = sink.lock().await;
            // Best effort close handshake; the remote may already be gone.
            let _ = sink.send(Message::Close(None)).await;
        }
        if let Some(task) = self.read_task.take() {
            task.abort();
        }
        Ok(())
    }
}

impl Drop for WebSocketConnection {
    fn drop(&mut self) {
        if let Some(task) = self.read_task.take() {
            task.abort();
        }
    }
}
