//! In-memory connection double for exercising the transport and modules.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::connection::{Connection, ConnectionEvent, LogLevel};
use crate::error::BiDiError;

/// A [`Connection`] whose remote end is driven by the test.
///
/// Text sent through the connection is forwarded to the paired
/// [`TestRemote`], which can inject inbound text and diagnostics.
pub(crate) struct TestConnection {
    inbound_rx: Option<mpsc::UnboundedReceiver<ConnectionEvent>>,
    sent_tx: mpsc::UnboundedSender<String>,
}

pub(crate) struct TestRemote {
    inbound_tx: mpsc::UnboundedSender<ConnectionEvent>,
    sent_rx: mpsc::UnboundedReceiver<String>,
}

impl TestConnection {
    pub(crate) fn new() -> (Self, TestRemote) {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (sent_tx, sent_rx) = mpsc::unbounded_channel();
        (
            Self {
                inbound_rx: Some(inbound_rx),
                sent_tx,
            },
            TestRemote {
                inbound_tx,
                sent_rx,
            },
        )
    }
}

#[async_trait]
impl Connection for TestConnection {
    async fn connect(
        &mut self,
        _url: &str,
    ) -> Result<mpsc::UnboundedReceiver<ConnectionEvent>, BiDiError> {
        self.inbound_rx.take().ok_or(BiDiError::NotConnected)
    }

    async fn send(&self, text: String) -> Result<(), BiDiError> {
        self.sent_tx
            .send(text)
            .map_err(|_| BiDiError::NotConnected)
    }

    async fn disconnect(&mut self) -> Result<(), BiDiError> {
        Ok(())
    }
}

impl TestRemote {
    /// Inject inbound text as if the remote end had sent it.
    pub(crate) fn receive_text(&self, text: &str) {
        self.inbound_tx
            .send(ConnectionEvent::TextReceived(text.to_string()))
            .expect("receive loop not running");
    }

    /// Inject a connection diagnostic line.
    pub(crate) fn emit_log(&self, level: LogLevel, message: &str) {
        self.inbound_tx
            .send(ConnectionEvent::Log {
                level,
                message: message.to_string(),
            })
            .expect("receive loop not running");
    }

    /// Wait for the next outgoing payload.
    pub(crate) async fn next_sent(&mut self) -> Value {
        let text = self.sent_rx.recv().await.expect("nothing was sent");
        serde_json::from_str(&text).expect("sent payload was not JSON")
    }

    /// Wait for the next outgoing command and answer it with a success
    /// response carrying `result`. Returns the sent command.
    pub(crate) async fn respond_success(&mut self, result: &str) -> Value {
        let sent = self.next_sent().await;
        let id = sent["id"].as_u64().expect("sent command had no id");
        self.receive_text(&format!(r#"{{ "id": {id}, "result": {result} }}"#));
        sent
    }
}
