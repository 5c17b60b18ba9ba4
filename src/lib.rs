//! WebDriver BiDi client.
//!
//! Talks the bidirectional JSON browser-automation protocol over a single
//! duplex WebSocket connection. Commands are correlated to their responses
//! by auto-incrementing ids; unsolicited events decode into shapes the
//! caller registers by name; protocol domains attach as named modules over
//! the shared correlation engine.
//!
//! ```rust,ignore
//! let driver = Driver::default();
//! driver.start("ws://localhost:9222/session").await?;
//! let result = driver
//!     .browsing_context()
//!     .navigate(NavigateParameters::new("ctx", "https://example.com"))
//!     .await?;
//! ```

pub mod browser;
pub mod browsing_context;
mod command;
mod connection;
mod driver;
mod error;
pub mod input;
pub mod log;
mod module;
mod protocol;
pub mod script;
mod serialization;
pub mod session;
mod transport;

pub use command::{Command, EmptyResult};
pub use connection::{Connection, ConnectionEvent, LogLevel, WebSocketConnection};
pub use driver::Driver;
pub use error::BiDiError;
pub use module::Module;
pub use protocol::{classify, CommandRequest, ErrorResponse, InboundMessage};
pub use serialization::RangeError;
pub use transport::{Transport, TransportEvent};

#[cfg(test)]
pub(crate) mod test_support;
