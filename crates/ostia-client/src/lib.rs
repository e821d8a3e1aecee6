//! # Ostia DNS Client
//!
//! Single-shot UDP exchange driver: send one query to one upstream
//! resolver, receive one response, parse it.
//!
//! An exchange moves through `Idle -> Sent -> AwaitingResponse -> Parsed`
//! (or `Failed` at any step), expressed as a single fallible call: one
//! blocking send, one blocking receive, no retries, no concurrent
//! in-flight queries. The socket lives for the duration of one exchange
//! and is released when the call returns.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ostia_client::{resolve_a, ExchangeConfig};
//!
//! let config = ExchangeConfig::new("8.8.8.8:53".parse().unwrap());
//! let response = resolve_a("example.com", &config)?;
//! for addr in response.a_records() {
//!     println!("{addr}");
//! }
//! # Ok::<(), ostia_client::ExchangeError>(())
//! ```

use ostia_proto::{Header, Message, Question, MAX_UDP_MESSAGE_SIZE};
use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};

/// Exchange errors.
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// The query could not be sent: socket setup failed, the send itself
    /// errored, or the transport reported a short write.
    #[error("send failed: {0}")]
    SendFailed(#[source] io::Error),

    /// The response could not be read, or the server sent an empty
    /// datagram.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] io::Error),

    /// No response arrived within the configured read deadline.
    #[error("timed out waiting for response")]
    Timeout,

    /// The response carries a transaction ID that does not match the
    /// query. With exactly one outstanding request this means an
    /// unexpected or spoofed packet; the exchange fails without parsing
    /// any records.
    #[error("response ID {actual:#06x} does not match query ID {expected:#06x}")]
    IdMismatch {
        /// The ID the query was sent with.
        expected: u16,
        /// The ID the response carried.
        actual: u16,
    },

    /// The response failed to decode. A response with a truncated final
    /// record invalidates the whole exchange; partial answer lists are
    /// never returned.
    #[error("malformed response: {0}")]
    Proto(#[from] ostia_proto::Error),
}

/// Result type for exchange operations.
pub type Result<T> = std::result::Result<T, ExchangeError>;

/// Exchange configuration.
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// Upstream resolver address.
    pub server: SocketAddr,

    /// Local address to bind; defaults to an ephemeral port on all
    /// interfaces.
    pub bind: SocketAddr,

    /// Read deadline for the response. `None` (the default) blocks
    /// indefinitely.
    pub read_timeout: Option<Duration>,
}

impl ExchangeConfig {
    /// Creates a configuration for the given upstream resolver.
    pub fn new(server: SocketAddr) -> Self {
        Self {
            server,
            bind: SocketAddr::from(([0, 0, 0, 0], 0)),
            read_timeout: None,
        }
    }

    /// Sets the read deadline.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }
}

/// One-shot UDP exchange driver.
///
/// Owns the receive buffer and the socket for the lifetime of a single
/// exchange. Everything it returns is an owned value; nothing borrows
/// from the transport buffer after parsing completes.
#[derive(Debug)]
pub struct UdpExchange {
    config: ExchangeConfig,
}

impl UdpExchange {
    /// Creates an exchange driver with the given configuration.
    pub fn new(config: ExchangeConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// Runs one query/response exchange.
    ///
    /// Serializes the query, sends it in a single datagram, blocks for one
    /// response datagram, validates the transaction ID against the query
    /// **before** any record parsing, then decodes the full message.
    pub fn execute(&self, query: &Message) -> Result<Message> {
        let wire = query.to_wire();

        let socket = UdpSocket::bind(self.config.bind).map_err(ExchangeError::SendFailed)?;
        socket
            .set_read_timeout(self.config.read_timeout)
            .map_err(ExchangeError::SendFailed)?;
        socket
            .connect(self.config.server)
            .map_err(ExchangeError::SendFailed)?;

        let sent = socket.send(&wire).map_err(ExchangeError::SendFailed)?;
        if sent != wire.len() {
            return Err(ExchangeError::SendFailed(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short write: {sent} of {} bytes", wire.len()),
            )));
        }
        debug!(
            id = query.id(),
            bytes = wire.len(),
            server = %self.config.server,
            "query sent"
        );

        // Bounded to the classic 512-byte UDP payload; this client never
        // advertises EDNS, so a conforming server sends no more.
        let mut buf = [0u8; MAX_UDP_MESSAGE_SIZE];
        let len = socket.recv(&mut buf).map_err(|e| {
            if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) {
                ExchangeError::Timeout
            } else {
                ExchangeError::ReceiveFailed(e)
            }
        })?;
        if len == 0 {
            return Err(ExchangeError::ReceiveFailed(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "empty datagram",
            )));
        }
        trace!(bytes = len, "response received");

        // ID check runs on the bare header, ahead of record parsing: a
        // mismatched packet must not get its records decoded at all.
        let header = Header::parse(&buf[..len])?;
        if header.id != query.id() {
            return Err(ExchangeError::IdMismatch {
                expected: query.id(),
                actual: header.id,
            });
        }

        let response = Message::parse(&buf[..len])?;
        debug!(
            id = response.id(),
            rcode = %response.rcode(),
            answers = response.answers().len(),
            "response parsed"
        );

        Ok(response)
    }
}

/// Resolves the A records for a domain name with a single exchange.
///
/// Assembles an A/IN query with a random transaction ID and drives it
/// through [`UdpExchange::execute`].
pub fn resolve_a(domain: &str, config: &ExchangeConfig) -> Result<Message> {
    let name = domain.parse().map_err(ExchangeError::Proto)?;
    let query = Message::query(Question::a(name));
    UdpExchange::new(config.clone()).execute(&query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ExchangeConfig::new("192.0.2.53:53".parse().unwrap());
        assert_eq!(config.bind.port(), 0);
        assert_eq!(config.read_timeout, None);

        let config = config.with_read_timeout(Duration::from_secs(5));
        assert_eq!(config.read_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_resolve_rejects_invalid_name() {
        let config = ExchangeConfig::new("192.0.2.53:53".parse().unwrap());
        // Never touches the network: the name fails to encode
        let err = resolve_a(&"a".repeat(64), &config).unwrap_err();
        assert!(matches!(
            err,
            ExchangeError::Proto(ostia_proto::Error::InvalidName { .. })
        ));
    }
}
