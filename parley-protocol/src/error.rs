//! Protocol error taxonomy.

use thiserror::Error;

/// Errors that can occur while reading or writing exchanges.
///
/// `ConnectionClosed` is the one expected outcome: the peer hung up
/// cleanly between frames. Everything else terminates the connection
/// and is surfaced to the operator log; the stream has no
/// resynchronization marker, so a partial or corrupt frame is
/// unrecoverable.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("connection closed by peer")]
    ConnectionClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unknown exchange id: {0}")]
    UnknownExchange(u32),

    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: u32, max: u32 },
}

impl ExchangeError {
    /// Returns whether this error is a clean disconnect rather than a
    /// failure worth logging.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, ExchangeError::ConnectionClosed)
    }
}
