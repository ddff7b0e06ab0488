//! Client error types.

use thiserror::Error;

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("exchange error: {0}")]
    Exchange(#[from] parley_protocol::ExchangeError),
}
