//! Server error types.

use thiserror::Error;

/// Server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("exchange error: {0}")]
    Exchange(#[from] parley_protocol::ExchangeError),
}
