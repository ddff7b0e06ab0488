//! # parley-protocol
//!
//! Wire protocol implementation for parley.
//!
//! This crate provides:
//! - The closed set of exchange types carried over the wire
//! - Binary framing with a big-endian id and payload length prefix
//! - JSON payload serialization/deserialization
//! - Protocol error taxonomy

pub mod codec;
pub mod error;
pub mod exchange;

pub use codec::{read_exchange, write_exchange};
pub use error::ExchangeError;
pub use exchange::{Exchange, ExchangeId, LoginRequest, MessageRequest, SignupRequest};

/// Default port for the parley server.
pub const DEFAULT_PORT: u16 = 20058;

/// Maximum accepted payload size (1 MiB).
///
/// The frame header carries a u32 length; without a cap a single bogus
/// frame could make the reader allocate 4 GiB.
pub const MAX_PAYLOAD_SIZE: u32 = 1024 * 1024;
