//! # parley-client
//!
//! Client library for parley.
//!
//! The protocol defines no response exchanges, so the client is
//! write-only: every sender returns as soon as its frame has been
//! written. Outcomes (account created or not, login accepted or not)
//! are observable only in the server's log.

pub mod client;
pub mod error;

pub use client::Client;
pub use error::ClientError;
