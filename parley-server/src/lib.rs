//! # parley-server
//!
//! TCP server for parley.
//!
//! This crate provides:
//! - TCP connection handling with async I/O
//! - Exchange framing and per-variant dispatch
//! - A concurrency-safe in-memory account store
//! - YAML/env configuration

pub mod accounts;
pub mod config;
pub mod error;
pub mod handler;
pub mod server;

pub use accounts::{AccountStore, CredentialCheck};
pub use config::{Config, NetworkConfig};
pub use error::ServerError;
pub use handler::ExchangeHandler;
pub use server::{Server, ServerConfig, ServerStats};
