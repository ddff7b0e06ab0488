//! Async TCP client.

use crate::error::ClientError;
use parley_protocol::codec;
use parley_protocol::{Exchange, LoginRequest, MessageRequest, SignupRequest};
use std::net::SocketAddr;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpStream, ToSocketAddrs};

/// Client for the parley service.
///
/// Holds one TCP connection and sends exchanges over it. All senders
/// are fire-and-forget; there is no response to wait for.
pub struct Client {
    stream: TcpStream,
}

impl Client {
    /// Connects to the server.
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(addr).await?;
        tracing::debug!("Connected to {}", stream.peer_addr()?);
        Ok(Self { stream })
    }

    /// Returns the remote address.
    pub fn peer_addr(&self) -> Result<SocketAddr, ClientError> {
        Ok(self.stream.peer_addr()?)
    }

    /// Sends a raw exchange.
    pub async fn send(&mut self, exchange: &Exchange) -> Result<(), ClientError> {
        codec::write_exchange(&mut self.stream, exchange).await?;
        Ok(())
    }

    /// Requests account creation for `username`.
    pub async fn signup(&mut self, username: &str, password: &str) -> Result<(), ClientError> {
        self.send(&Exchange::Signup(SignupRequest {
            username: username.to_string(),
            password: password.to_string(),
        }))
        .await
    }

    /// Requests a credential check for `username`.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ClientError> {
        self.send(&Exchange::Login(LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }))
        .await
    }

    /// Sends a chat message addressed to `receiver`.
    pub async fn send_message(
        &mut self,
        receiver: &str,
        message: &str,
    ) -> Result<(), ClientError> {
        self.send(&Exchange::Message(MessageRequest {
            receiver: receiver.to_string(),
            message: message.to_string(),
        }))
        .await
    }

    /// Flushes and half-closes the connection.
    pub async fn shutdown(mut self) -> Result<(), ClientError> {
        self.stream.shutdown().await?;
        Ok(())
    }
}
