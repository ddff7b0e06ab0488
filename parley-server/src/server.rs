//! TCP server implementation.

use crate::accounts::AccountStore;
use crate::error::ServerError;
use crate::handler::ExchangeHandler;
use parley_protocol::codec;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: format!("0.0.0.0:{}", parley_protocol::DEFAULT_PORT)
                .parse()
                .unwrap(),
        }
    }
}

impl ServerConfig {
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }
}

/// Server statistics.
#[derive(Debug, Default)]
pub struct ServerStats {
    pub connections_total: AtomicU64,
    pub connections_active: AtomicU64,
    pub exchanges_total: AtomicU64,
    pub errors_total: AtomicU64,
}

/// TCP server for parley.
///
/// The accept loop is a single task that only blocks on accepting new
/// connections; every accepted connection gets its own task that owns
/// the stream exclusively until it closes. The account store is the
/// only state shared across connections, reached solely through its
/// synchronized operations.
pub struct Server {
    config: ServerConfig,
    handler: Arc<ExchangeHandler>,
    stats: Arc<ServerStats>,
    shutdown: broadcast::Sender<()>,
    running: AtomicBool,
}

impl Server {
    /// Creates a new server over the shared account store.
    pub fn new(config: ServerConfig, accounts: Arc<AccountStore>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            config,
            handler: Arc::new(ExchangeHandler::new(accounts)),
            stats: Arc::new(ServerStats::default()),
            shutdown: shutdown_tx,
            running: AtomicBool::new(false),
        }
    }

    /// Binds the configured address and runs the server.
    pub async fn run(&self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.serve(listener).await
    }

    /// Runs the accept loop on an already-bound listener.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), ServerError> {
        // Subscribe before flagging the server as running, so a
        // shutdown issued right after is_running() turns true is not
        // lost.
        let mut shutdown_rx = self.shutdown.subscribe();
        self.running.store(true, Ordering::SeqCst);
        tracing::info!("Server listening on {}", listener.local_addr()?);

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, addr)) => {
                            tracing::info!("Client connected: {}", addr);
                            self.stats.connections_total.fetch_add(1, Ordering::Relaxed);
                            self.stats.connections_active.fetch_add(1, Ordering::Relaxed);

                            let handler = self.handler.clone();
                            let stats = self.stats.clone();

                            tokio::spawn(async move {
                                let result =
                                    Self::handle_connection(stream, addr, handler, &stats).await;

                                if let Err(e) = result {
                                    tracing::error!("[{}] Connection error: {}", addr, e);
                                    stats.errors_total.fetch_add(1, Ordering::Relaxed);
                                }

                                stats.connections_active.fetch_sub(1, Ordering::Relaxed);
                            });
                        }
                        Err(e) => {
                            // A failed accept leaves the listener usable.
                            tracing::error!("Accept error: {}", e);
                        }
                    }
                }
                _ = shutdown_rx.recv() => {
                    tracing::info!("Server shutting down");
                    break;
                }
            }
        }

        self.running.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Handles a single connection until it closes.
    ///
    /// The loop reads one exchange at a time, so exchanges from one
    /// connection are processed strictly in arrival order. A clean
    /// disconnect ends the loop normally; any other decode or
    /// transport failure abandons the connection, because a partial
    /// frame cannot be resynchronized. The stream is released on every
    /// exit path by drop. Nothing is ever written back to the peer.
    async fn handle_connection(
        mut stream: TcpStream,
        addr: SocketAddr,
        handler: Arc<ExchangeHandler>,
        stats: &ServerStats,
    ) -> Result<(), ServerError> {
        loop {
            match codec::read_exchange(&mut stream).await {
                Ok(exchange) => {
                    stats.exchanges_total.fetch_add(1, Ordering::Relaxed);
                    handler.handle(addr, &exchange);
                }
                Err(e) if e.is_disconnect() => {
                    tracing::info!("Client disconnected: {}", addr);
                    return Ok(());
                }
                Err(e) => return Err(ServerError::Exchange(e)),
            }
        }
    }

    /// Initiates server shutdown; the accept loop stops, connections
    /// already in flight run until their peers disconnect.
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(());
    }

    /// Returns whether the server is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Returns server statistics.
    pub fn stats(&self) -> &ServerStats {
        &self.stats
    }
}
