//! parley-cli - Command-line client for the parley chat service
//!
//! One connection per invocation; the protocol is fire-and-forget, so
//! commands report that the frame was sent, not what the server did
//! with it (that lands in the server's log).

mod commands;

use clap::{Parser, Subcommand};
use parley_client::Client;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "parley-cli")]
#[command(about = "Command-line client for the parley chat service")]
#[command(version)]
struct Cli {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:20058")]
    server: SocketAddr,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Signup {
        username: String,
        password: String,
    },

    /// Check credentials
    Login {
        username: String,
        password: String,
    },

    /// Send a message to a user
    Send {
        /// Receiving username
        to: String,
        message: String,
    },

    /// Run the built-in demo sequence against the server
    Demo,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let client = Client::connect(cli.server).await?;
    let output = commands::execute(client, cli.command).await?;
    println!("{output}");

    Ok(())
}
