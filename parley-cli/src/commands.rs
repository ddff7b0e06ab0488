//! Command execution.

use crate::Commands;
use colored::Colorize;
use parley_client::Client;

/// Executes a command and returns the formatted output.
pub async fn execute(
    mut client: Client,
    cmd: Commands,
) -> Result<String, Box<dyn std::error::Error>> {
    let output = match cmd {
        Commands::Signup { username, password } => {
            client.signup(&username, &password).await?;
            format!("{} signup for {}", "Sent".green(), username.cyan())
        }

        Commands::Login { username, password } => {
            client.login(&username, &password).await?;
            format!("{} login for {}", "Sent".green(), username.cyan())
        }

        Commands::Send { to, message } => {
            client.send_message(&to, &message).await?;
            format!("{} message to {}", "Sent".green(), to.cyan())
        }

        Commands::Demo => {
            run_demo(&mut client).await?;
            format!("{} demo sequence (6 frames)", "Sent".green())
        }
    };

    client.shutdown().await?;
    Ok(output)
}

/// The reference demo: signup, a correct login, a wrong-password login,
/// an unknown-user login, a duplicate signup and one message, all over
/// a single connection.
async fn run_demo(client: &mut Client) -> Result<(), Box<dyn std::error::Error>> {
    client.signup("username", "password").await?;
    client.login("username", "password").await?;
    client.login("username", "passwo").await?;
    client.login("userna", "password").await?;
    client.signup("username", "password").await?;
    client.send_message("username", "hello from sender").await?;
    Ok(())
}
