//! Blocklist console - Main entry point.

mod config;
mod console;
mod error;

use crate::config::Config;
use crate::console::{Command, Console, HELP};
use crate::error::AppResult;
use anyhow::Context;
use blocklist_client::BlocklistClient;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.log.level);

    info!("Starting blocklist console");

    let client = BlocklistClient::with_timeout(&config.api.base_url, config.api.timeout)?;

    if client.health_check().await {
        info!("Registry reachable at {}", client.base_url());
    } else {
        warn!("Registry not reachable at {} - requests will fail", client.base_url());
    }

    let console = Console::new(client, &config.ui);
    console.load().await;
    println!("{}", HELP);
    print!("{}", console.render());

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = LinesStream::new(stdin.lines());

    loop {
        tokio::select! {
            line = lines.next() => {
                let Some(line) = line else {
                    debug!("stdin closed");
                    break;
                };
                let line = line?;

                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };

                match command {
                    Command::Quit => break,
                    Command::Help => {
                        println!("{}", HELP);
                        continue;
                    }
                    _ => {}
                }

                let confirmed = match &command {
                    Command::Unblock(phone) => {
                        println!("Unblock number: {}? [y/N]", phone);
                        match lines.next().await {
                            Some(answer) => is_yes(&answer?),
                            None => false,
                        }
                    }
                    _ => false,
                };

                if let Some(response) = console.execute(command, confirmed).await {
                    debug!(?response, "Command handled");
                }
                print!("{}", console.render());
            }
            _ = signal::ctrl_c() => {
                info!("Received shutdown signal");
                break;
            }
        }
    }

    info!("Blocklist console stopped");
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
