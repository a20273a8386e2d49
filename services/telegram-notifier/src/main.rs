//! Telegram notifier CLI
//!
//! Sends a test notification through the notifiers defined in a configuration file.

use std::path::PathBuf;

use clap::Parser;
use telegram_notifier::{load_config, send_test_notifications, TestSendBuilder};
use tracing::Level;

#[derive(Parser)]
#[command(name = "telegram-notifier")]
#[command(about = "Send a test alert notification to Telegram")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Only send through the notifier with this name
    #[arg(short, long)]
    notifier: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, notifier={:?}, log_level={:?}",
        args.config,
        args.notifier,
        args.log_level
    );

    let config = load_config(&args.config)?;
    tracing::debug!("Notifiers: {}", config.notifiers.len());

    let notifiers = TestSendBuilder::new(config).only(args.notifier).build()?;
    send_test_notifications(&notifiers).await?;

    tracing::info!("Test notification sent to {} notifier(s)", notifiers.len());
    Ok(())
}
