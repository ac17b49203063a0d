//! Checkout CLI
//!
//! Terminal front end for the checkout form: load configuration, adjust the
//! quantity, start a hosted checkout, or record a customer and invoice.

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment first so RUST_LOG from .env applies
    dotenvy::dotenv().ok();

    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Price {
            unit_amount,
            currency,
            quantity,
        } => commands::price(*unit_amount, currency, *quantity),
        Command::Config => commands::config(&cli).await,
        Command::Purchase { quantity } => commands::purchase(&cli, *quantity).await,
        Command::Submit(args) => commands::submit(&cli, args.to_form()).await,
        Command::Replay { file } => commands::replay(file),
    }
}
