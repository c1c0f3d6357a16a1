//! Spendwise CLI - Budgeting tips from recent expenses
//!
//! Usage:
//!   spendwise serve --port 5000          Start the suggestion API
//!   spendwise analyze --file FILE        Print tips for a JSON or CSV file
//!   spendwise summary --file FILE        Print window statistics as JSON

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Serve { port, host } => commands::cmd_serve(host, port).await,
        Commands::Analyze { file, json } => commands::cmd_analyze(&file, json),
        Commands::Summary { file } => commands::cmd_summary(&file),
    }
}
