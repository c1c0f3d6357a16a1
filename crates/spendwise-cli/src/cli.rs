//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spendwise - Budgeting tips from your recent expenses
#[derive(Parser)]
#[command(name = "spendwise")]
#[command(about = "Rule-based budgeting tips from the last 30 days of expenses", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the suggestion API server
    Serve {
        /// Port to listen on (defaults to $PORT, then 5000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to $SPENDWISE_HOST, then 0.0.0.0)
        #[arg(long)]
        host: Option<String>,
    },

    /// Print budgeting tips for an expense file
    Analyze {
        /// JSON or CSV expense file ("-" reads JSON from stdin)
        #[arg(short, long)]
        file: PathBuf,

        /// Print tips as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Print window statistics for an expense file as JSON
    Summary {
        /// JSON or CSV expense file ("-" reads JSON from stdin)
        #[arg(short, long)]
        file: PathBuf,
    },
}
