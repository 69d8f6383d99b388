//! CLI commands for wnba-api.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::routes::ROUTES;

#[derive(Parser)]
#[command(name = "wnba-api")]
#[command(version, about = "WNBA play-by-play and schedule API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Play-by-play SQLite file
        #[arg(long, value_name = "FILE")]
        plays_db: Option<PathBuf>,

        /// Schedule SQLite file
        #[arg(long, value_name = "FILE")]
        schedule_db: Option<PathBuf>,
    },

    /// Print the route table
    Routes,
}

/// Print every lookup with its store and statement.
pub fn run_routes() -> anyhow::Result<()> {
    for route in ROUTES {
        println!(
            "{:<4} {:<40} {:<9} {}",
            route.method.to_string(),
            route.pattern,
            route.store.to_string(),
            route.sql
        );
    }
    Ok(())
}
