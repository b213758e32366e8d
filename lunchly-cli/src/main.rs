//! lunchly CLI - customer and reservation service for a small restaurant
//!
//! This is the main entry point for the lunchly command-line tool, which provides:
//! - The JSON HTTP API (`serve` subcommand)
//! - Customer listing, search, ranking and detail views (`customers` subcommand)
//! - Configuration inspection (`config` subcommand)

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use config::LunchlyConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "lunchly",
    author,
    version,
    about = "Customer and reservation management for a small restaurant",
    long_about = "Keep track of customers and their reservations. Run the JSON API with \
                  `lunchly serve`, or inspect the data directly from the terminal."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Database URL (overrides config file)
    #[arg(long, global = true, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run HTTP API server
    Serve(commands::serve::ServeArgs),
    /// List, search, rank and show customers
    Customers(commands::customers::CustomersArgs),
    /// Inspect lunchly configuration (path, show)
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    let cfg = LunchlyConfig::load()?.with_database_url(cli.database_url);

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, &cfg).await?,
        Commands::Customers(args) => commands::run_customers(args, &cfg).await?,
        Commands::Config(args) => config::run_config(args, &cfg)?,
    }
    Ok(())
}
