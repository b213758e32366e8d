//! Command implementations for the lunchly CLI

pub mod customers;
pub mod serve;

pub use customers::run_customers;
pub use serve::run_serve;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::config::LunchlyConfig;

/// Open the configured database and make sure the schema exists.
async fn open_database(config: &LunchlyConfig) -> Result<SqlitePool> {
    lunchly_server::db::open(&config.database.url, config.database.max_connections)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.url))
}
