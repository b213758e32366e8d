//! Schema setup for the customers and reservations tables

use sqlx::SqlitePool;

const SCHEMA: &str = include_str!("schema.sql");

/// Create tables and indexes if they do not exist yet. Safe to run on
/// every startup.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running lunchly migrations...");
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    tracing::info!("Migrations complete");
    Ok(())
}
