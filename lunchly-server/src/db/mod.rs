//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Pool handle passed into each repository, never a global connection
//! - Ranking uses a single JOIN + GROUP BY, no N+1
//! - Rely on DB constraints (foreign keys, CHECK) as the last line
//! - One statement per save, so each save is atomic on its own

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{connect_in_memory, create_pool, create_pool_with_options};
pub use repos::*;

use sqlx::SqlitePool;

/// Open a pool and make sure the schema exists.
pub async fn open(database_url: &str, max_connections: u32) -> Result<SqlitePool, DbError> {
    let pool = create_pool_with_options(database_url, max_connections).await?;
    migrations::run(&pool).await?;
    Ok(pool)
}
