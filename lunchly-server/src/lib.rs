//! lunchly-server: customer and reservation storage with a JSON API
//!
//! Repositories over a SQLite pool, validated domain models, and the axum
//! routes that expose them.

pub mod db;
pub mod http;
pub mod models;

pub use db::{CustomerRepo, CustomerWithCount, DbError, ReservationRepo};
pub use http::{build_router, run_server, ServerConfig};
