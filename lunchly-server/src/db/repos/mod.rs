//! Repository implementations for database access
//!
//! Each repository borrows the pool it was built with and follows these
//! patterns:
//! - `save` branches on entity state: INSERT ... RETURNING for drafts,
//!   UPDATE by id for persisted values
//! - an UPDATE that touches no row is reported as NotFound
//! - storage errors are passed through untouched

pub mod customers;
pub mod reservations;

pub use customers::{CustomerRepo, CustomerWithCount};
pub use reservations::ReservationRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    #[error("{resource} '{id}' has invalid stored data: {reason}")]
    Corrupt {
        resource: &'static str,
        id: String,
        reason: String,
    },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}
