//! Shared fixtures for integration tests

#![allow(dead_code)]

use lunchly_server::db::{self, CustomerRepo, ReservationRepo};
use lunchly_server::models::{Customer, CustomerDraft, GuestCount, Reservation, ReservationDraft};
use sqlx::SqlitePool;

/// Fresh in-memory database with the schema applied.
pub async fn test_pool() -> SqlitePool {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("lunchly_server=debug")
        .with_test_writer()
        .try_init();

    db::open("sqlite::memory:", 1)
        .await
        .expect("in-memory database")
}

pub async fn add_customer(pool: &SqlitePool, first: &str, last: &str) -> Customer {
    let draft = CustomerDraft::new(first, last, None, None).unwrap();
    CustomerRepo::new(pool).save(draft).await.unwrap()
}

pub async fn add_reservation(
    pool: &SqlitePool,
    customer: &Customer,
    start_at: &str,
    guests: i64,
) -> Reservation {
    let draft = ReservationDraft::parse(
        customer.id(),
        start_at,
        GuestCount::new(guests).unwrap(),
        None,
    )
    .unwrap();
    ReservationRepo::new(pool).save(draft).await.unwrap()
}
