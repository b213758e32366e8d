//! Reservation repository
//!
//! Reservations are always listed per customer, earliest first.

use chrono::NaiveDateTime;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use super::DbError;
use crate::models::{
    Customer, CustomerId, Entity, GuestCount, Reservation, ReservationDraft, ReservationEntity,
    ReservationId,
};

const SELECT_RESERVATION: &str =
    "SELECT id, customer_id, start_at, num_guests, notes FROM reservations";

/// Reservation row as stored
#[derive(Debug, FromRow)]
struct ReservationRow {
    id: i64,
    customer_id: i64,
    start_at: NaiveDateTime,
    num_guests: i64,
    notes: Option<String>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = DbError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        let num_guests = GuestCount::new(row.num_guests).map_err(|e| DbError::Corrupt {
            resource: "reservation",
            id: row.id.to_string(),
            reason: e.to_string(),
        })?;

        let draft = ReservationDraft {
            customer_id: CustomerId::from_db(row.customer_id),
            start_at: row.start_at,
            num_guests,
            notes: row.notes,
        };
        Ok(Reservation::from_draft(ReservationId::from_db(row.id), draft))
    }
}

/// Reservation repository
pub struct ReservationRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReservationRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a single reservation by id.
    pub async fn get(&self, id: ReservationId) -> Result<Reservation, DbError> {
        let row: ReservationRow =
            sqlx::query_as(&format!("{SELECT_RESERVATION} WHERE id = ?"))
                .bind(id.get())
                .fetch_optional(self.pool)
                .await?
                .ok_or_else(|| DbError::not_found("reservation", id))?;

        Reservation::try_from(row)
    }

    /// All reservations for a customer, ordered by start time.
    pub async fn list_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Reservation>, DbError> {
        let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
            "{SELECT_RESERVATION} WHERE customer_id = ? ORDER BY start_at, id"
        ))
        .bind(customer_id.get())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    /// Store a reservation.
    ///
    /// Drafts are inserted. Stored reservations have customer, start time,
    /// guest count and notes rewritten; a vanished row is `NotFound`. A
    /// customer id with no matching customer fails on the foreign key.
    pub async fn save(
        &self,
        reservation: impl Into<ReservationEntity>,
    ) -> Result<Reservation, DbError> {
        match reservation.into() {
            Entity::Transient(draft) => self.insert(draft).await,
            Entity::Persisted(reservation) => self.update(reservation).await,
        }
    }

    async fn insert(&self, draft: ReservationDraft) -> Result<Reservation, DbError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO reservations (customer_id, start_at, num_guests, notes)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(draft.customer_id.get())
        .bind(draft.start_at)
        .bind(i64::from(draft.num_guests.get()))
        .bind(draft.notes.as_deref())
        .fetch_one(self.pool)
        .await?;

        debug!(
            reservation_id = id,
            customer_id = draft.customer_id.get(),
            "inserted reservation"
        );
        Ok(Reservation::from_draft(ReservationId::from_db(id), draft))
    }

    async fn update(&self, reservation: Reservation) -> Result<Reservation, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE reservations
            SET customer_id = ?, start_at = ?, num_guests = ?, notes = ?
            WHERE id = ?
            "#,
        )
        .bind(reservation.customer_id.get())
        .bind(reservation.start_at)
        .bind(i64::from(reservation.num_guests.get()))
        .bind(reservation.notes.as_deref())
        .bind(reservation.id().get())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("reservation", reservation.id()));
        }

        debug!(reservation_id = reservation.id().get(), "updated reservation");
        Ok(reservation)
    }
}

impl Customer {
    /// This customer's reservations, earliest first.
    pub async fn reservations(
        &self,
        repo: &ReservationRepo<'_>,
    ) -> Result<Vec<Reservation>, DbError> {
        repo.list_for_customer(self.id()).await
    }
}
