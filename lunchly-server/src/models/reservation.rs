//! Reservation inputs and the reservation entity
//!
//! A `ReservationDraft` can only hold a parsed start time and a positive
//! guest count, so nothing unchecked reaches the repository.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::validation::optional_text;
use super::{CustomerId, Entity, ReservationId, ValidationError};

/// Maximum length for reservation notes
const MAX_NOTES_LEN: usize = 2000;

/// Accepted wall-clock layouts, tried after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Number of guests, always at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GuestCount(u32);

impl GuestCount {
    pub fn new(n: i64) -> Result<Self, ValidationError> {
        if n <= 0 {
            return Err(ValidationError::NotPositive {
                field: "number of guests",
                value: n,
            });
        }

        u32::try_from(n)
            .map(Self)
            .map_err(|_| ValidationError::NotAnInteger {
                field: "number of guests",
                value: n.to_string(),
            })
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl FromStr for GuestCount {
    type Err = ValidationError;

    /// Parse form input such as `"4"`. Fractions and words are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::NotAnInteger {
                field: "number of guests",
                value: s.to_owned(),
            })?;
        Self::new(n)
    }
}

/// Parse a reservation start time.
///
/// Accepts RFC 3339 (converted to UTC wall-clock time), `YYYY-MM-DDTHH:MM[:SS]`
/// as sent by `datetime-local` inputs, the same with a space separator, and a
/// bare date meaning midnight.
///
/// # Example
/// ```
/// use lunchly_server::models::parse_start_at;
///
/// assert!(parse_start_at("2024-05-01T19:30").is_ok());
/// assert!(parse_start_at("tomorrow-ish").is_err());
/// ```
pub fn parse_start_at(s: &str) -> Result<NaiveDateTime, ValidationError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: "start time" });
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ValidationError::InvalidDate {
            value: trimmed.to_owned(),
        })
}

/// Reservation that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDraft {
    pub customer_id: CustomerId,
    pub start_at: NaiveDateTime,
    pub num_guests: GuestCount,
    pub notes: Option<String>,
}

impl ReservationDraft {
    /// Validate raw form values into a draft.
    pub fn parse(
        customer_id: CustomerId,
        start_at: &str,
        num_guests: GuestCount,
        notes: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            customer_id,
            start_at: parse_start_at(start_at)?,
            num_guests,
            notes: optional_text("notes", notes, MAX_NOTES_LEN)?,
        })
    }
}

/// Stored reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    id: ReservationId,
    pub customer_id: CustomerId,
    pub start_at: NaiveDateTime,
    pub num_guests: GuestCount,
    pub notes: Option<String>,
}

impl Reservation {
    pub(crate) fn from_draft(id: ReservationId, draft: ReservationDraft) -> Self {
        Self {
            id,
            customer_id: draft.customer_id,
            start_at: draft.start_at,
            num_guests: draft.num_guests,
            notes: draft.notes,
        }
    }

    pub fn id(&self) -> ReservationId {
        self.id
    }

    /// Replace every mutable field with the draft's values, including the
    /// owning customer. The id is kept.
    pub fn apply(&mut self, draft: ReservationDraft) {
        self.customer_id = draft.customer_id;
        self.start_at = draft.start_at;
        self.num_guests = draft.num_guests;
        self.notes = draft.notes;
    }
}

pub type ReservationEntity = Entity<ReservationDraft, Reservation>;

impl From<ReservationDraft> for ReservationEntity {
    fn from(draft: ReservationDraft) -> Self {
        Entity::Transient(draft)
    }
}

impl From<Reservation> for ReservationEntity {
    fn from(reservation: Reservation) -> Self {
        Entity::Persisted(reservation)
    }
}
