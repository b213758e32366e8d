//! Row identifiers assigned by storage

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::ValidationError;

/// Identifier of a stored customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CustomerId(i64);

/// Identifier of a stored reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

fn positive_id(field: &'static str, value: i64) -> Result<i64, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(value)
}

fn parse_id(field: &'static str, s: &str) -> Result<i64, ValidationError> {
    let value = s
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NotAnInteger {
            field,
            value: s.to_owned(),
        })?;
    positive_id(field, value)
}

impl CustomerId {
    /// Wrap a raw id, rejecting zero and negative values.
    pub fn new(id: i64) -> Result<Self, ValidationError> {
        positive_id("customer id", id).map(Self)
    }

    /// Ids read back from the `customers` table are trusted.
    pub(crate) fn from_db(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl ReservationId {
    /// Wrap a raw id, rejecting zero and negative values.
    pub fn new(id: i64) -> Result<Self, ValidationError> {
        positive_id("reservation id", id).map(Self)
    }

    pub(crate) fn from_db(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for CustomerId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_id("customer id", s).map(Self)
    }
}

impl FromStr for ReservationId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_id("reservation id", s).map(Self)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
