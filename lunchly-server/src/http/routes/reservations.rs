//! Reservation endpoints, nested under the owning customer

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::{CustomerRepo, ReservationRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{CustomerPath, JsonBody, ReservationPath};
use crate::http::server::AppState;
use crate::models::{CustomerId, GuestCount, Reservation, ReservationDraft, ValidationError};

/// Wall-clock layout used in responses
const START_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Guest count as a JSON number or as form-style text
///
/// Anything else (fractions, booleans, null) lands in `Other` and is
/// rejected as a validation error rather than a deserialization failure.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GuestsField {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl GuestsField {
    fn into_count(self) -> Result<GuestCount, ApiError> {
        let count = match self {
            Self::Number(n) => GuestCount::new(n)?,
            Self::Text(s) => s.parse()?,
            Self::Other(value) => {
                return Err(ValidationError::NotAnInteger {
                    field: "number of guests",
                    value: value.to_string(),
                }
                .into())
            }
        };
        Ok(count)
    }
}

/// Create or edit reservation request
#[derive(Deserialize)]
pub struct ReservationRequest {
    pub start_at: String,
    pub num_guests: GuestsField,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ReservationRequest {
    fn into_draft(self, customer_id: CustomerId) -> Result<ReservationDraft, ApiError> {
        let num_guests = self.num_guests.into_count()?;
        Ok(ReservationDraft::parse(
            customer_id,
            &self.start_at,
            num_guests,
            self.notes.as_deref(),
        )?)
    }
}

/// Reservation response
#[derive(Serialize)]
pub struct ReservationResponse {
    pub id: i64,
    pub customer_id: i64,
    pub start_at: String,
    pub num_guests: u32,
    pub notes: Option<String>,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id().get(),
            customer_id: r.customer_id.get(),
            start_at: r.start_at.format(START_AT_FORMAT).to_string(),
            num_guests: r.num_guests.get(),
            notes: r.notes,
        }
    }
}

/// POST /customers/{id}/reservations - add a reservation
async fn add_reservation(
    State(state): State<Arc<AppState>>,
    CustomerPath(customer_id): CustomerPath,
    JsonBody(req): JsonBody<ReservationRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), ApiError> {
    let draft = req.into_draft(customer_id)?;
    CustomerRepo::new(&state.pool).get(customer_id).await?;

    let reservation = ReservationRepo::new(&state.pool).save(draft).await?;

    tracing::info!(
        reservation_id = reservation.id().get(),
        customer_id = customer_id.get(),
        "reservation created"
    );
    Ok((StatusCode::CREATED, Json(ReservationResponse::from(reservation))))
}

/// GET /customers/{id}/reservations/{reservation_id} - get a reservation
///
/// The customer segment is not checked against the reservation's owner.
async fn get_reservation(
    State(state): State<Arc<AppState>>,
    ReservationPath(_, reservation_id): ReservationPath,
) -> Result<Json<ReservationResponse>, ApiError> {
    let reservation = ReservationRepo::new(&state.pool).get(reservation_id).await?;
    Ok(Json(ReservationResponse::from(reservation)))
}

/// PUT /customers/{id}/reservations/{reservation_id} - edit a reservation
///
/// The reservation is assigned to the customer in the path, which moves it
/// if it belonged to someone else.
async fn update_reservation(
    State(state): State<Arc<AppState>>,
    ReservationPath(customer_id, reservation_id): ReservationPath,
    JsonBody(req): JsonBody<ReservationRequest>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let draft = req.into_draft(customer_id)?;
    CustomerRepo::new(&state.pool).get(customer_id).await?;

    let repo = ReservationRepo::new(&state.pool);
    let mut reservation = repo.get(reservation_id).await?;
    if reservation.customer_id != customer_id {
        tracing::warn!(
            reservation_id = reservation_id.get(),
            from = reservation.customer_id.get(),
            to = customer_id.get(),
            "reservation reassigned to another customer"
        );
    }
    reservation.apply(draft);
    let reservation = repo.save(reservation).await?;

    Ok(Json(ReservationResponse::from(reservation)))
}

/// Reservation routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/customers/{id}/reservations", post(add_reservation))
        .route(
            "/customers/{id}/reservations/{reservation_id}",
            get(get_reservation).put(update_reservation),
        )
}
