//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::{CustomerId, ReservationId, ValidationError};

/// Extract and validate a customer id from `/customers/{id}`
pub struct CustomerPath(pub CustomerId);

impl<S> FromRequestParts<S> for CustomerPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "customer id" }))?;

        Ok(Self(id.parse()?))
    }
}

/// Extract and validate `/customers/{id}/reservations/{reservation_id}`
pub struct ReservationPath(pub CustomerId, pub ReservationId);

impl<S> FromRequestParts<S> for ReservationPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((customer_id, reservation_id)): Path<(String, String)> =
            Path::from_request_parts(parts, state).await.map_err(|_| {
                ApiError::Validation(ValidationError::Empty {
                    field: "reservation id",
                })
            })?;

        Ok(Self(customer_id.parse()?, reservation_id.parse()?))
    }
}

/// JSON request body whose rejections render as `ApiError`
///
/// A missing body, a wrong content type or a field of the wrong shape is a
/// 400 with the usual `{error, message}` body instead of axum's plain text.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
