//! Customer endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::reservations::ReservationResponse;
use crate::db::{CustomerRepo, CustomerWithCount, ReservationRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{CustomerPath, JsonBody};
use crate::http::server::AppState;
use crate::models::{Customer, CustomerDraft};

/// Create or edit customer request
#[derive(Deserialize)]
pub struct CustomerRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CustomerRequest {
    fn into_draft(self) -> Result<CustomerDraft, ApiError> {
        Ok(CustomerDraft::new(
            &self.first_name,
            &self.last_name,
            self.phone.as_deref(),
            self.notes.as_deref(),
        )?)
    }
}

/// Query parameters for the customer list
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// Customer response
#[derive(Serialize)]
pub struct CustomerResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id().get(),
            full_name: c.full_name(),
            first_name: c.first_name.as_str().to_owned(),
            last_name: c.last_name.as_str().to_owned(),
            phone: c.phone.map(|p| p.as_str().to_owned()),
            notes: c.notes,
        }
    }
}

/// Ranked customer response
#[derive(Serialize)]
pub struct RankedCustomerResponse {
    #[serde(flatten)]
    pub customer: CustomerResponse,
    pub reservation_count: i64,
}

impl From<CustomerWithCount> for RankedCustomerResponse {
    fn from(c: CustomerWithCount) -> Self {
        Self {
            customer: CustomerResponse::from(c.customer),
            reservation_count: c.reservation_count,
        }
    }
}

/// Customer with reservations
#[derive(Serialize)]
pub struct CustomerDetailResponse {
    #[serde(flatten)]
    pub customer: CustomerResponse,
    pub reservations: Vec<ReservationResponse>,
}

/// GET /customers?search=term - list all customers, or search by name
async fn list_customers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CustomerResponse>>, ApiError> {
    let customers = CustomerRepo::new(&state.pool)
        .search(params.search.as_deref())
        .await?;

    Ok(Json(customers.into_iter().map(CustomerResponse::from).collect()))
}

/// GET /customers/top-ten - best customers by reservation count
async fn top_customers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RankedCustomerResponse>>, ApiError> {
    let ranked = CustomerRepo::new(&state.pool).best_customers().await?;
    Ok(Json(ranked.into_iter().map(RankedCustomerResponse::from).collect()))
}

/// POST /customers - create a new customer
async fn create_customer(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    let draft = req.into_draft()?;
    let customer = CustomerRepo::new(&state.pool).save(draft).await?;

    tracing::info!(customer_id = customer.id().get(), "customer created");
    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}

/// GET /customers/{id} - customer with reservations
async fn get_customer(
    State(state): State<Arc<AppState>>,
    CustomerPath(id): CustomerPath,
) -> Result<Json<CustomerDetailResponse>, ApiError> {
    let customer = CustomerRepo::new(&state.pool).get(id).await?;
    let reservations = customer
        .reservations(&ReservationRepo::new(&state.pool))
        .await?;

    Ok(Json(CustomerDetailResponse {
        customer: CustomerResponse::from(customer),
        reservations: reservations
            .into_iter()
            .map(ReservationResponse::from)
            .collect(),
    }))
}

/// PUT /customers/{id} - replace a customer's details
async fn update_customer(
    State(state): State<Arc<AppState>>,
    CustomerPath(id): CustomerPath,
    JsonBody(req): JsonBody<CustomerRequest>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let draft = req.into_draft()?;
    let repo = CustomerRepo::new(&state.pool);

    let mut customer = repo.get(id).await?;
    customer.apply(draft);
    let customer = repo.save(customer).await?;

    Ok(Json(CustomerResponse::from(customer)))
}

/// Customer routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route("/customers/top-ten", get(top_customers))
        .route("/customers/{id}", get(get_customer).put(update_customer))
}
