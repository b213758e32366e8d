//! Customer repository
//!
//! - all/search: ordered by last name, then first name
//! - best_customers: JOIN with reservation count, single query
//! - save: INSERT ... RETURNING id for drafts, UPDATE for stored customers

use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use super::DbError;
use crate::models::{
    Customer, CustomerDraft, CustomerEntity, CustomerId, Entity, PersonName, Phone,
};

/// How many customers the best-customers ranking returns.
pub const BEST_CUSTOMERS_LIMIT: i64 = 10;

const SELECT_CUSTOMER: &str = "SELECT id, first_name, last_name, phone, notes FROM customers";

/// Customer row as stored
#[derive(Debug, FromRow)]
struct CustomerRow {
    id: i64,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    notes: Option<String>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        let draft = CustomerDraft {
            first_name: PersonName::from_db(row.first_name),
            last_name: PersonName::from_db(row.last_name),
            phone: row.phone.map(Phone::from_db),
            notes: row.notes,
        };
        Customer::from_draft(CustomerId::from_db(row.id), draft)
    }
}

#[derive(Debug, FromRow)]
struct RankedRow {
    #[sqlx(flatten)]
    customer: CustomerRow,
    reservation_count: i64,
}

/// Customer with reservation count for the ranking
#[derive(Debug, Clone)]
pub struct CustomerWithCount {
    pub customer: Customer,
    pub reservation_count: i64,
}

/// Customer repository
pub struct CustomerRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CustomerRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All customers, ordered for display.
    pub async fn all(&self) -> Result<Vec<Customer>, DbError> {
        let rows: Vec<CustomerRow> = sqlx::query_as(&format!(
            "{SELECT_CUSTOMER} ORDER BY last_name, first_name, id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    /// Customers whose full name contains `term`, ignoring case.
    ///
    /// A missing or empty term returns every customer, same as [`Self::all`].
    /// Case folding is Unicode-aware (`str::to_lowercase`), so "MÜLLER"
    /// finds "Ana Müller". Filtering happens after [`Self::all`].
    pub async fn search(&self, term: Option<&str>) -> Result<Vec<Customer>, DbError> {
        let Some(term) = term.filter(|t| !t.is_empty()) else {
            return self.all().await;
        };

        debug!(term, "searching customers");
        let needle = term.to_lowercase();
        let mut customers = self.all().await?;
        customers.retain(|c| c.full_name().to_lowercase().contains(&needle));

        Ok(customers)
    }

    /// Top customers by number of reservations.
    ///
    /// Ties are broken by customer id so the ranking is stable. Customers
    /// without reservations never appear, so an empty reservations table
    /// gives an empty ranking.
    pub async fn best_customers(&self) -> Result<Vec<CustomerWithCount>, DbError> {
        let rows: Vec<RankedRow> = sqlx::query_as(
            r#"
            SELECT
                c.id,
                c.first_name,
                c.last_name,
                c.phone,
                c.notes,
                COUNT(r.id) AS reservation_count
            FROM customers c
            JOIN reservations r ON r.customer_id = c.id
            GROUP BY c.id, c.first_name, c.last_name, c.phone, c.notes
            ORDER BY reservation_count DESC, c.id ASC
            LIMIT ?
            "#,
        )
        .bind(BEST_CUSTOMERS_LIMIT)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| CustomerWithCount {
                customer: Customer::from(r.customer),
                reservation_count: r.reservation_count,
            })
            .collect())
    }

    /// Get a single customer by id.
    pub async fn get(&self, id: CustomerId) -> Result<Customer, DbError> {
        let row: CustomerRow = sqlx::query_as(&format!("{SELECT_CUSTOMER} WHERE id = ?"))
            .bind(id.get())
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("customer", id))?;

        Ok(Customer::from(row))
    }

    /// Store a customer.
    ///
    /// Drafts are inserted and come back with their new id. Stored
    /// customers have all mutable fields rewritten; if the row has
    /// vanished in the meantime this is `NotFound`.
    pub async fn save(&self, customer: impl Into<CustomerEntity>) -> Result<Customer, DbError> {
        match customer.into() {
            Entity::Transient(draft) => self.insert(draft).await,
            Entity::Persisted(customer) => self.update(customer).await,
        }
    }

    async fn insert(&self, draft: CustomerDraft) -> Result<Customer, DbError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO customers (first_name, last_name, phone, notes)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(draft.first_name.as_str())
        .bind(draft.last_name.as_str())
        .bind(draft.phone.as_ref().map(Phone::as_str))
        .bind(draft.notes.as_deref())
        .fetch_one(self.pool)
        .await?;

        debug!(customer_id = id, "inserted customer");
        Ok(Customer::from_draft(CustomerId::from_db(id), draft))
    }

    async fn update(&self, customer: Customer) -> Result<Customer, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET first_name = ?, last_name = ?, phone = ?, notes = ?
            WHERE id = ?
            "#,
        )
        .bind(customer.first_name.as_str())
        .bind(customer.last_name.as_str())
        .bind(customer.phone.as_ref().map(Phone::as_str))
        .bind(customer.notes.as_deref())
        .bind(customer.id().get())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("customer", customer.id()));
        }

        debug!(customer_id = customer.id().get(), "updated customer");
        Ok(customer)
    }
}
