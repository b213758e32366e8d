//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod ids;
pub mod entity;
pub mod customer;
pub mod reservation;

pub use validation::ValidationError;
pub use ids::{CustomerId, ReservationId};
pub use entity::Entity;
pub use customer::{Customer, CustomerDraft, CustomerEntity, PersonName, Phone};
pub use reservation::{
    parse_start_at, GuestCount, Reservation, ReservationDraft, ReservationEntity,
};
