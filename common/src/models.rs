//! # Domain Models
//!
//! Core data structures of the lending domain.
//!
//! ## Entities
//! * [`book::Book`]: A catalog title with a daily rate and a limited stock of copies.
//! * [`user::User`]: A registered borrower. Read-only from the core's perspective.
//! * [`reservation::Reservation`]: One loan of one copy, from checkout to return.
//!
//! ## Value Objects
//! * [`reservation::ReservationStatus`]: The closed set of lifecycle states.
//! * The `*Id` newtypes, so a user id can never be passed where a book id is expected.

pub mod book;
pub mod reservation;
pub mod user;
