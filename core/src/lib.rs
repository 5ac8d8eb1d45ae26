//! # Lending Core
//!
//! Business rules for lending books out of a limited stock.
//!
//! * **[`fees`]**: Rental and late-return pricing.
//! * **[`ledger`]**: Atomic take/give-back of copies per book.
//! * **[`lifecycle`]**: The `ACTIVE → RETURNED | OVERDUE` state machine.
//! * **[`reservations`]**: The checkout/return use cases tying it all together.
//! * **[`store`]**: In-memory adapters for the ports in `lending_common::repository`.

pub mod fees;
pub mod ledger;
pub mod lifecycle;
pub mod reservations;
pub mod store;

pub use fees::FeeCalculator;
pub use ledger::AvailabilityLedger;
pub use lifecycle::{ReservationStateMachine, SettleError, Settlement};
pub use reservations::ReservationService;
