//! # Reservation Lifecycle
//!
//! The single place that knows which status changes are legal.
//!
//! ```text
//!            actual <= expected
//!   ACTIVE ─────────────────────▶ RETURNED
//!      │
//!      │     actual >  expected
//!      └────────────────────────▶ OVERDUE (late fee charged)
//! ```
//!
//! Both targets are terminal. The transition happens once, when the book comes back.

use chrono::NaiveDate;
use lending_common::models::reservation::{Reservation, ReservationStatus};
use rust_decimal::Decimal;

use crate::fees::{self, FeeCalculator};

/// Outcome of returning a book, computed before anything is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub status: ReservationStatus,
    pub returned_on: NaiveDate,
    pub days_late: i64,
    pub late_fee: Decimal,
}

/// Why a reservation could not be settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleError {
    /// The reservation already left `ACTIVE`; carries its current status.
    NotActive(ReservationStatus),
    /// The late fee does not fit in a `Decimal`.
    FeeOverflow,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReservationStateMachine {
    fees: FeeCalculator,
}

impl ReservationStateMachine {
    pub fn new(fees: FeeCalculator) -> Self {
        Self { fees }
    }

    pub fn can_transition(from: ReservationStatus, to: ReservationStatus) -> bool {
        matches!(
            (from, to),
            (ReservationStatus::Active, ReservationStatus::Returned)
                | (ReservationStatus::Active, ReservationStatus::Overdue)
        )
    }

    /// Decides how `reservation` closes if the book comes back on `returned_on`.
    ///
    /// # Errors
    /// [`SettleError::NotActive`] when the reservation is already closed, and
    /// [`SettleError::FeeOverflow`] when the late fee cannot be represented.
    pub fn settle(&self, reservation: &Reservation, returned_on: NaiveDate) -> Result<Settlement, SettleError> {
        if !reservation.is_active() {
            return Err(SettleError::NotActive(reservation.status));
        }

        if returned_on <= reservation.expected_return_date {
            return Ok(Settlement {
                status: ReservationStatus::Returned,
                returned_on,
                days_late: 0,
                late_fee: Decimal::ZERO,
            });
        }

        let days_late = fees::days_late(reservation.expected_return_date, returned_on);
        let late_fee = self
            .fees
            .compute_late_fee(reservation.daily_rate, days_late)
            .map_err(|_| SettleError::FeeOverflow)?;
        Ok(Settlement {
            status: ReservationStatus::Overdue,
            returned_on,
            days_late,
            late_fee,
        })
    }

    /// Writes a settlement produced by [`Self::settle`] into the reservation.
    pub fn apply(&self, reservation: &mut Reservation, settlement: &Settlement) {
        debug_assert!(Self::can_transition(reservation.status, settlement.status));
        reservation.actual_return_date = Some(settlement.returned_on);
        reservation.late_fee = settlement.late_fee;
        reservation.status = settlement.status;
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
