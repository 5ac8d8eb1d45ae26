//! # Reservation Service
//!
//! Implements the checkout and return use cases.
//!
//! The service itself holds no business rules beyond ordering the steps. It
//! orchestrates:
//! 1. the user directory and book catalog ports, to resolve who borrows what,
//! 2. the [`FeeCalculator`], to price the rental,
//! 3. the [`AvailabilityLedger`], to take and give back copies atomically,
//! 4. the [`ReservationStateMachine`], to close a loan,
//! 5. the reservation repository, to store the result.
//!
//! Whenever a copy was taken but the reservation could not be stored, the copy
//! is put back before the error reaches the caller. A return is stored before
//! its copy goes back on the shelf, so a failed write leaves the loan open and
//! the copy still lent.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use lending_common::ReservationError;
use lending_common::config::LendingConfig;
use lending_common::models::book::BookId;
use lending_common::models::reservation::{Reservation, ReservationId, ReservationStatus};
use lending_common::models::user::UserId;
use lending_common::repository::{BookRepository, ReservationRepository, UserRepository};
use tracing::{error, info, warn};

use crate::fees::FeeCalculator;
use crate::ledger::{AvailabilityLedger, KeyedLocks};
use crate::lifecycle::{ReservationStateMachine, SettleError};

pub struct ReservationService {
    users: Arc<dyn UserRepository>,
    books: Arc<dyn BookRepository>,
    reservations: Arc<dyn ReservationRepository>,
    ledger: AvailabilityLedger,
    fees: FeeCalculator,
    lifecycle: ReservationStateMachine,
    returns: KeyedLocks<ReservationId>,
}

impl ReservationService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        books: Arc<dyn BookRepository>,
        reservations: Arc<dyn ReservationRepository>,
        cfg: &LendingConfig,
    ) -> Self {
        let fees = FeeCalculator::from_config(cfg);
        Self {
            users,
            ledger: AvailabilityLedger::new(books.clone()),
            books,
            reservations,
            fees,
            lifecycle: ReservationStateMachine::new(fees),
            returns: KeyedLocks::new(),
        }
    }

    /// Checks out one copy of `book_id` for `user_id`.
    ///
    /// # Errors
    /// `UserNotFound`, `BookNotFound`, `InvalidDuration`, `FeeOverflow`,
    /// `OutOfStock`, or a repository failure. In every error case the book's availability is the
    /// same as before the call.
    pub fn create_reservation(
        &self,
        user_id: UserId,
        book_id: BookId,
        rental_days: i64,
        start_date: NaiveDate,
    ) -> Result<Reservation, ReservationError> {
        let user = self
            .users
            .get_user_by_id(user_id)?
            .ok_or(ReservationError::UserNotFound(user_id))?;

        let book = self
            .books
            .find_book_by_external_id(book_id)?
            .ok_or(ReservationError::BookNotFound(book_id))?;

        let days = self.fees.rental_days(rental_days)?;
        let expected_return_date = start_date
            .checked_add_days(Days::new(u64::from(days)))
            .ok_or(ReservationError::InvalidDuration(rental_days))?;
        let total_fee = self.fees.total_fee(book.price, days)?;

        self.ledger.reserve(book_id, 1).inspect_err(|e| {
            warn!(user = %user.id, book = %book_id, "Reservation rejected: {e}");
        })?;

        let reservation = Reservation::open(user.id, &book, days, start_date, expected_return_date, total_fee);

        match self.reservations.save(reservation) {
            Ok(saved) => {
                info!(
                    reservation = ?saved.id,
                    user = %user.id,
                    book = %book_id,
                    due = %expected_return_date,
                    "Reservation created, total fee {total_fee}"
                );
                Ok(saved)
            }
            Err(err) => {
                warn!(book = %book_id, "Could not store reservation, releasing copy: {err}");
                if let Err(release_err) = self.ledger.release(book_id, 1) {
                    error!(book = %book_id, "Compensating release failed: {release_err}");
                }
                Err(err.into())
            }
        }
    }

    /// Closes an active reservation and puts its copy back on the shelf.
    ///
    /// Concurrent returns of the same reservation are serialized: the second
    /// one sees a terminal status and fails with `InvalidState`.
    pub fn return_book(
        &self,
        reservation_id: ReservationId,
        actual_return_date: NaiveDate,
    ) -> Result<Reservation, ReservationError> {
        self.returns.with(reservation_id, || -> Result<Reservation, ReservationError> {
            let mut reservation = self.get_reservation_by_id(reservation_id)?;

            let settlement = self
                .lifecycle
                .settle(&reservation, actual_return_date)
                .map_err(|e| match e {
                    SettleError::NotActive(status) => ReservationError::InvalidState {
                        id: reservation_id,
                        status,
                    },
                    SettleError::FeeOverflow => ReservationError::FeeOverflow,
                })?;
            self.lifecycle.apply(&mut reservation, &settlement);

            // Closed before the copy goes back, so a failed write never frees a copy that is still lent.
            let book_id = reservation.book_id;
            let saved = self.reservations.save(reservation).inspect_err(|err| {
                warn!(reservation = %reservation_id, "Could not store return, loan stays open: {err}");
            })?;

            if let Err(release_err) = self.ledger.release(book_id, 1) {
                error!(
                    reservation = %reservation_id,
                    book = %book_id,
                    "Return stored but the copy could not be shelved: {release_err}"
                );
            }

            info!(
                reservation = %reservation_id,
                book = %book_id,
                status = %saved.status,
                days_late = settlement.days_late,
                "Book returned, late fee {}",
                saved.late_fee
            );
            Ok(saved)
        })
    }

    pub fn get_reservation_by_id(&self, id: ReservationId) -> Result<Reservation, ReservationError> {
        self.reservations
            .find_by_id(id)?
            .ok_or(ReservationError::ReservationNotFound(id))
    }

    pub fn get_reservations_by_user_id(&self, user_id: UserId) -> Result<Vec<Reservation>, ReservationError> {
        Ok(self.reservations.find_by_user_id(user_id)?)
    }

    pub fn get_active_reservations(&self) -> Result<Vec<Reservation>, ReservationError> {
        Ok(self.reservations.find_by_status(ReservationStatus::Active)?)
    }

    pub fn get_all_reservations(&self) -> Result<Vec<Reservation>, ReservationError> {
        Ok(self.reservations.find_all()?)
    }

    /// Active reservations whose due date is before `today`.
    pub fn get_overdue_reservations(&self, today: NaiveDate) -> Result<Vec<Reservation>, ReservationError> {
        let mut active = self.get_active_reservations()?;
        active.retain(|r| r.is_past_due(today));
        Ok(active)
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
