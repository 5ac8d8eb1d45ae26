use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::book::{Book, BookId};
use super::user::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReservationId(pub u64);

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a reservation.
///
/// `Active` is the only non-terminal state. Which transitions are legal is
/// decided by the core's state machine, not by callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReservationStatus {
    #[default]
    Active,
    /// Returned on or before the expected date.
    Returned,
    /// Returned after the expected date.
    Overdue,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Returned => "RETURNED",
            Self::Overdue => "OVERDUE",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One loan of one copy of a book.
///
/// Written once at creation and once at return. `id` stays `None` until the
/// reservation repository stores it for the first time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: Option<ReservationId>,
    pub user_id: UserId,
    pub book_id: BookId,
    pub book_title: String,
    pub rental_days: u32,
    pub start_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub actual_return_date: Option<NaiveDate>,
    /// Book price at the time of checkout.
    pub daily_rate: Decimal,
    pub total_fee: Decimal,
    pub late_fee: Decimal,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Builds a fresh, unsaved `Active` reservation for `book`.
    ///
    /// The daily rate is snapshotted from the book's current price.
    pub fn open(
        user_id: UserId,
        book: &Book,
        rental_days: u32,
        start_date: NaiveDate,
        expected_return_date: NaiveDate,
        total_fee: Decimal,
    ) -> Self {
        Self {
            id: None,
            user_id,
            book_id: book.external_id,
            book_title: book.title.clone(),
            rental_days,
            start_date,
            expected_return_date,
            actual_return_date: None,
            daily_rate: book.price,
            total_fee,
            late_fee: Decimal::ZERO,
            status: ReservationStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }

    /// `true` when the loan is still out and its due date is before `today`.
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        self.is_active() && self.expected_return_date < today
    }
}
