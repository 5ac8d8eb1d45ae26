//! # Fee Rules
//!
//! Pure arithmetic for rental and late-return charges. No state, no IO.
//!
//! All amounts are rounded to cents with half-up rounding, so
//! `15.99 × 0.15 × 3 = 7.1955` is charged as `7.20`.

use chrono::NaiveDate;
use lending_common::ReservationError;
use lending_common::config::LendingConfig;
use rust_decimal::{Decimal, RoundingStrategy};

const CENTS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeCalculator {
    late_fee_rate: Decimal,
    max_rental_days: i64,
}

impl Default for FeeCalculator {
    fn default() -> Self {
        Self::from_config(&LendingConfig::default())
    }
}

impl FeeCalculator {
    pub fn from_config(cfg: &LendingConfig) -> Self {
        Self {
            late_fee_rate: cfg.late_fee_rate,
            max_rental_days: cfg.max_rental_days,
        }
    }

    pub fn late_fee_rate(&self) -> Decimal {
        self.late_fee_rate
    }

    /// Validates a requested rental duration.
    ///
    /// Accepts `1..=max_rental_days`; anything else is
    /// [`ReservationError::InvalidDuration`].
    pub fn rental_days(&self, rental_days: i64) -> Result<u32, ReservationError> {
        if rental_days <= 0 || rental_days > self.max_rental_days {
            return Err(ReservationError::InvalidDuration(rental_days));
        }
        u32::try_from(rental_days).map_err(|_| ReservationError::InvalidDuration(rental_days))
    }

    /// `round(daily_rate × rental_days, 2)`.
    pub fn compute_total_fee(&self, daily_rate: Decimal, rental_days: i64) -> Result<Decimal, ReservationError> {
        let days = self.rental_days(rental_days)?;
        self.total_fee(daily_rate, days)
    }

    /// Same as [`Self::compute_total_fee`] for a duration that was already validated.
    pub fn total_fee(&self, daily_rate: Decimal, rental_days: u32) -> Result<Decimal, ReservationError> {
        daily_rate
            .checked_mul(Decimal::from(rental_days))
            .map(round_cents)
            .ok_or(ReservationError::FeeOverflow)
    }

    /// `round(daily_rate × late_fee_rate × days_late, 2)`, or zero when not late.
    ///
    /// # Errors
    /// [`ReservationError::FeeOverflow`] if the product does not fit in a `Decimal`.
    pub fn compute_late_fee(&self, daily_rate: Decimal, days_late: i64) -> Result<Decimal, ReservationError> {
        if days_late <= 0 {
            return Ok(Decimal::ZERO);
        }
        daily_rate
            .checked_mul(self.late_fee_rate)
            .and_then(|per_day| per_day.checked_mul(Decimal::from(days_late)))
            .map(round_cents)
            .ok_or(ReservationError::FeeOverflow)
    }
}

/// Whole days between the due date and the actual return, floored at zero.
pub fn days_late(expected_return_date: NaiveDate, actual_return_date: NaiveDate) -> i64 {
    (actual_return_date - expected_return_date).num_days().max(0)
}

fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENTS, RoundingStrategy::MidpointAwayFromZero)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
