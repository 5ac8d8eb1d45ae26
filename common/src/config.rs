use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Share of the daily rate charged for each day a book comes back late.
pub const DEFAULT_LATE_FEE_RATE: Decimal = dec!(0.15);

/// Longest rental accepted when nothing else is configured.
pub const DEFAULT_MAX_RENTAL_DAYS: i64 = 365;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LendingConfig {
    /// Fraction of the daily rate charged per overdue day.
    pub late_fee_rate: Decimal,
    /// Upper bound for `rental_days` on new reservations.
    ///
    /// Requests above it are rejected the same way as non-positive durations.
    pub max_rental_days: i64,
    /// Output verbosity for terminal front-ends. `0` prints everything.
    pub quiet: u8,
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self {
            late_fee_rate: DEFAULT_LATE_FEE_RATE,
            max_rental_days: DEFAULT_MAX_RENTAL_DAYS,
            quiet: 0,
        }
    }
}
