use std::fmt;

use rust_decimal::Decimal;

use crate::error::ReservationError;

/// Catalog identifier of a book, as known by the external catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(pub u64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A lendable title.
///
/// `available_quantity` never leaves `0..=stock_quantity`. The only way to move
/// it after construction is [`Book::take_copies`] and [`Book::restore_copies`],
/// which the availability ledger calls while holding the book's lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub external_id: BookId,
    pub title: String,
    /// Daily rental rate.
    pub price: Decimal,
    stock_quantity: u32,
    available_quantity: u32,
}

impl Book {
    /// Creates a book with every copy on the shelf.
    pub fn new(external_id: BookId, title: impl Into<String>, price: Decimal, stock_quantity: u32) -> Self {
        Self {
            external_id,
            title: title.into(),
            price,
            stock_quantity,
            available_quantity: stock_quantity,
        }
    }

    /// Sets how many copies are currently loanable, clamped to the stock.
    pub fn with_available(mut self, available_quantity: u32) -> Self {
        self.available_quantity = available_quantity.min(self.stock_quantity);
        self
    }

    pub fn stock_quantity(&self) -> u32 {
        self.stock_quantity
    }

    pub fn available_quantity(&self) -> u32 {
        self.available_quantity
    }

    /// Removes `quantity` copies from the shelf.
    ///
    /// Fails with [`ReservationError::OutOfStock`] without touching the counter
    /// when fewer than `quantity` copies are left.
    pub fn take_copies(&mut self, quantity: u32) -> Result<(), ReservationError> {
        match self.available_quantity.checked_sub(quantity) {
            Some(left) => {
                self.available_quantity = left;
                Ok(())
            }
            None => Err(ReservationError::OutOfStock),
        }
    }

    /// Puts `quantity` copies back, never above the owned stock.
    ///
    /// Returns how many copies were actually restored.
    pub fn restore_copies(&mut self, quantity: u32) -> u32 {
        let before = self.available_quantity;
        self.available_quantity = before.saturating_add(quantity).min(self.stock_quantity);
        self.available_quantity - before
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
