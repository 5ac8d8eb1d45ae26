//! # Availability Ledger
//!
//! Owns the only shared mutable resource of the core: the number of loanable
//! copies of each book.
//!
//! Request handlers run concurrently and each one loads its own copy of the
//! book record, so a plain `if available > 0 { available -= 1 }` on that copy
//! would let two handlers take the last copy. The ledger therefore runs
//! load, check, mutate and write-back inside a critical section scoped to the
//! book id. Different books never contend with each other.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use lending_common::ReservationError;
use lending_common::models::book::{Book, BookId};
use lending_common::repository::BookRepository;
use parking_lot::Mutex;
use tracing::debug;

/// A set of mutexes, one per key currently in use.
///
/// Slots are created on first use and dropped again once no caller holds or
/// waits on them, so the registry only grows with the number of keys in flight.
#[derive(Debug)]
pub struct KeyedLocks<K> {
    slots: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash + Copy> KeyedLocks<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` while holding the lock for `key`.
    pub fn with<T>(&self, key: K, f: impl FnOnce() -> T) -> T {
        let slot = self.slot(key);
        let out = {
            let _guard = slot.lock();
            f()
        };
        self.evict(key, slot);
        out
    }

    fn slot(&self, key: K) -> Arc<Mutex<()>> {
        // The registry lock is released before the per-key lock is taken.
        self.slots.lock().entry(key).or_default().clone()
    }

    fn evict(&self, key: K, slot: Arc<Mutex<()>>) {
        let mut slots = self.slots.lock();
        // Clones are only handed out under the registry lock: two owners means the map and us.
        if Arc::strong_count(&slot) == 2 {
            slots.remove(&key);
        }
    }
}

pub struct AvailabilityLedger {
    books: Arc<dyn BookRepository>,
    locks: KeyedLocks<BookId>,
}

impl AvailabilityLedger {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self {
            books,
            locks: KeyedLocks::new(),
        }
    }

    /// Takes `quantity` copies of `book_id` off the shelf.
    ///
    /// # Errors
    /// * [`ReservationError::OutOfStock`] if fewer than `quantity` copies are
    ///   loanable. The stored counter is left untouched.
    /// * [`ReservationError::BookNotFound`] if the book disappeared from the catalog.
    /// * [`ReservationError::Repository`] if the catalog could not be read or written.
    ///
    /// # Returns
    /// The book as written back to the catalog.
    pub fn reserve(&self, book_id: BookId, quantity: u32) -> Result<Book, ReservationError> {
        self.locks.with(book_id, || -> Result<Book, ReservationError> {
            let mut book = self.load(book_id)?;
            book.take_copies(quantity)?;
            self.books.save(&book)?;
            debug!(
                book = %book_id,
                available = book.available_quantity(),
                "Reserved {quantity} copies"
            );
            Ok(book)
        })
    }

    /// Puts `quantity` copies of `book_id` back on the shelf.
    ///
    /// The counter never goes above the owned stock, so releasing twice is harmless.
    pub fn release(&self, book_id: BookId, quantity: u32) -> Result<Book, ReservationError> {
        self.locks.with(book_id, || -> Result<Book, ReservationError> {
            let mut book = self.load(book_id)?;
            let restored = book.restore_copies(quantity);
            if restored == 0 {
                debug!(book = %book_id, "Release ignored, stock is already complete");
                return Ok(book);
            }
            self.books.save(&book)?;
            debug!(
                book = %book_id,
                available = book.available_quantity(),
                "Released {restored} copies"
            );
            Ok(book)
        })
    }

    fn load(&self, book_id: BookId) -> Result<Book, ReservationError> {
        self.books
            .find_book_by_external_id(book_id)?
            .ok_or(ReservationError::BookNotFound(book_id))
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
