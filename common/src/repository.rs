//! # Outbound Ports (Driven Actors)
//!
//! Contracts for everything the lending core needs from the outside world:
//! the user directory, the book catalog and reservation storage.
//!
//! ## Rules
//! 1. All items here are `traits`; implementations live in adapters.
//! 2. Calls are synchronous and may fail with [`RepositoryError`].
//! 3. "Not found" is `Ok(None)`, never an error. The core decides which
//!    [`crate::ReservationError`] that becomes.

use crate::error::RepositoryError;
use crate::models::book::{Book, BookId};
use crate::models::reservation::{Reservation, ReservationId, ReservationStatus};
use crate::models::user::{User, UserId};

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Read-only access to registered borrowers.
pub trait UserRepository: Send + Sync {
    fn get_user_by_id(&self, id: UserId) -> RepoResult<Option<User>>;
}

/// Access to the book catalog.
pub trait BookRepository: Send + Sync {
    fn find_book_by_external_id(&self, id: BookId) -> RepoResult<Option<Book>>;

    /// Writes the book back, including its availability counter.
    fn save(&self, book: &Book) -> RepoResult<()>;
}

/// Durable storage of reservations.
pub trait ReservationRepository: Send + Sync {
    /// Inserts or updates `reservation`.
    ///
    /// # Returns
    /// The stored reservation, with `id` assigned when it was `None`.
    fn save(&self, reservation: Reservation) -> RepoResult<Reservation>;

    fn find_by_id(&self, id: ReservationId) -> RepoResult<Option<Reservation>>;

    fn find_by_user_id(&self, user_id: UserId) -> RepoResult<Vec<Reservation>>;

    fn find_by_status(&self, status: ReservationStatus) -> RepoResult<Vec<Reservation>>;

    fn find_all(&self) -> RepoResult<Vec<Reservation>>;
}
