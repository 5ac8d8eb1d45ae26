//! In-memory implementations of the outbound ports.
//!
//! Used by the CLI simulation and by tests. Each repository guards its map
//! with a `parking_lot::RwLock`; none of them enforce business rules.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use lending_common::models::book::{Book, BookId};
use lending_common::models::reservation::{Reservation, ReservationId, ReservationStatus};
use lending_common::models::user::{User, UserId};
use lending_common::repository::{BookRepository, RepoResult, ReservationRepository, UserRepository};
use parking_lot::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) {
        self.users.write().insert(user.id, user);
    }
}

impl UserRepository for InMemoryUserRepository {
    fn get_user_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.users.read().get(&id).cloned())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    books: RwLock<HashMap<BookId, Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, book: Book) {
        self.books.write().insert(book.external_id, book);
    }
}

impl BookRepository for InMemoryBookRepository {
    fn find_book_by_external_id(&self, id: BookId) -> RepoResult<Option<Book>> {
        Ok(self.books.read().get(&id).cloned())
    }

    fn save(&self, book: &Book) -> RepoResult<()> {
        self.insert(book.clone());
        Ok(())
    }
}

/// Reservation storage. Ids start at 1 and results come back in id order.
#[derive(Debug, Default)]
pub struct InMemoryReservationRepository {
    rows: RwLock<BTreeMap<ReservationId, Reservation>>,
    last_id: AtomicU64,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn select(&self, keep: impl Fn(&Reservation) -> bool) -> Vec<Reservation> {
        self.rows.read().values().filter(|r| keep(r)).cloned().collect()
    }
}

impl ReservationRepository for InMemoryReservationRepository {
    fn save(&self, mut reservation: Reservation) -> RepoResult<Reservation> {
        let id = *reservation
            .id
            .get_or_insert_with(|| ReservationId(self.last_id.fetch_add(1, Ordering::Relaxed) + 1));
        self.rows.write().insert(id, reservation.clone());
        Ok(reservation)
    }

    fn find_by_id(&self, id: ReservationId) -> RepoResult<Option<Reservation>> {
        Ok(self.rows.read().get(&id).cloned())
    }

    fn find_by_user_id(&self, user_id: UserId) -> RepoResult<Vec<Reservation>> {
        Ok(self.select(|r| r.user_id == user_id))
    }

    fn find_by_status(&self, status: ReservationStatus) -> RepoResult<Vec<Reservation>> {
        Ok(self.select(|r| r.status == status))
    }

    fn find_all(&self) -> RepoResult<Vec<Reservation>> {
        Ok(self.select(|_| true))
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
