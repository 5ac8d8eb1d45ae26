use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use lending_common::RepositoryError;
use lending_common::config::LendingConfig;
use lending_common::models::book::{Book, BookId};
use lending_common::models::reservation::{Reservation, ReservationId, ReservationStatus};
use lending_common::models::user::{User, UserId};
use lending_common::repository::{BookRepository, RepoResult, ReservationRepository};
use lending_core::ReservationService;
use lending_core::store::{InMemoryBookRepository, InMemoryReservationRepository, InMemoryUserRepository};
use parking_lot::Mutex;
use rust_decimal_macros::dec;

pub const BOOK: BookId = BookId(258027);
pub const USER: UserId = UserId(1);
pub const USER_TWO: UserId = UserId(2);

type Interleaved = Box<dyn Fn() + Send + Sync>;

/// Reservation storage whose writes can be switched off.
#[derive(Default)]
pub struct FlakyReservationRepository {
    inner: InMemoryReservationRepository,
    failing: AtomicBool,
    before_failure: Mutex<Option<Interleaved>>,
}

impl FlakyReservationRepository {
    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Runs `f` inside every failing write, right before the error is returned.
    pub fn before_failed_write(&self, f: impl Fn() + Send + Sync + 'static) {
        *self.before_failure.lock() = Some(Box::new(f));
    }
}

impl ReservationRepository for FlakyReservationRepository {
    fn save(&self, reservation: Reservation) -> RepoResult<Reservation> {
        if self.failing.load(Ordering::SeqCst) {
            if let Some(f) = self.before_failure.lock().as_ref() {
                f();
            }
            return Err(RepositoryError::Unavailable("write timed out".into()));
        }
        self.inner.save(reservation)
    }

    fn find_by_id(&self, id: ReservationId) -> RepoResult<Option<Reservation>> {
        self.inner.find_by_id(id)
    }

    fn find_by_user_id(&self, user_id: UserId) -> RepoResult<Vec<Reservation>> {
        self.inner.find_by_user_id(user_id)
    }

    fn find_by_status(&self, status: ReservationStatus) -> RepoResult<Vec<Reservation>> {
        self.inner.find_by_status(status)
    }

    fn find_all(&self) -> RepoResult<Vec<Reservation>> {
        self.inner.find_all()
    }
}

pub struct Library {
    pub books: Arc<InMemoryBookRepository>,
    pub reservations: Arc<FlakyReservationRepository>,
    pub service: ReservationService,
}

impl Library {
    /// One title priced 15.99 with `stock` copies, `available` on the shelf,
    /// and users `1..=users`.
    pub fn new(stock: u32, available: u32, users: u64) -> Self {
        let user_repo = Arc::new(InMemoryUserRepository::new());
        user_repo.insert(User::new(USER, "Juan Pérez", "juan@example.com"));
        for id in 2..=users {
            user_repo.insert(User::new(UserId(id), format!("Reader {id}"), format!("reader{id}@example.com")));
        }

        let books = Arc::new(InMemoryBookRepository::new());
        books.insert(Book::new(BOOK, "The Lord of the Rings", dec!(15.99), stock).with_available(available));

        let reservations = Arc::new(FlakyReservationRepository::default());
        let service = ReservationService::new(
            user_repo,
            books.clone(),
            reservations.clone(),
            &LendingConfig::default(),
        );

        Self {
            books,
            reservations,
            service,
        }
    }

    pub fn book(&self) -> Book {
        self.books.find_book_by_external_id(BOOK).unwrap().unwrap()
    }

    pub fn available(&self) -> u32 {
        self.book().available_quantity()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
