use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{NaiveDate, Utc};
use colored::*;
use lending_common::ReservationError;
use lending_common::config::LendingConfig;
use lending_common::models::book::{Book, BookId};
use lending_common::models::reservation::{Reservation, ReservationStatus};
use lending_common::models::user::{User, UserId};
use lending_common::repository::BookRepository;
use lending_core::ReservationService;
use lending_core::store::{InMemoryBookRepository, InMemoryReservationRepository, InMemoryUserRepository};
use rand::Rng;
use tokio::task::JoinSet;

use crate::commands::SimulateArgs;
use crate::terminal::{colors, print};

const SIM_BOOK: BookId = BookId(258027);
const SIM_TITLE: &str = "The Lord of the Rings";

type Detail = (String, ColoredString);

pub async fn simulate(args: SimulateArgs, cfg: &LendingConfig) -> anyhow::Result<()> {
    print::header("seeding catalog", cfg.quiet);
    let users = Arc::new(InMemoryUserRepository::new());
    for i in 1..=args.borrowers {
        users.insert(User::new(UserId(i), format!("Borrower {i}"), format!("borrower{i}@example.com")));
    }

    let books = Arc::new(InMemoryBookRepository::new());
    books.insert(Book::new(SIM_BOOK, SIM_TITLE, args.price, args.copies));

    let service = Arc::new(ReservationService::new(
        users,
        books.clone(),
        Arc::new(InMemoryReservationRepository::new()),
        cfg,
    ));
    print::aligned_line("Title", SIM_TITLE);
    print::aligned_line("Copies", args.copies.to_string());
    print::aligned_line("Borrowers", args.borrowers.to_string());

    let today: NaiveDate = Utc::now().date_naive();
    let start_time: Instant = Instant::now();

    print::header("checkout race", cfg.quiet);
    let mut loans: Vec<Reservation> = checkout_race(&service, &args, today).await?;
    let rejected: u64 = args.borrowers - loans.len() as u64;
    print::aligned_line("Loans", loans.len().to_string().green().bold());
    print::aligned_line("Out of stock", rejected.to_string().yellow().bold());
    print::aligned_line("On the shelf", shelf(books.as_ref())?.to_string());

    print::header("returns", cfg.quiet);
    loans.sort_by_key(|r| r.id);
    let mut rng = rand::rng();
    for (idx, loan) in loans.iter().enumerate() {
        let Some(id) = loan.id else { continue };
        let offset: i64 = rng.random_range(-2..=4);
        let returned_on = loan.expected_return_date + chrono::Duration::days(offset);
        let closed = service.return_book(id, returned_on)?;
        print_loan_tree(idx, &closed);
    }

    print_summary(&service, books.as_ref(), start_time.elapsed())
}

async fn checkout_race(
    service: &Arc<ReservationService>,
    args: &SimulateArgs,
    today: NaiveDate,
) -> anyhow::Result<Vec<Reservation>> {
    let mut set = JoinSet::new();
    for i in 1..=args.borrowers {
        let service = service.clone();
        let days = args.days;
        set.spawn_blocking(move || (UserId(i), service.create_reservation(UserId(i), SIM_BOOK, days, today)));
    }

    let mut loans = Vec::new();
    while let Some(joined) = set.join_next().await {
        let (user, outcome) = joined?;
        match outcome {
            Ok(reservation) => {
                print::print_status(format!("Borrower {} got a copy", user.to_string().color(colors::ACCENT)));
                loans.push(reservation);
            }
            Err(ReservationError::OutOfStock) => {
                print::print_status(format!("Borrower {} was turned away", user.to_string().color(colors::ACCENT)));
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(loans)
}

fn print_loan_tree(idx: usize, r: &Reservation) {
    let title = format!("{} ({})", r.book_title, r.id.map(|id| id.to_string()).unwrap_or_default());
    print::tree_head(idx, &title);

    let status = match r.status {
        ReservationStatus::Active => r.status.to_string().normal(),
        ReservationStatus::Returned => r.status.to_string().green(),
        ReservationStatus::Overdue => r.status.to_string().red().bold(),
    };
    let returned = r.actual_return_date.map(|d| d.to_string()).unwrap_or_default();

    let details: Vec<Detail> = vec![
        ("Borrower".to_string(), r.user_id.to_string().normal()),
        ("Due".to_string(), r.expected_return_date.to_string().color(colors::DATE)),
        ("Returned".to_string(), returned.color(colors::DATE)),
        ("Status".to_string(), status),
        ("Fee".to_string(), r.total_fee.to_string().color(colors::MONEY)),
        ("Late fee".to_string(), r.late_fee.to_string().color(colors::MONEY)),
    ];
    print::as_tree_one_level(details);
}

fn print_summary(service: &ReservationService, books: &InMemoryBookRepository, total_time: Duration) -> anyhow::Result<()> {
    let all = service.get_all_reservations()?;
    let overdue = all.iter().filter(|r| r.status == ReservationStatus::Overdue).count();
    let late_fees: rust_decimal::Decimal = all.iter().map(|r| r.late_fee).sum();

    let returned: ColoredString = format!("{} loans closed", all.len()).bold().green();
    let late: ColoredString = format!("{overdue} late").bold().red();
    let fees: ColoredString = format!("{late_fees} in late fees").bold().yellow();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold();
    let output: &ColoredString = &format!("{returned}, {late}, {fees} in {total_time}").color(colors::TEXT_DEFAULT);

    print::fat_separator();
    print::centerln(output);
    print::aligned_line("On the shelf", shelf(books)?.to_string());
    Ok(())
}

fn shelf(books: &InMemoryBookRepository) -> anyhow::Result<u32> {
    let book = books
        .find_book_by_external_id(SIM_BOOK)?
        .ok_or(ReservationError::BookNotFound(SIM_BOOK))?;
    Ok(book.available_quantity())
}
