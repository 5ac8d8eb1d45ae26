use std::sync::Arc;

use lending_common::models::user::UserId;
use lending_common::ReservationError;
use rayon::prelude::*;

use crate::support::{date, Library, BOOK};

const BORROWERS: u64 = 32;

#[test]
fn parallel_checkouts_of_the_last_copy_have_one_winner() {
    let lib = Library::new(4, 1, BORROWERS);
    let start = date(2024, 9, 1);

    let outcomes: Vec<_> = (1..=BORROWERS)
        .into_par_iter()
        .map(|user| lib.service.create_reservation(UserId(user), BOOK, 7, start))
        .collect();

    let wins = outcomes.iter().filter(|o| o.is_ok()).count();
    let out_of_stock = outcomes
        .iter()
        .filter(|o| matches!(o, Err(ReservationError::OutOfStock)))
        .count();

    assert_eq!(wins, 1);
    assert_eq!(out_of_stock, BORROWERS as usize - 1);
    assert_eq!(lib.available(), 0);
}

#[test]
fn parallel_checkouts_never_oversell() {
    let lib = Library::new(5, 5, BORROWERS);
    let start = date(2024, 9, 1);

    let wins = (1..=BORROWERS)
        .into_par_iter()
        .filter(|user| lib.service.create_reservation(UserId(*user), BOOK, 3, start).is_ok())
        .count();

    assert_eq!(wins, 5);
    assert_eq!(lib.available(), 0);
    assert_eq!(lib.service.get_active_reservations().unwrap().len(), 5);
}

#[test]
fn parallel_returns_of_one_loan_release_once() {
    let lib = Library::new(3, 3, 1);
    let r = lib
        .service
        .create_reservation(UserId(1), BOOK, 7, date(2024, 9, 1))
        .unwrap();
    let id = r.id.unwrap();

    // Another copy goes out so a double release would be visible.
    lib.service
        .create_reservation(UserId(1), BOOK, 7, date(2024, 9, 1))
        .unwrap();
    assert_eq!(lib.available(), 1);

    let wins = (0..16)
        .into_par_iter()
        .filter(|_| lib.service.return_book(id, date(2024, 9, 3)).is_ok())
        .count();

    assert_eq!(wins, 1);
    assert_eq!(lib.available(), 2);
}

#[tokio::test]
async fn blocking_pool_checkouts_of_the_last_copy_have_one_winner() {
    let lib = Arc::new(Library::new(1, 1, BORROWERS));
    let start = date(2024, 9, 1);

    let mut handles = Vec::new();
    for user in 1..=BORROWERS {
        let lib = lib.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            lib.service.create_reservation(UserId(user), BOOK, 7, start)
        }));
    }

    let mut wins = 0;
    let mut out_of_stock = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => wins += 1,
            Err(ReservationError::OutOfStock) => out_of_stock += 1,
            Err(e) => panic!("unexpected failure: {e}"),
        }
    }

    assert_eq!(wins, 1);
    assert_eq!(out_of_stock, BORROWERS - 1);
    assert_eq!(lib.available(), 0);
}
