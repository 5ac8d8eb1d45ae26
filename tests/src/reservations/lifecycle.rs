use chrono::{Days, Local};
use lending_common::models::reservation::{ReservationId, ReservationStatus};
use lending_common::ReservationError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::support::{date, Library, BOOK, USER, USER_TWO};

#[test]
fn create_reservation_prices_and_takes_a_copy() {
    let lib = Library::new(10, 5, 1);
    let today = Local::now().date_naive();

    let r = lib.service.create_reservation(USER, BOOK, 7, today).unwrap();

    assert_eq!(r.user_id, USER);
    assert_eq!(r.book_title, "The Lord of the Rings");
    assert_eq!(r.daily_rate, dec!(15.99));
    assert_eq!(r.total_fee, dec!(111.93));
    assert_eq!(r.status, ReservationStatus::Active);
    assert_eq!(r.expected_return_date, today + Days::new(7));
    assert_eq!(r.actual_return_date, None);
    assert_eq!(lib.available(), 4);
}

#[test]
fn create_reservation_out_of_stock_leaves_availability() {
    let lib = Library::new(10, 0, 1);

    let err = lib
        .service
        .create_reservation(USER, BOOK, 7, date(2024, 9, 1))
        .unwrap_err();

    assert!(err.to_string().contains("El libro está agotado"));
    assert_eq!(lib.available(), 0);
    assert!(lib.service.get_all_reservations().unwrap().is_empty());
}

#[test]
fn return_on_time_is_returned_and_restocks() {
    let lib = Library::new(10, 5, 1);
    let start = date(2024, 9, 1);
    let r = lib.service.create_reservation(USER, BOOK, 5, start).unwrap();
    assert_eq!(lib.available(), 4);

    let closed = lib
        .service
        .return_book(r.id.unwrap(), r.expected_return_date)
        .unwrap();

    assert_eq!(closed.status, ReservationStatus::Returned);
    assert_eq!(closed.late_fee, Decimal::ZERO);
    assert_eq!(lib.available(), 5);
}

#[test]
fn return_three_days_late_is_overdue_with_fee() {
    let lib = Library::new(10, 5, 1);
    let expected = date(2024, 9, 8);
    let r = lib
        .service
        .create_reservation(USER, BOOK, 7, date(2024, 9, 1))
        .unwrap();
    assert_eq!(r.expected_return_date, expected);

    let closed = lib
        .service
        .return_book(r.id.unwrap(), expected + Days::new(3))
        .unwrap();

    assert_eq!(closed.status, ReservationStatus::Overdue);
    assert_eq!(closed.late_fee, dec!(7.20));
    assert_eq!(lib.available(), 5);
}

#[test]
fn returning_a_closed_reservation_changes_nothing() {
    let lib = Library::new(10, 5, 1);
    let r = lib
        .service
        .create_reservation(USER, BOOK, 7, date(2024, 9, 1))
        .unwrap();
    let id = r.id.unwrap();
    let closed = lib.service.return_book(id, date(2024, 9, 20)).unwrap();
    assert_eq!(closed.status, ReservationStatus::Overdue);

    let err = lib.service.return_book(id, date(2024, 9, 2)).unwrap_err();

    assert_eq!(
        err,
        ReservationError::InvalidState {
            id,
            status: ReservationStatus::Overdue
        }
    );
    assert_eq!(lib.service.get_reservation_by_id(id).unwrap(), closed);
    assert_eq!(lib.available(), 5);
}

#[test]
fn release_at_full_stock_is_clamped() {
    let lib = Library::new(3, 3, 1);
    let r = lib
        .service
        .create_reservation(USER, BOOK, 2, date(2024, 9, 1))
        .unwrap();

    // Someone restocked the shelf behind the ledger's back.
    lib.books.insert(lib.book().with_available(3));

    lib.service.return_book(r.id.unwrap(), date(2024, 9, 2)).unwrap();
    assert_eq!(lib.available(), 3);
}

#[test]
fn queries_read_through() {
    let lib = Library::new(10, 10, 2);
    let start = date(2024, 9, 1);
    let a = lib.service.create_reservation(USER, BOOK, 3, start).unwrap();
    lib.service.create_reservation(USER, BOOK, 14, start).unwrap();
    lib.service
        .create_reservation(USER_TWO, BOOK, 3, start)
        .unwrap();
    lib.service.return_book(a.id.unwrap(), date(2024, 9, 3)).unwrap();

    assert_eq!(lib.service.get_reservation_by_id(a.id.unwrap()).unwrap().status, ReservationStatus::Returned);
    assert_eq!(lib.service.get_reservations_by_user_id(USER).unwrap().len(), 2);
    assert_eq!(lib.service.get_active_reservations().unwrap().len(), 2);

    let overdue = lib.service.get_overdue_reservations(date(2024, 9, 10)).unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].user_id, USER_TWO);

    assert_eq!(
        lib.service.get_reservation_by_id(ReservationId(99)),
        Err(ReservationError::ReservationNotFound(ReservationId(99)))
    );
}
