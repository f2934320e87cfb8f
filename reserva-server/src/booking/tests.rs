use std::sync::Arc;

use chrono::{TimeZone, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::*;
use crate::db::DbService;
use crate::db::models::{
    ReservationCreate, ReservationStatus, RestaurantTableCreate, TableStatus, UserCreate, UserRole,
};
use crate::db::repository::{RestaurantTableRepository, UserRepository};

const DINER: &str = "diner@example.com";

async fn create_test_engine() -> (BookingEngine, Surreal<Db>) {
    let db = DbService::memory().await.unwrap().db;
    (BookingEngine::new(db.clone()), db)
}

async fn seed_table(db: &Surreal<Db>, number: i32, capacity: i32, status: TableStatus) {
    RestaurantTableRepository::new(db.clone())
        .create(RestaurantTableCreate {
            number,
            capacity,
            status,
        })
        .await
        .unwrap();
}

async fn seed_user(db: &Surreal<Db>, email: &str) {
    UserRepository::new(db.clone())
        .create(UserCreate {
            name: "Test Diner".to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
            role: UserRole::User,
        })
        .await
        .unwrap();
}

async fn table_status(db: &Surreal<Db>, number: i32) -> TableStatus {
    RestaurantTableRepository::new(db.clone())
        .find_by_number(number)
        .await
        .unwrap()
        .unwrap()
        .status
}

fn booking(table_number: i32, party_size: i32) -> ReservationCreate {
    ReservationCreate {
        table_number,
        reserved_at: Utc.with_ymd_and_hms(2026, 3, 14, 20, 0, 0).unwrap(),
        party_size,
    }
}

#[tokio::test]
async fn booking_marks_the_table_unavailable() {
    let (engine, db) = create_test_engine().await;
    seed_table(&db, 1, 4, TableStatus::Available).await;
    seed_user(&db, DINER).await;

    let reservation = engine.create_reservation(booking(1, 2), DINER).await.unwrap();

    assert_eq!(reservation.status, ReservationStatus::Active);
    assert_eq!(reservation.party_size, 2);
    assert_eq!(table_status(&db, 1).await, TableStatus::Unavailable);
}

#[tokio::test]
async fn unknown_table_is_rejected() {
    let (engine, db) = create_test_engine().await;
    seed_user(&db, DINER).await;

    let err = engine.create_reservation(booking(42, 2), DINER).await.unwrap_err();
    assert!(matches!(err, BookingError::TableNotFound));
}

#[tokio::test]
async fn party_size_above_capacity_is_invalid_whatever_the_table_status() {
    let (engine, db) = create_test_engine().await;
    seed_table(&db, 1, 2, TableStatus::Available).await;
    seed_table(&db, 2, 2, TableStatus::Unavailable).await;
    seed_table(&db, 3, 2, TableStatus::Inactive).await;
    seed_user(&db, DINER).await;

    for number in [1, 2, 3] {
        let err = engine
            .create_reservation(booking(number, 3), DINER)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::PartySizeExceeded));
    }
}

#[tokio::test]
async fn zero_party_size_is_invalid() {
    let (engine, db) = create_test_engine().await;
    seed_table(&db, 1, 4, TableStatus::Available).await;
    seed_user(&db, DINER).await;

    let err = engine.create_reservation(booking(1, 0), DINER).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidPartySize));
}

#[tokio::test]
async fn unavailable_table_conflicts_and_creates_nothing() {
    let (engine, db) = create_test_engine().await;
    seed_table(&db, 1, 4, TableStatus::Unavailable).await;
    seed_user(&db, DINER).await;

    let err = engine.create_reservation(booking(1, 2), DINER).await.unwrap_err();
    assert!(matches!(err, BookingError::TableUnavailable));
    assert!(engine.list_reservations(DINER).await.unwrap().is_empty());
}

#[tokio::test]
async fn inactive_table_conflicts() {
    let (engine, db) = create_test_engine().await;
    seed_table(&db, 1, 4, TableStatus::Inactive).await;
    seed_user(&db, DINER).await;

    let err = engine.create_reservation(booking(1, 2), DINER).await.unwrap_err();
    assert!(matches!(err, BookingError::TableUnavailable));
}

#[tokio::test]
async fn unresolved_caller_leaves_the_table_available() {
    let (engine, db) = create_test_engine().await;
    seed_table(&db, 1, 4, TableStatus::Available).await;

    let err = engine
        .create_reservation(booking(1, 2), "ghost@example.com")
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::UserNotFound));
    assert_eq!(table_status(&db, 1).await, TableStatus::Available);
}

#[tokio::test]
async fn cancel_unknown_reservation_mutates_no_table() {
    let (engine, db) = create_test_engine().await;
    seed_table(&db, 1, 4, TableStatus::Unavailable).await;

    let err = engine
        .cancel_reservation("reservation:missing")
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::ReservationNotFound));
    assert_eq!(table_status(&db, 1).await, TableStatus::Unavailable);
}

#[tokio::test]
async fn cancel_with_malformed_id_is_not_found() {
    let (engine, _db) = create_test_engine().await;

    let err = engine.cancel_reservation("not a record id").await.unwrap_err();
    assert!(matches!(err, BookingError::ReservationNotFound));
}

#[tokio::test]
async fn book_then_cancel_round_trip() {
    let (engine, db) = create_test_engine().await;
    seed_table(&db, 1, 4, TableStatus::Available).await;
    seed_user(&db, DINER).await;

    let reservation = engine.create_reservation(booking(1, 2), DINER).await.unwrap();
    let id = reservation.id.unwrap().to_string();

    let cancelled = engine.cancel_reservation(&id).await.unwrap();

    assert_eq!(cancelled.status, ReservationStatus::Canceled);
    assert_eq!(table_status(&db, 1).await, TableStatus::Available);
}

#[tokio::test]
async fn double_cancel_does_not_free_a_reclaimed_table() {
    let (engine, db) = create_test_engine().await;
    seed_table(&db, 1, 4, TableStatus::Available).await;
    seed_user(&db, DINER).await;
    seed_user(&db, "second@example.com").await;

    let first = engine.create_reservation(booking(1, 2), DINER).await.unwrap();
    let first_id = first.id.unwrap().to_string();
    engine.cancel_reservation(&first_id).await.unwrap();

    // Another diner claims the freed table
    engine
        .create_reservation(booking(1, 2), "second@example.com")
        .await
        .unwrap();

    let err = engine.cancel_reservation(&first_id).await.unwrap_err();
    assert!(matches!(err, BookingError::AlreadyCancelled));
    assert_eq!(table_status(&db, 1).await, TableStatus::Unavailable);
}

#[tokio::test]
async fn single_seating_scenario() {
    let (engine, db) = create_test_engine().await;
    seed_table(&db, 5, 4, TableStatus::Available).await;
    seed_user(&db, DINER).await;
    seed_user(&db, "second@example.com").await;

    let first = engine.create_reservation(booking(5, 4), DINER).await.unwrap();
    assert_eq!(first.status, ReservationStatus::Active);
    assert_eq!(table_status(&db, 5).await, TableStatus::Unavailable);

    // A second booking at a different time still conflicts
    let err = engine
        .create_reservation(booking(5, 1), "second@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::TableUnavailable));

    engine
        .cancel_reservation(&first.id.unwrap().to_string())
        .await
        .unwrap();
    assert_eq!(table_status(&db, 5).await, TableStatus::Available);
}

#[tokio::test]
async fn concurrent_bookings_yield_exactly_one_winner() {
    let (engine, db) = create_test_engine().await;
    seed_table(&db, 7, 6, TableStatus::Available).await;
    seed_user(&db, DINER).await;
    let engine = Arc::new(engine);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            engine.create_reservation(booking(7, 2), DINER).await
        }));
    }

    let results = futures::future::join_all(handles).await;
    let mut winners = 0;
    for result in results {
        match result.unwrap() {
            Ok(reservation) => {
                winners += 1;
                assert_eq!(reservation.status, ReservationStatus::Active);
            }
            Err(err) => assert!(matches!(err, BookingError::TableUnavailable)),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(table_status(&db, 7).await, TableStatus::Unavailable);
    assert_eq!(engine.list_reservations(DINER).await.unwrap().len(), 1);
}

#[tokio::test]
async fn list_returns_only_the_callers_reservations() {
    let (engine, db) = create_test_engine().await;
    seed_table(&db, 1, 4, TableStatus::Available).await;
    seed_table(&db, 2, 4, TableStatus::Available).await;
    seed_user(&db, DINER).await;
    seed_user(&db, "second@example.com").await;

    engine.create_reservation(booking(1, 2), DINER).await.unwrap();
    engine
        .create_reservation(booking(2, 2), "second@example.com")
        .await
        .unwrap();

    let mine = engine.list_reservations(DINER).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].party_size, 2);

    // Cancelled reservations stay in the listing
    engine
        .cancel_reservation(&mine[0].id.clone().unwrap().to_string())
        .await
        .unwrap();
    let mine = engine.list_reservations(DINER).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].status, ReservationStatus::Canceled);
}

#[tokio::test]
async fn listing_for_an_unknown_user_is_rejected() {
    let (engine, _db) = create_test_engine().await;

    let err = engine.list_reservations("ghost@example.com").await.unwrap_err();
    assert!(matches!(err, BookingError::UserNotFound));
}
