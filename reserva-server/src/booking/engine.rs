//! BookingEngine - reservation creation and cancellation
//!
//! # Operation Flow
//!
//! ```text
//! create_reservation(data, caller)
//!     ├─ 1. Resolve table by number
//!     ├─ 2. Validate party size against capacity
//!     ├─ 3. Reject UNAVAILABLE / INACTIVE tables
//!     ├─ 4. Resolve caller identity against the user store
//!     ├─ 5. Transaction: table → UNAVAILABLE, create ACTIVE reservation
//!     └─ 6. Return the created reservation
//!
//! cancel_reservation(id)
//!     ├─ 1. Resolve reservation, reject if already CANCELED
//!     ├─ 2. Transaction: table → AVAILABLE, reservation → CANCELED
//!     └─ 3. Return the updated reservation
//! ```
//!
//! All writes run under a single engine mutex, so two concurrent
//! bookings for the same table cannot both observe AVAILABLE. The
//! identity lookup happens before any mutation: a stale token never
//! leaves a table incorrectly marked UNAVAILABLE.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;

use super::{BookingError, BookingResult};
use crate::db::models::{
    Reservation, ReservationCreate, ReservationStatus, TableStatus,
};
use crate::db::repository::{
    ReservationRepository, RestaurantTableRepository, UserRepository,
};

/// 预订状态机：桌台占用与预订记录必须在同一事务内一起变化
const BOOK_TABLE_TXN: &str = "
    BEGIN TRANSACTION;
    UPDATE $table SET status = $table_status;
    CREATE reservation CONTENT {
        table_id: $table,
        user_id: $user,
        reserved_at: $reserved_at,
        party_size: $party_size,
        status: $reservation_status
    };
    COMMIT TRANSACTION;
";

const CANCEL_RESERVATION_TXN: &str = "
    BEGIN TRANSACTION;
    UPDATE $table SET status = $table_status;
    UPDATE $reservation SET status = $reservation_status;
    COMMIT TRANSACTION;
";

/// Booking engine
///
/// A table supports at most one ACTIVE reservation at any time,
/// regardless of the requested date: the requested time is stored
/// but plays no part in conflict detection (single-seating model).
pub struct BookingEngine {
    db: Surreal<Db>,
    tables: RestaurantTableRepository,
    reservations: ReservationRepository,
    users: UserRepository,
    /// Serializes all booking state transitions. The database is
    /// embedded and single-process, so this is the row lock required
    /// for the check-then-write sequence below.
    write_lock: Mutex<()>,
}

impl BookingEngine {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            tables: RestaurantTableRepository::new(db.clone()),
            reservations: ReservationRepository::new(db.clone()),
            users: UserRepository::new(db.clone()),
            write_lock: Mutex::new(()),
            db,
        }
    }

    /// Book a table for the caller
    ///
    /// On success the table is UNAVAILABLE and the returned reservation
    /// is ACTIVE; on any failure neither store is touched.
    pub async fn create_reservation(
        &self,
        data: ReservationCreate,
        caller_email: &str,
    ) -> BookingResult<Reservation> {
        let _guard = self.write_lock.lock().await;

        let table = self
            .tables
            .find_by_number(data.table_number)
            .await?
            .ok_or(BookingError::TableNotFound)?;

        // Party size is validated before availability: an oversized
        // request is invalid input whatever the table status.
        if data.party_size < 1 {
            return Err(BookingError::InvalidPartySize);
        }
        if data.party_size > table.capacity {
            return Err(BookingError::PartySizeExceeded);
        }
        if matches!(table.status, TableStatus::Unavailable | TableStatus::Inactive) {
            return Err(BookingError::TableUnavailable);
        }

        let user = self
            .users
            .find_by_email(caller_email)
            .await?
            .ok_or(BookingError::UserNotFound)?;

        let table_id = table
            .id
            .ok_or_else(|| BookingError::Database("table record has no id".to_string()))?;
        let user_id = user
            .id
            .ok_or_else(|| BookingError::Database("user record has no id".to_string()))?;

        let mut response = self
            .db
            .query(BOOK_TABLE_TXN)
            .bind(("table", table_id))
            .bind(("table_status", TableStatus::Unavailable))
            .bind(("user", user_id))
            .bind(("reserved_at", data.reserved_at))
            .bind(("party_size", data.party_size))
            .bind(("reservation_status", ReservationStatus::Active))
            .await
            .map_err(|e| BookingError::Database(e.to_string()))?;

        let created: Vec<Reservation> = response
            .take(1)
            .map_err(|e| BookingError::Database(e.to_string()))?;
        let reservation = created
            .into_iter()
            .next()
            .ok_or_else(|| BookingError::Database("reservation was not persisted".to_string()))?;

        tracing::info!(
            table_number = data.table_number,
            party_size = data.party_size,
            user = %caller_email,
            "Table booked"
        );

        Ok(reservation)
    }

    /// All reservations owned by the caller, any status
    pub async fn list_reservations(&self, caller_email: &str) -> BookingResult<Vec<Reservation>> {
        let user = self
            .users
            .find_by_email(caller_email)
            .await?
            .ok_or(BookingError::UserNotFound)?;
        let user_id = user
            .id
            .ok_or_else(|| BookingError::Database("user record has no id".to_string()))?;

        Ok(self.reservations.find_all_by_user(&user_id).await?)
    }

    /// Cancel a reservation and free its table
    ///
    /// Cancelling twice is rejected: re-freeing the table would clobber
    /// a booking that claimed it after the first cancellation.
    pub async fn cancel_reservation(&self, id: &str) -> BookingResult<Reservation> {
        let _guard = self.write_lock.lock().await;

        let reservation = self
            .reservations
            .find_by_id(id)
            .await
            .map_err(|e| match e {
                // An unparsable id cannot reference any reservation
                crate::db::repository::RepoError::Validation(_) => {
                    BookingError::ReservationNotFound
                }
                other => BookingError::from(other),
            })?
            .ok_or(BookingError::ReservationNotFound)?;

        if reservation.status == ReservationStatus::Canceled {
            return Err(BookingError::AlreadyCancelled);
        }

        let reservation_id = reservation
            .id
            .ok_or_else(|| BookingError::Database("reservation record has no id".to_string()))?;

        let mut response = self
            .db
            .query(CANCEL_RESERVATION_TXN)
            .bind(("table", reservation.table_id))
            .bind(("table_status", TableStatus::Available))
            .bind(("reservation", reservation_id))
            .bind(("reservation_status", ReservationStatus::Canceled))
            .await
            .map_err(|e| BookingError::Database(e.to_string()))?;

        let updated: Vec<Reservation> = response
            .take(1)
            .map_err(|e| BookingError::Database(e.to_string()))?;
        let reservation = updated
            .into_iter()
            .next()
            .ok_or_else(|| BookingError::Database("reservation was not updated".to_string()))?;

        tracing::info!(reservation = %id, "Reservation cancelled");

        Ok(reservation)
    }
}
