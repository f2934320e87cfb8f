//! Reservation Model (预订)

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Reservation status enum
///
/// The only transition is ACTIVE → CANCELED, performed exactly once by
/// the booking engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Active,
    Canceled,
}

/// Reservation entity
///
/// Holds non-owning references to its table and user; navigation is an
/// explicit repository lookup, never an embedded record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Referenced table
    #[serde(with = "serde_helpers::record_id")]
    pub table_id: RecordId,
    /// Owning user
    #[serde(with = "serde_helpers::record_id")]
    pub user_id: RecordId,
    pub reserved_at: DateTime<Utc>,
    pub party_size: i32,
    pub status: ReservationStatus,
}

/// Booking request payload, resolved against the stores by the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub table_number: i32,
    pub reserved_at: DateTime<Utc>,
    pub party_size: i32,
}
