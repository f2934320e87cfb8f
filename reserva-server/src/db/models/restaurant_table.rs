//! Restaurant Table Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Table availability status
///
/// `Unavailable` is owned by the booking engine (an active reservation
/// holds the table); `Inactive` is an operator-side switch for tables
/// taken out of service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    Available,
    Unavailable,
    Inactive,
}

/// Restaurant table entity (桌台)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantTable {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Table number, unique across all tables
    pub number: i32,
    pub capacity: i32,
    pub status: TableStatus,
}

/// Create table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantTableCreate {
    pub number: i32,
    pub capacity: i32,
    pub status: TableStatus,
}

/// Update table payload; absent fields are left untouched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantTableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TableStatus>,
}
