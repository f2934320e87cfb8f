//! Database Models

// Serde helpers
pub mod serde_helpers;

// Auth
pub mod user;

// Booking domain
pub mod reservation;
pub mod restaurant_table;

// Re-exports
pub use reservation::{Reservation, ReservationCreate, ReservationStatus};
pub use restaurant_table::{
    RestaurantTable, RestaurantTableCreate, RestaurantTableUpdate, TableStatus,
};
pub use user::{User, UserCreate, UserRole};
