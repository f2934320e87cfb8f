use crate::db::repository::RepoError;
use crate::utils::AppError;
use thiserror::Error;

/// Booking engine errors
///
/// Every failure is deterministic and leaves no partial state behind;
/// each variant carries the stable reason the caller is told.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Table does not exist")]
    TableNotFound,

    #[error("Table is unavailable")]
    TableUnavailable,

    #[error("Party size must be at least 1")]
    InvalidPartySize,

    #[error("Party size exceeds table capacity")]
    PartySizeExceeded,

    #[error("User not found")]
    UserNotFound,

    #[error("Reservation not found")]
    ReservationNotFound,

    #[error("Reservation is already cancelled")]
    AlreadyCancelled,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<RepoError> for BookingError {
    fn from(err: RepoError) -> Self {
        BookingError::Database(err.to_string())
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let message = err.to_string();
        match err {
            BookingError::TableNotFound
            | BookingError::UserNotFound
            | BookingError::ReservationNotFound => AppError::not_found(message),
            BookingError::TableUnavailable | BookingError::AlreadyCancelled => {
                AppError::conflict(message)
            }
            BookingError::InvalidPartySize | BookingError::PartySizeExceeded => {
                AppError::validation(message)
            }
            BookingError::Database(_) => AppError::database(message),
        }
    }
}

/// Result type for booking engine operations
pub type BookingResult<T> = Result<T, BookingError>;
