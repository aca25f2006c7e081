pub mod models;
pub mod validation;
pub mod ledger;
pub mod receipt;

pub use models::{BookingReceipt, BookingRequest, Passenger, Trip};
pub use validation::{validate_name, TravelWindow};
pub use ledger::BookingLedger;
pub use receipt::PartySummary;

use chrono::NaiveDate;
use rail_catalog::{FareError, InventoryError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("Not enough seats available: requested {requested}, available {available}")]
    InsufficientSeats { requested: u32, available: u32 },

    #[error("Please enter a valid age (between 1 and 100), got {0}")]
    InvalidAge(i32),

    #[error("Invalid payment method selected: '{0}'")]
    InvalidPaymentMethod(String),

    #[error("Invalid fare input: {0}")]
    InvalidFareInput(String),

    #[error("Name should not be empty or contain numbers")]
    InvalidName,

    #[error("Invalid date '{0}', expected DD/MM/YYYY")]
    InvalidDateFormat(String),

    #[error("Invalid date {date}. Please enter a date between {start} and {end}")]
    DateOutOfRange {
        date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Booking ledger is unavailable")]
    LedgerUnavailable,
}

impl From<InventoryError> for BookingError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::InsufficientSeats { requested, available } => {
                BookingError::InsufficientSeats { requested, available }
            }
        }
    }
}

impl From<FareError> for BookingError {
    fn from(err: FareError) -> Self {
        match err {
            FareError::InvalidPaymentMethod(method) => BookingError::InvalidPaymentMethod(method),
            FareError::InvalidFareInput(reason) => BookingError::InvalidFareInput(reason),
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
