use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rail_catalog::{CoachType, Fare, Train};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::validate_name;
use crate::BookingResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Passenger {
    pub name: String,
    /// Kept signed so that nonsense input still reaches the ledger's age check
    pub age: i32,
}

impl Passenger {
    pub fn new(name: &str, age: i32) -> BookingResult<Self> {
        validate_name(name)?;
        Ok(Self {
            name: name.trim().to_string(),
            age,
        })
    }
}

/// Journey shared by every passenger of a party
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trip {
    pub date: NaiveDate,
    pub origin: String,
    pub destination: String,
    pub train_number: u32,
    pub train_name: String,
    pub departure: NaiveTime,
    pub coach_type: CoachType,
    pub unit_price: i64,
}

impl Trip {
    pub fn new(
        date: NaiveDate,
        origin: &str,
        destination: &str,
        train: &Train,
        departure: NaiveTime,
        coach_type: CoachType,
    ) -> Self {
        Self {
            date,
            origin: origin.trim().to_string(),
            destination: destination.trim().to_string(),
            train_number: train.number,
            train_name: train.name.clone(),
            departure,
            coach_type,
            unit_price: train.coach_price,
        }
    }
}

/// One passenger's request for seats on a trip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingRequest {
    pub passenger: Passenger,
    pub trip: Trip,
    pub seats: u32,
    /// Raw label as typed; the ledger decides whether it is recognized
    pub payment_method: String,
}

impl BookingRequest {
    pub fn new(
        passenger: Passenger,
        trip: Trip,
        seats: u32,
        payment_method: impl Into<String>,
    ) -> Self {
        Self {
            passenger,
            trip,
            seats,
            payment_method: payment_method.into(),
        }
    }

    pub fn unit_price(&self) -> i64 {
        self.trip.unit_price
    }
}

/// Confirmation of a successful booking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingReceipt {
    pub booking_id: Uuid,
    pub passenger: Passenger,
    pub trip: Trip,
    pub seats: u32,
    pub fare: Fare,
    /// Seats left in the pool right after this booking
    pub remaining_seats: u32,
    pub booked_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rail_catalog::TrainCatalog;

    #[test]
    fn test_passenger_name_is_validated_and_trimmed() {
        let passenger = Passenger::new("  Anu Joseph ", 34).unwrap();
        assert_eq!(passenger.name, "Anu Joseph");
        assert!(Passenger::new("R2D2", 30).is_err());
    }

    #[test]
    fn test_trip_takes_price_from_train() {
        let catalog = TrainCatalog::default();
        let train = catalog.find(16526).unwrap();
        let trip = Trip::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            " KOCHI",
            "BANGALORE ",
            train,
            train.departures[0],
            CoachType::TwoAc,
        );

        assert_eq!(trip.train_name, "Kochvl-Mysore Express");
        assert_eq!(trip.origin, "KOCHI");
        assert_eq!(trip.destination, "BANGALORE");

        let request = BookingRequest::new(Passenger::new("Anu", 20).unwrap(), trip, 1, "PhonePe");
        assert_eq!(request.unit_price(), 1800);
    }
}
