use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rail_catalog::{FareCalculator, SeatInventory};
use rail_shared::{BookingRejectedEvent, Masked, SeatsBookedEvent};
use uuid::Uuid;

use crate::models::{BookingReceipt, BookingRequest};
use crate::{BookingError, BookingResult};

pub const MIN_AGE: i32 = 1;
pub const MAX_AGE: i32 = 100;

struct LedgerState {
    inventory: SeatInventory,
    receipts: Vec<BookingReceipt>,
}

/// Shared seat pool for one run.
///
/// Every booking runs check, price, decrement and receipt under a single
/// lock, so concurrent callers observe a serialized history: remaining
/// seats across receipts strictly decrease in admission order, and a
/// failed booking never touches the counter.
pub struct BookingLedger {
    state: Mutex<LedgerState>,
    fares: FareCalculator,
}

impl BookingLedger {
    pub fn new(capacity: u32, fares: FareCalculator) -> Self {
        Self {
            state: Mutex::new(LedgerState {
                inventory: SeatInventory::new(capacity),
                receipts: Vec::new(),
            }),
            fares,
        }
    }

    pub fn with_capacity(capacity: u32) -> Self {
        Self::new(capacity, FareCalculator::default())
    }

    /// Book seats for one passenger.
    ///
    /// Preconditions are checked in order and the first violation wins:
    /// 1. enough seats left (`InsufficientSeats`)
    /// 2. age within 1..=100 (`InvalidAge`)
    /// 3. recognized payment method (`InvalidPaymentMethod`)
    ///
    /// There is no retry; callers resubmit a corrected request.
    pub fn book_seats(&self, request: BookingRequest) -> BookingResult<BookingReceipt> {
        let passenger = Masked(request.passenger.name.clone());
        let train_number = request.trip.train_number;
        let seats_requested = request.seats;

        let outcome = {
            let mut state = self.lock()?;
            self.admit(&mut state, request)
        };

        match &outcome {
            Ok(receipt) => {
                let event = SeatsBookedEvent {
                    booking_id: receipt.booking_id,
                    passenger,
                    train_number,
                    seats: receipt.seats,
                    total_price: receipt.fare.total,
                    remaining_seats: receipt.remaining_seats,
                    booked_at: receipt.booked_at.timestamp(),
                };
                tracing::info!(
                    event = %serde_json::to_string(&event).unwrap_or_default(),
                    "Seats booked"
                );
            }
            Err(err) => {
                let event = BookingRejectedEvent {
                    passenger,
                    train_number,
                    seats_requested,
                    reason: err.to_string(),
                    rejected_at: Utc::now().timestamp(),
                };
                tracing::warn!(
                    event = %serde_json::to_string(&event).unwrap_or_default(),
                    "Booking rejected"
                );
            }
        }

        outcome
    }

    pub fn available_seats(&self) -> BookingResult<u32> {
        Ok(self.lock()?.inventory.available())
    }

    pub fn capacity(&self) -> BookingResult<u32> {
        Ok(self.lock()?.inventory.capacity())
    }

    pub fn utilization(&self) -> BookingResult<f64> {
        Ok(self.lock()?.inventory.utilization())
    }

    /// Snapshot of every successful booking, in admission order
    pub fn receipts(&self) -> BookingResult<Vec<BookingReceipt>> {
        Ok(self.lock()?.receipts.clone())
    }

    fn lock(&self) -> BookingResult<MutexGuard<'_, LedgerState>> {
        self.state.lock().map_err(|_| BookingError::LedgerUnavailable)
    }

    /// Critical section body. Nothing is mutated until every check and the
    /// fare computation have passed.
    fn admit(
        &self,
        state: &mut LedgerState,
        request: BookingRequest,
    ) -> BookingResult<BookingReceipt> {
        state.inventory.ensure_available(request.seats)?;

        let age = request.passenger.age;
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(BookingError::InvalidAge(age));
        }

        let fare = self.fares.compute_price(
            request.unit_price(),
            request.seats,
            &request.payment_method,
        )?;

        let remaining_seats = state.inventory.take(request.seats)?;

        let receipt = BookingReceipt {
            booking_id: Uuid::new_v4(),
            passenger: request.passenger,
            trip: request.trip,
            seats: request.seats,
            fare,
            remaining_seats,
            booked_at: Utc::now(),
        };
        state.receipts.push(receipt.clone());

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Passenger, Trip};
    use chrono::NaiveDate;
    use rail_catalog::{CoachType, TrainCatalog};
    use std::sync::Arc;

    fn trip() -> Trip {
        let catalog = TrainCatalog::default();
        let train = catalog.find(16525).unwrap();
        Trip::new(
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            "KOCHI",
            "BANGALORE",
            train,
            train.departures[0],
            CoachType::ThreeAc,
        )
    }

    fn request(age: i32, seats: u32, method: &str) -> BookingRequest {
        BookingRequest::new(Passenger::new("Devika", age).unwrap(), trip(), seats, method)
    }

    #[test]
    fn test_successful_booking() {
        let ledger = BookingLedger::with_capacity(1000);

        let receipt = ledger.book_seats(request(29, 3, "Google Pay")).unwrap();

        assert_eq!(receipt.fare.total, 5410);
        assert_eq!(receipt.fare.base, 5400);
        assert_eq!(receipt.remaining_seats, 997);
        assert_eq!(ledger.available_seats().unwrap(), 997);
        assert_eq!(receipt.passenger.name, "Devika");
        assert_eq!(receipt.trip.train_name, "Kanyakumari Cape Express");
        assert_eq!(ledger.receipts().unwrap(), vec![receipt]);
    }

    #[test]
    fn test_insufficient_seats_leaves_pool_untouched() {
        let ledger = BookingLedger::with_capacity(2);

        let err = ledger.book_seats(request(29, 3, "PhonePe")).unwrap_err();

        assert_eq!(err, BookingError::InsufficientSeats { requested: 3, available: 2 });
        assert_eq!(ledger.available_seats().unwrap(), 2);
        assert!(ledger.receipts().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_age() {
        let ledger = BookingLedger::with_capacity(10);

        for age in [0, -4, 101, 250] {
            assert_eq!(
                ledger.book_seats(request(age, 1, "PhonePe")).unwrap_err(),
                BookingError::InvalidAge(age)
            );
        }
        assert!(ledger.book_seats(request(1, 1, "PhonePe")).is_ok());
        assert!(ledger.book_seats(request(100, 1, "PhonePe")).is_ok());
        assert_eq!(ledger.available_seats().unwrap(), 8);
    }

    #[test]
    fn test_invalid_payment_method() {
        let ledger = BookingLedger::with_capacity(10);

        let err = ledger.book_seats(request(40, 1, "Cash")).unwrap_err();

        assert_eq!(err, BookingError::InvalidPaymentMethod("Cash".to_string()));
        assert_eq!(ledger.available_seats().unwrap(), 10);
    }

    #[test]
    fn test_first_violated_precondition_wins() {
        let ledger = BookingLedger::with_capacity(1);

        // Too many seats, bad age and bad method: capacity is reported
        assert!(matches!(
            ledger.book_seats(request(0, 5, "Cash")),
            Err(BookingError::InsufficientSeats { .. })
        ));
        // Bad age and bad method: age is reported
        assert_eq!(
            ledger.book_seats(request(0, 1, "Cash")).unwrap_err(),
            BookingError::InvalidAge(0)
        );
    }

    #[test]
    fn test_zero_seats_is_invalid_fare_input() {
        let ledger = BookingLedger::with_capacity(5);
        assert!(matches!(
            ledger.book_seats(request(30, 0, "PhonePe")),
            Err(BookingError::InvalidFareInput(_))
        ));
        assert_eq!(ledger.available_seats().unwrap(), 5);
    }

    #[test]
    fn test_failure_is_idempotent() {
        let ledger = BookingLedger::with_capacity(2);

        let first = ledger.book_seats(request(30, 3, "PhonePe")).unwrap_err();
        let second = ledger.book_seats(request(30, 3, "PhonePe")).unwrap_err();

        assert_eq!(first, second);
        assert_eq!(ledger.available_seats().unwrap(), 2);
    }

    #[test]
    fn test_pool_can_be_drained_exactly() {
        let ledger = BookingLedger::with_capacity(3);
        assert_eq!(ledger.book_seats(request(30, 3, "Amazon Pay")).unwrap().remaining_seats, 0);
        assert_eq!(ledger.utilization().unwrap(), 1.0);
        assert!(matches!(
            ledger.book_seats(request(30, 1, "Amazon Pay")),
            Err(BookingError::InsufficientSeats { requested: 1, available: 0 })
        ));
    }

    #[test]
    fn test_concurrent_bookings_fill_pool_exactly() {
        const SEATS: u32 = 64;
        let ledger = BookingLedger::with_capacity(SEATS);

        let results: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..SEATS)
                .map(|_| s.spawn(|| ledger.book_seats(request(30, 1, "PhonePe"))))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), SEATS as usize);
        assert_eq!(ledger.available_seats().unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_one_extra_concurrent_booking_is_rejected() {
        const SEATS: u32 = 50;
        let ledger = Arc::new(BookingLedger::with_capacity(SEATS));

        let tasks: Vec<_> = (0..=SEATS)
            .map(|_| {
                let ledger = ledger.clone();
                tokio::spawn(async move { ledger.book_seats(request(30, 1, "Google Pay")) })
            })
            .collect();

        let mut successes = 0;
        let mut rejected = Vec::new();
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => successes += 1,
                Err(err) => rejected.push(err),
            }
        }

        assert_eq!(successes, SEATS);
        assert_eq!(rejected, vec![BookingError::InsufficientSeats { requested: 1, available: 0 }]);
        assert_eq!(ledger.available_seats().unwrap(), 0);

        // Admission order is a strictly decreasing run of remaining seats
        let remaining: Vec<u32> = ledger
            .receipts()
            .unwrap()
            .iter()
            .map(|r| r.remaining_seats)
            .collect();
        let expected: Vec<u32> = (0..SEATS).rev().collect();
        assert_eq!(remaining, expected);
    }
}
