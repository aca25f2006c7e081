use std::fmt;

use chrono::NaiveTime;
use rail_catalog::CoachType;
use serde::Serialize;

use crate::models::BookingReceipt;
use crate::validation::DATE_FORMAT;

const RULE: &str = "+---------------------------------------------+";

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{}", RULE)?;
    writeln!(f, "|{:^45}|", title)?;
    writeln!(f, "{}", RULE)
}

fn row(f: &mut fmt::Formatter<'_>, label: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(f, "| {:<16}{}", label, value)
}

impl fmt::Display for BookingReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "Booking Details")?;
        row(f, "Name:", &self.passenger.name)?;
        row(f, "Age:", self.passenger.age)?;
        row(f, "Date:", self.trip.date.format(DATE_FORMAT))?;
        row(f, "From:", &self.trip.origin)?;
        row(f, "To:", &self.trip.destination)?;
        row(f, "Train:", &self.trip.train_name)?;
        row(f, "Coach Type:", self.trip.coach_type)?;
        row(f, "Seats:", self.seats)?;
        row(f, "Fare:", self.fare.base)?;
        row(f, "GST:", self.fare.surcharge)?;
        row(f, "Amount:", format_args!("{} {}", self.fare.total, self.fare.currency))?;
        row(f, "Payment Method:", self.fare.payment_method)?;
        writeln!(f, "| Successfully booked!")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Remaining Available Seats: {}", self.remaining_seats)?;
        write!(
            f,
            "You have successfully booked your {} from {} to {}.",
            self.trip.train_name, self.trip.origin, self.trip.destination
        )
    }
}

/// Trip-level totals for every passenger booked in one session.
/// The total is the sum of receipt totals, so each booking carries its own
/// surcharge.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PartySummary {
    pub train_name: String,
    pub origin: String,
    pub destination: String,
    pub departure: NaiveTime,
    pub coach_type: CoachType,
    pub passengers: usize,
    pub seats: u32,
    pub total_price: i64,
    pub currency: String,
}

impl PartySummary {
    /// `None` when nothing was booked
    pub fn from_receipts(receipts: &[BookingReceipt]) -> Option<Self> {
        let first = receipts.first()?;

        Some(Self {
            train_name: first.trip.train_name.clone(),
            origin: first.trip.origin.clone(),
            destination: first.trip.destination.clone(),
            departure: first.trip.departure,
            coach_type: first.trip.coach_type,
            passengers: receipts.len(),
            seats: receipts.iter().map(|r| r.seats).sum(),
            total_price: receipts.iter().map(|r| r.fare.total).sum(),
            currency: first.fare.currency.clone(),
        })
    }
}

impl fmt::Display for PartySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Amount to be Paid (incl. GST): {} {}", self.total_price, self.currency)?;
        writeln!(f)?;
        heading(f, "Train Details")?;
        row(f, "Train Name:", &self.train_name)?;
        row(f, "From:", &self.origin)?;
        row(f, "To:", &self.destination)?;
        row(f, "Time:", self.departure.format("%-H:%M"))?;
        row(f, "Coach Type:", self.coach_type)?;
        row(f, "Passengers:", self.passengers)?;
        row(f, "Seats:", self.seats)?;
        row(f, "Total Price:", format_args!("{} {} (incl. GST)", self.total_price, self.currency))?;
        write!(f, "{}", RULE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingRequest, Passenger, Trip};
    use crate::BookingLedger;
    use chrono::NaiveDate;
    use rail_catalog::TrainCatalog;

    fn book(ledger: &BookingLedger, name: &str, method: &str) -> BookingReceipt {
        let catalog = TrainCatalog::default();
        let train = catalog.find(12677).unwrap();
        let trip = Trip::new(
            NaiveDate::from_ymd_opt(2024, 8, 15).unwrap(),
            "KOCHI",
            "BANGALORE",
            train,
            train.departures[1],
            CoachType::General,
        );
        ledger
            .book_seats(BookingRequest::new(Passenger::new(name, 41).unwrap(), trip, 1, method))
            .unwrap()
    }

    #[test]
    fn test_receipt_rendering() {
        let ledger = BookingLedger::with_capacity(1000);
        let text = book(&ledger, "Joseph", "Amazon Pay").to_string();

        assert!(text.contains("|               Booking Details               |"));
        assert!(text.contains("| Name:           Joseph\n"));
        assert!(text.contains("| Date:           15/08/2024\n"));
        assert!(text.contains("| Train:          Ernakulam Intercity Express\n"));
        assert!(text.contains("| Amount:         1805 INR\n"));
        assert!(text.contains("| Payment Method: Amazon Pay\n"));
        assert!(text.contains("Remaining Available Seats: 999\n"));
        assert!(text.ends_with(
            "You have successfully booked your Ernakulam Intercity Express from KOCHI to BANGALORE."
        ));
    }

    #[test]
    fn test_party_summary_applies_surcharge_per_booking() {
        let ledger = BookingLedger::with_capacity(1000);
        let receipts = vec![
            book(&ledger, "Joseph", "Google Pay"),
            book(&ledger, "Mary", "Google Pay"),
        ];

        let summary = PartySummary::from_receipts(&receipts).unwrap();
        assert_eq!(summary.seats, 2);
        assert_eq!(summary.passengers, 2);
        assert_eq!(summary.total_price, 2 * (1800 + 10));

        let text = summary.to_string();
        assert!(text.starts_with("Total Amount to be Paid (incl. GST): 3620 INR\n"));
        assert!(text.contains("| Time:           16:15\n"));
        assert!(text.ends_with(RULE));
    }

    #[test]
    fn test_empty_party_has_no_summary() {
        assert!(PartySummary::from_receipts(&[]).is_none());
    }
}
