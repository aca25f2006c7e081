use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{BookingError, BookingResult};

pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// A passenger name must contain something other than whitespace and no digits
pub fn validate_name(name: &str) -> BookingResult<()> {
    let name = name.trim();
    if name.is_empty() || name.chars().any(|c| c.is_ascii_digit()) {
        return Err(BookingError::InvalidName);
    }
    Ok(())
}

/// Inclusive range of dates open for booking
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TravelWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TravelWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Parse a `DD/MM/YYYY` travel date and check it falls inside the window
    pub fn parse_date(&self, input: &str) -> BookingResult<NaiveDate> {
        let raw = input.trim();
        let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|_| BookingError::InvalidDateFormat(raw.to_string()))?;

        if !self.contains(date) {
            return Err(BookingError::DateOutOfRange {
                date,
                start: self.start,
                end: self.end,
            });
        }
        Ok(date)
    }
}

impl Default for TravelWindow {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2024, 4, 29).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or(NaiveDate::MAX),
        }
    }
}
