use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment methods accepted at checkout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    #[serde(rename = "Google Pay")]
    GooglePay,
    #[serde(rename = "Amazon Pay")]
    AmazonPay,
    #[serde(rename = "PhonePe")]
    PhonePe,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::GooglePay,
        PaymentMethod::AmazonPay,
        PaymentMethod::PhonePe,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::GooglePay => "Google Pay",
            PaymentMethod::AmazonPay => "Amazon Pay",
            PaymentMethod::PhonePe => "PhonePe",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = FareError;

    /// Matches labels ignoring case and inner whitespace, so `googlepay`
    /// and `Google Pay` are the same method.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squash = |v: &str| -> String {
            v.chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect()
        };
        let wanted = squash(s);

        PaymentMethod::ALL
            .into_iter()
            .find(|m| !wanted.is_empty() && squash(m.label()) == wanted)
            .ok_or_else(|| FareError::InvalidPaymentMethod(s.trim().to_string()))
    }
}

/// Flat surcharge per payment method, in whole rupees.
/// Labelled "GST" on the counter but it is a fixed fee, not a percentage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FareConfig {
    pub google_pay: i64,
    pub amazon_pay: i64,
    pub phone_pe: i64,
    pub currency: String,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            google_pay: 10,
            amazon_pay: 5,
            phone_pe: 2,
            currency: "INR".to_string(),
        }
    }
}

/// Price breakdown for one booking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fare {
    pub base: i64,
    pub surcharge: i64,
    pub total: i64,
    pub currency: String,
    pub payment_method: PaymentMethod,
}

/// Stateless fare calculator: `unit_price * seats + surcharge(method)`
#[derive(Debug, Clone, Default)]
pub struct FareCalculator {
    config: FareConfig,
}

impl FareCalculator {
    pub fn new(config: FareConfig) -> Self {
        Self { config }
    }

    pub fn surcharge_for(&self, method: PaymentMethod) -> i64 {
        match method {
            PaymentMethod::GooglePay => self.config.google_pay,
            PaymentMethod::AmazonPay => self.config.amazon_pay,
            PaymentMethod::PhonePe => self.config.phone_pe,
        }
    }

    /// Price a booking from the raw payment method label
    pub fn compute_price(
        &self,
        unit_price: i64,
        seats: u32,
        payment_method: &str,
    ) -> Result<Fare, FareError> {
        let method = payment_method.parse::<PaymentMethod>()?;
        self.quote(unit_price, seats, method)
    }

    pub fn quote(
        &self,
        unit_price: i64,
        seats: u32,
        method: PaymentMethod,
    ) -> Result<Fare, FareError> {
        if unit_price <= 0 {
            return Err(FareError::InvalidFareInput(format!(
                "unit price must be positive, got {}",
                unit_price
            )));
        }
        if seats == 0 {
            return Err(FareError::InvalidFareInput("seat count must be positive".to_string()));
        }

        let base = unit_price.checked_mul(i64::from(seats)).ok_or_else(|| {
            FareError::InvalidFareInput(format!("{} x {} overflows", unit_price, seats))
        })?;
        let surcharge = self.surcharge_for(method);
        let total = base
            .checked_add(surcharge)
            .ok_or_else(|| FareError::InvalidFareInput("total overflows".to_string()))?;

        Ok(Fare {
            base,
            surcharge,
            total,
            currency: self.config.currency.clone(),
            payment_method: method,
        })
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FareError {
    #[error("Invalid payment method selected: '{0}'")]
    InvalidPaymentMethod(String),

    #[error("Invalid fare input: {0}")]
    InvalidFareInput(String),
}
