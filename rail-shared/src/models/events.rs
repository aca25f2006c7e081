use crate::pii::Masked;
use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct SeatsBookedEvent {
    pub booking_id: Uuid,
    pub passenger: Masked<String>,
    pub train_number: u32,
    pub seats: u32,
    pub total_price: i64,
    pub remaining_seats: u32,
    pub booked_at: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingRejectedEvent {
    pub passenger: Masked<String>,
    pub train_number: u32,
    pub seats_requested: u32,
    pub reason: String,
    pub rejected_at: i64,
}
