use serde::{Deserialize, Serialize};

/// Unbooked seat counter for one run. Holds no lock of its own; callers
/// that share it across threads wrap it (see the booking ledger).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatInventory {
    capacity: u32,
    available: u32,
}

impl SeatInventory {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            available: capacity,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn available(&self) -> u32 {
        self.available
    }

    /// Check that `requested` seats could be taken without taking them
    pub fn ensure_available(&self, requested: u32) -> Result<(), InventoryError> {
        if requested > self.available {
            return Err(InventoryError::InsufficientSeats {
                requested,
                available: self.available,
            });
        }
        Ok(())
    }

    /// Take seats out of the pool, returning what is left
    pub fn take(&mut self, requested: u32) -> Result<u32, InventoryError> {
        self.ensure_available(requested)?;
        self.available -= requested;
        tracing::debug!(requested, remaining = self.available, "Seats taken from inventory");
        Ok(self.available)
    }

    /// Share of the capacity already sold, in `[0, 1]`
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            1.0 - (self.available as f64 / self.capacity as f64)
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Not enough seats available: requested {requested}, available {available}")]
    InsufficientSeats {
        requested: u32,
        available: u32,
    },
}
