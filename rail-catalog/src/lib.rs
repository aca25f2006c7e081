pub mod train;
pub mod pricing;
pub mod inventory;

pub use train::{CatalogError, CoachType, Train, TrainCatalog, TrainKind};
pub use pricing::{Fare, FareCalculator, FareConfig, FareError, PaymentMethod};
pub use inventory::{InventoryError, SeatInventory};
