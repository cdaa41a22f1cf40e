pub mod container;
pub mod fleet;
pub mod products;
pub mod refrigerated;
pub mod serial;
pub mod ship;

pub use crate::domain::model::{CargoClass, HazardReport, LoadOutcome, SerialNumber};
pub use crate::domain::ports::{Cargo, HazardNotifier};
pub use crate::utils::error::Result;
