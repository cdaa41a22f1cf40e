pub mod config;
pub mod core;
pub mod demo;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::FleetConfig;
pub use crate::core::{
    container::{Container, ContainerKind, Shell},
    fleet::{Fleet, Location},
    serial::SerialNumberGenerator,
    ship::{CapacityLimit, Ship},
};
pub use domain::model::{CargoClass, HazardReport, LoadOutcome, SerialNumber};
pub use domain::ports::{Cargo, HazardNotifier};
pub use utils::error::{FleetError, Result};
