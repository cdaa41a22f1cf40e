//! The ship aggregate.
//!
//! A [`Ship`] owns its containers in boarding order and keeps two ceilings at
//! all times: the number of containers, and the gross weight of everything
//! aboard (cargo plus tare, in kg) against the ship's limit given in tonnes.

use crate::core::container::Container;
use crate::domain::model::{LoadOutcome, ShipSnapshot};
use crate::domain::ports::Cargo;
use crate::utils::error::{FleetError, Result};
use std::fmt;

const KG_PER_TONNE: f64 = 1000.0;

/// Which ceiling an add would have broken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapacityLimit {
    ContainerCount { max: usize },
    Weight { required_kg: f64, max_kg: f64 },
}

impl fmt::Display for CapacityLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContainerCount { max } => {
                write!(f, "container count limit of {} reached", max)
            }
            Self::Weight {
                required_kg,
                max_kg,
            } => write!(
                f,
                "total weight would be {} kg, limit is {} kg",
                required_kg, max_kg
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ship {
    name: String,
    max_speed_knots: u32,
    max_container_count: usize,
    max_weight_tons: f64,
    containers: Vec<Container>,
}

impl Ship {
    pub fn new(
        name: impl Into<String>,
        max_speed_knots: u32,
        max_container_count: usize,
        max_weight_tons: f64,
    ) -> Self {
        Self {
            name: name.into(),
            max_speed_knots,
            max_container_count,
            max_weight_tons,
            containers: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_speed_knots(&self) -> u32 {
        self.max_speed_knots
    }

    pub fn max_container_count(&self) -> usize {
        self.max_container_count
    }

    pub fn max_weight_tons(&self) -> f64 {
        self.max_weight_tons
    }

    pub fn max_weight_kg(&self) -> f64 {
        self.max_weight_tons * KG_PER_TONNE
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn total_weight_kg(&self) -> f64 {
        self.containers.iter().map(Container::gross_weight_kg).sum()
    }

    pub fn remaining_capacity_kg(&self) -> f64 {
        self.max_weight_kg() - self.total_weight_kg()
    }

    pub fn contains(&self, serial_number: &str) -> bool {
        self.position(serial_number).is_some()
    }

    pub fn container(&self, serial_number: &str) -> Option<&Container> {
        self.containers
            .iter()
            .find(|c| c.serial_number() == serial_number)
    }

    fn position(&self, serial_number: &str) -> Option<usize> {
        self.containers
            .iter()
            .position(|c| c.serial_number() == serial_number)
    }

    fn require_position(&self, serial_number: &str) -> Result<usize> {
        self.position(serial_number)
            .ok_or_else(|| FleetError::NotFoundError {
                ship: self.name.clone(),
                serial_number: serial_number.to_string(),
            })
    }

    fn capacity_error(&self, container: &Container, limit: CapacityLimit) -> FleetError {
        FleetError::CapacityExceededError {
            ship: self.name.clone(),
            serial_number: container.serial_number().to_string(),
            limit,
        }
    }

    /// Checks whether `container` could be added right now, without adding it.
    pub fn can_accept(&self, container: &Container) -> Result<()> {
        if self.contains(container.serial_number().as_str()) {
            return Err(FleetError::DuplicateContainerError {
                ship: self.name.clone(),
                serial_number: container.serial_number().to_string(),
            });
        }

        if self.containers.len() >= self.max_container_count {
            return Err(self.capacity_error(
                container,
                CapacityLimit::ContainerCount {
                    max: self.max_container_count,
                },
            ));
        }

        let required_kg = self.total_weight_kg() + container.gross_weight_kg();
        if required_kg > self.max_weight_kg() {
            return Err(self.capacity_error(
                container,
                CapacityLimit::Weight {
                    required_kg,
                    max_kg: self.max_weight_kg(),
                },
            ));
        }

        Ok(())
    }

    pub fn add_container(&mut self, container: Container) -> Result<()> {
        self.can_accept(&container)?;

        tracing::info!(
            "🚢 {}: boarded {} ({} kg), {}/{} containers",
            self.name,
            container.serial_number(),
            container.gross_weight_kg(),
            self.containers.len() + 1,
            self.max_container_count
        );
        self.containers.push(container);
        Ok(())
    }

    /// Takes the first container with this serial number off the ship.
    pub fn remove_container(&mut self, serial_number: &str) -> Result<Container> {
        let index = self.require_position(serial_number)?;
        let container = self.containers.remove(index);
        tracing::info!("🚢 {}: removed {}", self.name, serial_number);
        Ok(container)
    }

    /// Removes `serial_number`, then adds `new_container` at the end.
    ///
    /// Not atomic: if the add fails the old container is already gone and is
    /// dropped along with the error. See [`Ship::replace_container_atomic`].
    pub fn replace_container(
        &mut self,
        serial_number: &str,
        new_container: Container,
    ) -> Result<Container> {
        let old = self.remove_container(serial_number)?;
        self.add_container(new_container)?;
        Ok(old)
    }

    /// Swaps `new_container` into the slot of `serial_number` only if the ship
    /// can carry it once the old one is off. On any error the ship is unchanged.
    pub fn replace_container_atomic(
        &mut self,
        serial_number: &str,
        new_container: Container,
    ) -> Result<Container> {
        let index = self.require_position(serial_number)?;

        let new_serial = new_container.serial_number().as_str();
        let clashes = self
            .containers
            .iter()
            .enumerate()
            .any(|(i, c)| i != index && c.serial_number() == new_serial);
        if clashes {
            return Err(FleetError::DuplicateContainerError {
                ship: self.name.clone(),
                serial_number: new_serial.to_string(),
            });
        }

        let required_kg = self.total_weight_kg() - self.containers[index].gross_weight_kg()
            + new_container.gross_weight_kg();
        if required_kg > self.max_weight_kg() {
            return Err(self.capacity_error(
                &new_container,
                CapacityLimit::Weight {
                    required_kg,
                    max_kg: self.max_weight_kg(),
                },
            ));
        }

        tracing::info!(
            "🚢 {}: replaced {} with {}",
            self.name,
            serial_number,
            new_container.serial_number()
        );
        Ok(std::mem::replace(&mut self.containers[index], new_container))
    }

    /// Moves a container from one ship to another.
    ///
    /// Not atomic: the container leaves `from` before `to` checks its limits,
    /// so a rejected transfer leaves it on neither ship.
    pub fn transfer_container(from: &mut Ship, to: &mut Ship, serial_number: &str) -> Result<()> {
        let container = from.remove_container(serial_number)?;
        to.add_container(container).inspect_err(|e| {
            tracing::warn!(
                "Transfer of {} from {} to {} failed, container detached: {}",
                serial_number,
                from.name,
                to.name,
                e
            );
        })?;
        tracing::info!(
            "🔁 Transferred {} from {} to {}",
            serial_number,
            from.name,
            to.name
        );
        Ok(())
    }

    /// Loads cargo into a container aboard, refusing loads that would push the
    /// ship over its weight limit. The container is untouched on any error.
    pub fn load_container(&mut self, serial_number: &str, mass_kg: f64) -> Result<LoadOutcome> {
        let index = self.require_position(serial_number)?;
        let current = &self.containers[index];

        let mut candidate = current.clone();
        let outcome = candidate.load(mass_kg)?;

        let required_kg =
            self.total_weight_kg() - current.gross_weight_kg() + candidate.gross_weight_kg();
        if required_kg > self.max_weight_kg() {
            return Err(self.capacity_error(
                &candidate,
                CapacityLimit::Weight {
                    required_kg,
                    max_kg: self.max_weight_kg(),
                },
            ));
        }

        self.containers[index] = candidate;
        Ok(outcome)
    }

    pub fn unload_container(&mut self, serial_number: &str) -> Result<()> {
        let index = self.require_position(serial_number)?;
        self.containers[index].unload();
        Ok(())
    }

    pub fn change_container_product(
        &mut self,
        serial_number: &str,
        product_type: &str,
        temperature_c: f64,
    ) -> Result<()> {
        let index = self.require_position(serial_number)?;
        self.containers[index].change_product(product_type, temperature_c)
    }

    pub fn describe(&self) -> String {
        self.to_string()
    }

    pub fn describe_container(&self, serial_number: &str) -> String {
        match self.container(serial_number) {
            Some(container) => container.to_string(),
            None => format!(
                "Container {} not found on ship {}",
                serial_number, self.name
            ),
        }
    }

    pub fn snapshot(&self) -> ShipSnapshot {
        ShipSnapshot {
            name: self.name.clone(),
            max_speed_knots: self.max_speed_knots,
            max_container_count: self.max_container_count,
            max_weight_tons: self.max_weight_tons,
            total_weight_kg: self.total_weight_kg(),
            containers: self.containers.iter().map(Container::snapshot).collect(),
        }
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Ship {}: max speed {} knots, up to {} containers, max weight {} t ({} kg aboard)",
            self.name,
            self.max_speed_knots,
            self.max_container_count,
            self.max_weight_tons,
            self.total_weight_kg()
        )?;
        if self.containers.is_empty() {
            return write!(f, "  (no containers aboard)");
        }
        for (i, container) in self.containers.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {}", container)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::container::Shell;

    fn liquid(serial: &str, own_weight_kg: f64) -> Container {
        Container::liquid(serial, Shell::new(250, 600, own_weight_kg, 30_000.0)).unwrap()
    }

    #[test]
    fn test_add_enforces_container_count() {
        let mut ship = Ship::new("Aurora", 20, 2, 1000.0);
        ship.add_container(liquid("KON-L-1", 100.0)).unwrap();
        ship.add_container(liquid("KON-L-2", 100.0)).unwrap();

        let err = ship.add_container(liquid("KON-L-3", 100.0)).unwrap_err();
        assert!(matches!(
            err,
            FleetError::CapacityExceededError {
                limit: CapacityLimit::ContainerCount { max: 2 },
                ..
            }
        ));
        assert_eq!(ship.len(), 2);
    }

    #[test]
    fn test_add_enforces_weight_in_tonnes() {
        let mut ship = Ship::new("Aurora", 20, 10, 1.0);
        ship.add_container(liquid("KON-L-1", 600.0)).unwrap();
        ship.add_container(liquid("KON-L-2", 400.0)).unwrap();
        assert_eq!(ship.total_weight_kg(), 1000.0);
        assert_eq!(ship.remaining_capacity_kg(), 0.0);

        let err = ship.add_container(liquid("KON-L-3", 0.5)).unwrap_err();
        assert!(matches!(
            err,
            FleetError::CapacityExceededError {
                limit: CapacityLimit::Weight { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_add_rejects_duplicate_serial() {
        let mut ship = Ship::new("Aurora", 20, 10, 100.0);
        ship.add_container(liquid("KON-L-1", 100.0)).unwrap();
        assert!(matches!(
            ship.add_container(liquid("KON-L-1", 100.0)),
            Err(FleetError::DuplicateContainerError { .. })
        ));
    }

    #[test]
    fn test_remove_missing_serial() {
        let mut ship = Ship::new("Aurora", 20, 10, 100.0);
        assert!(matches!(
            ship.remove_container("KON-L-404"),
            Err(FleetError::NotFoundError { .. })
        ));
    }

    #[test]
    fn test_remove_preserves_order_of_the_rest() {
        let mut ship = Ship::new("Aurora", 20, 10, 100.0);
        for serial in ["KON-L-1", "KON-L-2", "KON-L-3"] {
            ship.add_container(liquid(serial, 10.0)).unwrap();
        }
        let removed = ship.remove_container("KON-L-2").unwrap();
        assert_eq!(removed.serial_number(), "KON-L-2");

        let left: Vec<&str> = ship
            .containers()
            .iter()
            .map(|c| c.serial_number().as_str())
            .collect();
        assert_eq!(left, vec!["KON-L-1", "KON-L-3"]);
    }

    #[test]
    fn test_replace_is_not_atomic() {
        let mut ship = Ship::new("Aurora", 20, 5, 1.0);
        ship.add_container(liquid("KON-L-1", 500.0)).unwrap();

        let err = ship
            .replace_container("KON-L-1", liquid("KON-L-2", 2000.0))
            .unwrap_err();
        assert!(matches!(err, FleetError::CapacityExceededError { .. }));
        assert!(ship.is_empty());
    }

    #[test]
    fn test_replace_appends_new_container() {
        let mut ship = Ship::new("Aurora", 20, 5, 100.0);
        ship.add_container(liquid("KON-L-1", 500.0)).unwrap();
        ship.add_container(liquid("KON-L-2", 500.0)).unwrap();

        let old = ship
            .replace_container("KON-L-1", liquid("KON-L-3", 700.0))
            .unwrap();
        assert_eq!(old.serial_number(), "KON-L-1");
        assert_eq!(ship.containers()[1].serial_number(), "KON-L-3");
    }

    #[test]
    fn test_replace_atomic_leaves_ship_unchanged_on_failure() {
        let mut ship = Ship::new("Aurora", 20, 5, 1.0);
        ship.add_container(liquid("KON-L-1", 500.0)).unwrap();

        assert!(ship
            .replace_container_atomic("KON-L-1", liquid("KON-L-2", 2000.0))
            .is_err());
        assert!(ship.contains("KON-L-1"));

        let old = ship
            .replace_container_atomic("KON-L-1", liquid("KON-L-2", 900.0))
            .unwrap();
        assert_eq!(old.serial_number(), "KON-L-1");
        assert_eq!(ship.containers()[0].serial_number(), "KON-L-2");
    }

    #[test]
    fn test_replace_atomic_at_full_count() {
        let mut ship = Ship::new("Aurora", 20, 1, 100.0);
        ship.add_container(liquid("KON-L-1", 500.0)).unwrap();
        ship.replace_container_atomic("KON-L-1", liquid("KON-L-2", 500.0))
            .unwrap();
        assert_eq!(ship.len(), 1);
    }

    #[test]
    fn test_transfer_moves_container() {
        let mut from = Ship::new("Aurora", 20, 5, 100.0);
        let mut to = Ship::new("Borealis", 15, 10, 150.0);
        from.add_container(liquid("KON-L-1", 500.0)).unwrap();

        Ship::transfer_container(&mut from, &mut to, "KON-L-1").unwrap();
        assert!(from.is_empty());
        assert!(to.contains("KON-L-1"));
    }

    #[test]
    fn test_transfer_failure_detaches_container() {
        let mut from = Ship::new("Aurora", 20, 5, 100.0);
        let mut to = Ship::new("Borealis", 15, 0, 150.0);
        from.add_container(liquid("KON-L-1", 500.0)).unwrap();

        assert!(Ship::transfer_container(&mut from, &mut to, "KON-L-1").is_err());
        assert!(!from.contains("KON-L-1"));
        assert!(!to.contains("KON-L-1"));
    }

    #[test]
    fn test_transfer_unknown_serial() {
        let mut from = Ship::new("Aurora", 20, 5, 100.0);
        let mut to = Ship::new("Borealis", 15, 5, 150.0);
        assert!(matches!(
            Ship::transfer_container(&mut from, &mut to, "KON-G-9"),
            Err(FleetError::NotFoundError { .. })
        ));
    }

    #[test]
    fn test_load_container_respects_ship_weight() {
        let mut ship = Ship::new("Aurora", 20, 5, 1.0);
        ship.add_container(liquid("KON-L-1", 500.0)).unwrap();

        ship.load_container("KON-L-1", 500.0).unwrap();
        assert_eq!(ship.total_weight_kg(), 1000.0);

        let err = ship.load_container("KON-L-1", 600.0).unwrap_err();
        assert!(matches!(err, FleetError::CapacityExceededError { .. }));
        assert_eq!(ship.container("KON-L-1").unwrap().cargo_mass_kg(), 500.0);

        ship.unload_container("KON-L-1").unwrap();
        assert_eq!(ship.total_weight_kg(), 500.0);
    }

    #[test]
    fn test_describe_container_not_found_is_not_an_error() {
        let ship = Ship::new("Aurora", 20, 5, 100.0);
        assert!(ship.describe_container("KON-C-1").contains("not found"));
        assert!(ship.describe().contains("no containers"));
    }

    #[test]
    fn test_snapshot_serialises() {
        let mut ship = Ship::new("Aurora", 20, 5, 100.0);
        ship.add_container(liquid("KON-L-1", 500.0)).unwrap();

        let json = serde_json::to_value(ship.snapshot()).unwrap();
        assert_eq!(json["name"], "Aurora");
        assert_eq!(json["containers"][0]["serial_number"], "KON-L-1");
        assert_eq!(json["containers"][0]["kind"], "liquid");
    }
}
