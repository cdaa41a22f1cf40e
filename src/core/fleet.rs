//! Named ships plus a yard of containers not yet aboard anything.
//!
//! This is the bookkeeping a driver needs to run a scenario by name. Every
//! capacity rule still lives in [`Ship`]; the fleet only looks things up and
//! moves containers between the yard and the ships.

use crate::core::container::Container;
use crate::core::serial::SerialNumberGenerator;
use crate::core::ship::Ship;
use crate::domain::model::{CargoClass, LoadOutcome, SerialNumber};
use crate::utils::error::{FleetError, Result};
use std::fmt;

const YARD: &str = "yard";

/// Where a container currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location<'a> {
    Yard,
    Aboard(&'a str),
}

#[derive(Debug, Clone, Default)]
pub struct Fleet {
    name: String,
    ships: Vec<Ship>,
    yard: Vec<Container>,
}

impl Fleet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ships: Vec::new(),
            yard: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn yard(&self) -> &[Container] {
        &self.yard
    }

    /// Adds a ship, and whatever is already aboard it. Names and serial
    /// numbers must stay unique across the fleet.
    pub fn add_ship(&mut self, ship: Ship) -> Result<()> {
        if self.ship(ship.name()).is_some() {
            return Err(FleetError::DuplicateShipError {
                ship: ship.name().to_string(),
            });
        }
        for container in ship.containers() {
            self.ensure_unused(container.serial_number())?;
        }
        tracing::info!("⚓ {}: ship {} joined", self.name, ship.name());
        self.ships.push(ship);
        Ok(())
    }

    /// Takes a ship, and everything aboard it, out of the fleet.
    pub fn remove_ship(&mut self, name: &str) -> Result<Ship> {
        let index = self.ship_index(name)?;
        tracing::info!("⚓ {}: ship {} left", self.name, name);
        Ok(self.ships.remove(index))
    }

    pub fn ship(&self, name: &str) -> Option<&Ship> {
        self.ships.iter().find(|s| s.name() == name)
    }

    fn ship_index(&self, name: &str) -> Result<usize> {
        self.ships
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| FleetError::ShipNotFoundError {
                ship: name.to_string(),
            })
    }

    fn require_ship_mut(&mut self, name: &str) -> Result<&mut Ship> {
        let index = self.ship_index(name)?;
        Ok(&mut self.ships[index])
    }

    pub fn locate(&self, serial_number: &str) -> Option<(Location<'_>, &Container)> {
        if let Some(container) = self.yard.iter().find(|c| c.serial_number() == serial_number) {
            return Some((Location::Yard, container));
        }
        self.ships.iter().find_map(|ship| {
            ship.container(serial_number)
                .map(|container| (Location::Aboard(ship.name()), container))
        })
    }

    /// Every serial number known to the fleet, yard first.
    pub fn serial_numbers(&self) -> impl Iterator<Item = &SerialNumber> {
        self.yard
            .iter()
            .chain(self.ships.iter().flat_map(|s| s.containers().iter()))
            .map(Container::serial_number)
    }

    /// A serial number no container in the fleet uses yet.
    pub fn issue_serial_number(&self, class: CargoClass) -> SerialNumber {
        SerialNumberGenerator::after(self.serial_numbers()).issue(class)
    }

    fn ensure_unused(&self, serial_number: &SerialNumber) -> Result<()> {
        match self.locate(serial_number.as_str()) {
            None => Ok(()),
            Some((location, _)) => {
                let place = match location {
                    Location::Yard => YARD,
                    Location::Aboard(ship) => ship,
                };
                Err(FleetError::DuplicateContainerError {
                    ship: place.to_string(),
                    serial_number: serial_number.to_string(),
                })
            }
        }
    }

    /// Puts a new container in the yard. Serial numbers must be unique fleet-wide.
    pub fn stage_container(&mut self, container: Container) -> Result<()> {
        self.ensure_unused(container.serial_number())?;
        tracing::debug!("{}: staged {} in the yard", self.name, container.serial_number());
        self.yard.push(container);
        Ok(())
    }

    /// Moves a container from the yard onto a ship. Checked before moving, so a
    /// refused container stays in the yard.
    pub fn board(&mut self, serial_number: &str, ship_name: &str) -> Result<()> {
        let yard_index = self
            .yard
            .iter()
            .position(|c| c.serial_number() == serial_number)
            .ok_or_else(|| FleetError::NotFoundError {
                ship: YARD.to_string(),
                serial_number: serial_number.to_string(),
            })?;
        let ship_index = self.ship_index(ship_name)?;

        self.ships[ship_index].can_accept(&self.yard[yard_index])?;
        let container = self.yard.remove(yard_index);
        self.ships[ship_index].add_container(container)
    }

    /// Takes a container off a ship and back into the yard.
    pub fn land(&mut self, ship_name: &str, serial_number: &str) -> Result<()> {
        let container = self
            .require_ship_mut(ship_name)?
            .remove_container(serial_number)?;
        self.yard.push(container);
        Ok(())
    }

    /// Takes a container off a ship and out of the fleet.
    pub fn remove_container(&mut self, ship_name: &str, serial_number: &str) -> Result<Container> {
        self.require_ship_mut(ship_name)?
            .remove_container(serial_number)
    }

    /// [`Ship::replace_container`] on a ship of this fleet. The newcomer may
    /// reuse the serial number it replaces but no other one in use.
    pub fn replace_container(
        &mut self,
        ship_name: &str,
        serial_number: &str,
        new_container: Container,
    ) -> Result<Container> {
        if new_container.serial_number() != serial_number {
            self.ensure_unused(new_container.serial_number())?;
        }
        self.require_ship_mut(ship_name)?
            .replace_container(serial_number, new_container)
    }

    pub fn load_container(
        &mut self,
        ship_name: &str,
        serial_number: &str,
        mass_kg: f64,
    ) -> Result<LoadOutcome> {
        self.require_ship_mut(ship_name)?
            .load_container(serial_number, mass_kg)
    }

    pub fn unload_container(&mut self, ship_name: &str, serial_number: &str) -> Result<()> {
        self.require_ship_mut(ship_name)?
            .unload_container(serial_number)
    }

    pub fn change_container_product(
        &mut self,
        ship_name: &str,
        serial_number: &str,
        product_type: &str,
        temperature_c: f64,
    ) -> Result<()> {
        self.require_ship_mut(ship_name)?
            .change_container_product(serial_number, product_type, temperature_c)
    }

    /// [`Ship::transfer_container`] between two ships of this fleet, by name.
    pub fn transfer(&mut self, from: &str, to: &str, serial_number: &str) -> Result<()> {
        let from_index = self.ship_index(from)?;
        let to_index = self.ship_index(to)?;
        if from_index == to_index {
            return Err(FleetError::InvalidStateError {
                serial_number: serial_number.to_string(),
                message: format!("cannot transfer from ship {} to itself", from),
            });
        }

        let (source, destination) = if from_index < to_index {
            let (left, right) = self.ships.split_at_mut(to_index);
            (&mut left[from_index], &mut right[0])
        } else {
            let (left, right) = self.ships.split_at_mut(from_index);
            (&mut right[0], &mut left[to_index])
        };
        Ship::transfer_container(source, destination, serial_number)
    }

    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Fleet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fleet {}: {} ship(s)", self.name, self.ships.len())?;
        for ship in &self.ships {
            writeln!(f, "{}", ship)?;
        }
        if self.yard.is_empty() {
            write!(f, "Yard: empty")
        } else {
            write!(f, "Yard: {} container(s)", self.yard.len())?;
            for container in &self.yard {
                write!(f, "\n  {}", container)?;
            }
            Ok(())
        }
    }
}
