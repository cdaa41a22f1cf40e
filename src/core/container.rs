//! Cargo containers and their loading policies.
//!
//! A [`Container`] is one shared record (serial number, shell dimensions, tare
//! weight, structural capacity, current cargo mass) plus a [`ContainerKind`]
//! that selects the policy applied by [`Cargo::load`] and [`Cargo::unload`]:
//!
//! - liquid: load replaces the cargo mass and may fill at most 90% of capacity;
//!   unload empties the container.
//! - gas: load replaces the cargo mass up to full capacity; unload leaves 5% behind.
//! - refrigerated: loads accumulate, the product must be known, and a container
//!   set too cold for its product raises a hazard and keeps its cargo unchanged
//!   instead of failing.

use crate::core::refrigerated::{Admission, RefrigeratedState};
use crate::domain::model::{
    CargoClass, ContainerSnapshot, HazardReport, KindSnapshot, LoadOutcome, SerialNumber,
};
use crate::domain::ports::{Cargo, HazardNotifier};
use crate::utils::error::{FleetError, Result};
use std::fmt;

/// Share of the shell capacity a liquid may occupy.
pub const LIQUID_FILL_RATIO: f64 = 0.9;

/// Share of the cargo left in a gas container after unloading.
pub const GAS_RESIDUAL_RATIO: f64 = 0.05;

/// Smallest positive (subnormal) `f64`. A gas residual that would underflow
/// to zero stays here instead.
const GAS_RESIDUAL_FLOOR_KG: f64 = 5e-324;

fn gas_residual(cargo_mass_kg: f64) -> f64 {
    let residual = cargo_mass_kg * GAS_RESIDUAL_RATIO;
    if cargo_mass_kg > 0.0 && residual == 0.0 {
        GAS_RESIDUAL_FLOOR_KG
    } else {
        residual
    }
}

/// Fixed physical parameters of a container shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shell {
    pub height_cm: u32,
    pub depth_cm: u32,
    pub own_weight_kg: f64,
    pub max_capacity_kg: f64,
}

impl Shell {
    pub fn new(height_cm: u32, depth_cm: u32, own_weight_kg: f64, max_capacity_kg: f64) -> Self {
        Self {
            height_cm,
            depth_cm,
            own_weight_kg,
            max_capacity_kg,
        }
    }

    fn validate(&self, serial_number: &SerialNumber) -> Result<()> {
        let invalid = |field: &str, value: f64| FleetError::InvalidShellError {
            serial_number: serial_number.to_string(),
            field: field.to_string(),
            value,
        };
        if !self.own_weight_kg.is_finite() || self.own_weight_kg < 0.0 {
            return Err(invalid("own_weight_kg", self.own_weight_kg));
        }
        if !self.max_capacity_kg.is_finite() || self.max_capacity_kg <= 0.0 {
            return Err(invalid("max_capacity_kg", self.max_capacity_kg));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContainerKind {
    Liquid,
    Gas { pressure: f64 },
    Refrigerated(RefrigeratedState),
}

impl ContainerKind {
    pub fn class(&self) -> CargoClass {
        match self {
            Self::Liquid => CargoClass::Liquid,
            Self::Gas { .. } => CargoClass::Gas,
            Self::Refrigerated(_) => CargoClass::Refrigerated,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    serial_number: SerialNumber,
    cargo_mass_kg: f64,
    shell: Shell,
    kind: ContainerKind,
    hazards: Vec<HazardReport>,
}

impl Container {
    pub fn liquid(serial_number: &str, shell: Shell) -> Result<Self> {
        Self::new(serial_number, shell, ContainerKind::Liquid)
    }

    pub fn gas(serial_number: &str, shell: Shell, pressure: f64) -> Result<Self> {
        Self::new(serial_number, shell, ContainerKind::Gas { pressure })
    }

    pub fn refrigerated(
        serial_number: &str,
        shell: Shell,
        product_type: impl Into<String>,
        temperature_c: f64,
    ) -> Result<Self> {
        let state = RefrigeratedState::new(product_type, temperature_c);
        Self::new(serial_number, shell, ContainerKind::Refrigerated(state))
    }

    /// Builds an empty container, checking that the serial number is well formed
    /// and that its type code matches `kind`.
    pub fn new(serial_number: &str, shell: Shell, kind: ContainerKind) -> Result<Self> {
        let serial_number = SerialNumber::parse(serial_number)?;
        if serial_number.class() != kind.class() {
            return Err(FleetError::InvalidSerialNumberError {
                value: serial_number.to_string(),
                reason: format!(
                    "type code {} does not match a {} container (expected {})",
                    serial_number.class().type_code(),
                    kind.class(),
                    kind.class().type_code()
                ),
            });
        }
        shell.validate(&serial_number)?;

        Ok(Self {
            serial_number,
            cargo_mass_kg: 0.0,
            shell,
            kind,
            hazards: Vec::new(),
        })
    }

    pub fn serial_number(&self) -> &SerialNumber {
        &self.serial_number
    }

    pub fn class(&self) -> CargoClass {
        self.kind.class()
    }

    pub fn kind(&self) -> &ContainerKind {
        &self.kind
    }

    pub fn cargo_mass_kg(&self) -> f64 {
        self.cargo_mass_kg
    }

    pub fn height_cm(&self) -> u32 {
        self.shell.height_cm
    }

    pub fn depth_cm(&self) -> u32 {
        self.shell.depth_cm
    }

    pub fn own_weight_kg(&self) -> f64 {
        self.shell.own_weight_kg
    }

    pub fn max_capacity_kg(&self) -> f64 {
        self.shell.max_capacity_kg
    }

    /// Cargo plus tare, the weight a ship has to carry.
    pub fn gross_weight_kg(&self) -> f64 {
        self.cargo_mass_kg + self.shell.own_weight_kg
    }

    pub fn pressure(&self) -> Option<f64> {
        match self.kind {
            ContainerKind::Gas { pressure } => Some(pressure),
            _ => None,
        }
    }

    pub fn refrigerated_state(&self) -> Option<&RefrigeratedState> {
        match &self.kind {
            ContainerKind::Refrigerated(state) => Some(state),
            _ => None,
        }
    }

    /// Every hazard this container has raised, oldest first.
    pub fn hazards(&self) -> &[HazardReport] {
        &self.hazards
    }

    /// Switches a refrigerated container to another product and temperature.
    /// Only allowed while the container holds no cargo.
    pub fn change_product(
        &mut self,
        new_product_type: impl Into<String>,
        new_temperature_c: f64,
    ) -> Result<()> {
        let class = self.kind.class();
        let ContainerKind::Refrigerated(state) = &mut self.kind else {
            return Err(FleetError::InvalidStateError {
                serial_number: self.serial_number.to_string(),
                message: format!("a {} container has no product setting", class),
            });
        };

        if self.cargo_mass_kg > 0.0 {
            return Err(FleetError::InvalidStateError {
                serial_number: self.serial_number.to_string(),
                message: format!(
                    "cannot change product while {} kg of cargo is loaded",
                    self.cargo_mass_kg
                ),
            });
        }

        let new_product_type = new_product_type.into();
        tracing::debug!(
            "{}: product {} at {}°C -> {} at {}°C",
            self.serial_number,
            state.product_type(),
            state.temperature_c(),
            new_product_type,
            new_temperature_c
        );
        state.repurpose(new_product_type, new_temperature_c);
        Ok(())
    }

    /// `None` for containers without temperature control.
    pub fn is_temperature_sufficient(&self, required_temperature_c: f64) -> Option<bool> {
        self.refrigerated_state()
            .map(|state| state.is_temperature_sufficient(required_temperature_c))
    }

    pub fn snapshot(&self) -> ContainerSnapshot {
        let kind = match &self.kind {
            ContainerKind::Liquid => KindSnapshot::Liquid,
            ContainerKind::Gas { pressure } => KindSnapshot::Gas {
                pressure: *pressure,
            },
            ContainerKind::Refrigerated(state) => KindSnapshot::Refrigerated {
                product_type: state.product_type().to_string(),
                temperature_c: state.temperature_c(),
                load_ledger: state.load_ledger().clone(),
            },
        };

        ContainerSnapshot {
            serial_number: self.serial_number.to_string(),
            cargo_mass_kg: self.cargo_mass_kg,
            height_cm: self.shell.height_cm,
            depth_cm: self.shell.depth_cm,
            own_weight_kg: self.shell.own_weight_kg,
            max_capacity_kg: self.shell.max_capacity_kg,
            kind,
        }
    }

    fn ensure_valid_mass(&self, mass_kg: f64) -> Result<()> {
        if !mass_kg.is_finite() || mass_kg < 0.0 {
            return Err(FleetError::InvalidMassError {
                serial_number: self.serial_number.to_string(),
                mass_kg,
            });
        }
        Ok(())
    }
}

fn overfill(serial_number: &SerialNumber, requested_kg: f64, limit_kg: f64) -> FleetError {
    FleetError::OverfillError {
        serial_number: serial_number.to_string(),
        requested_kg,
        limit_kg,
    }
}

impl Cargo for Container {
    fn load(&mut self, mass_kg: f64) -> Result<LoadOutcome> {
        self.ensure_valid_mass(mass_kg)?;
        let max_capacity_kg = self.shell.max_capacity_kg;

        match &mut self.kind {
            ContainerKind::Liquid => {
                let limit_kg = max_capacity_kg * LIQUID_FILL_RATIO;
                if mass_kg > limit_kg {
                    return Err(overfill(&self.serial_number, mass_kg, limit_kg));
                }
                self.cargo_mass_kg = mass_kg;
            }
            ContainerKind::Gas { .. } => {
                if mass_kg > max_capacity_kg {
                    return Err(overfill(&self.serial_number, mass_kg, max_capacity_kg));
                }
                self.cargo_mass_kg = mass_kg;
            }
            ContainerKind::Refrigerated(state) => {
                if mass_kg + self.cargo_mass_kg > max_capacity_kg {
                    return Err(overfill(
                        &self.serial_number,
                        mass_kg,
                        max_capacity_kg - self.cargo_mass_kg,
                    ));
                }

                if let Admission::TooCold { required_c } = state.admission()? {
                    let message = format!(
                        "temperature {}°C is too low for {}, required is {}°C",
                        state.temperature_c(),
                        state.product_type(),
                        required_c
                    );
                    let report = self.notify_hazard(&message);
                    return Ok(LoadOutcome::Rejected(report));
                }

                state.record_load(mass_kg);
                self.cargo_mass_kg += mass_kg;
            }
        }

        tracing::debug!(
            "Loaded {} kg into {} ({}), cargo now {} kg",
            mass_kg,
            self.serial_number,
            self.kind.class(),
            self.cargo_mass_kg
        );
        Ok(LoadOutcome::Loaded {
            cargo_mass_kg: self.cargo_mass_kg,
        })
    }

    fn unload(&mut self) {
        self.cargo_mass_kg = match self.kind {
            ContainerKind::Gas { .. } => gas_residual(self.cargo_mass_kg),
            ContainerKind::Liquid | ContainerKind::Refrigerated(_) => 0.0,
        };
        tracing::debug!(
            "Unloaded {}, {} kg left",
            self.serial_number,
            self.cargo_mass_kg
        );
    }
}

impl HazardNotifier for Container {
    fn notify_hazard(&mut self, message: &str) -> HazardReport {
        tracing::warn!("⚠️ Hazard for {}: {}", self.serial_number, message);
        let report = HazardReport::new(self.serial_number.clone(), message);
        self.hazards.push(report.clone());
        report
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Container {} ({}): cargo {} kg, height {} cm, tare {} kg, depth {} cm, max capacity {} kg",
            self.serial_number,
            self.kind.class(),
            self.cargo_mass_kg,
            self.shell.height_cm,
            self.shell.own_weight_kg,
            self.shell.depth_cm,
            self.shell.max_capacity_kg
        )?;
        match &self.kind {
            ContainerKind::Liquid => Ok(()),
            ContainerKind::Gas { pressure } => write!(f, ", pressure {}", pressure),
            ContainerKind::Refrigerated(state) => write!(
                f,
                ", product {} at {}°C",
                state.product_type(),
                state.temperature_c()
            ),
        }
    }
}
