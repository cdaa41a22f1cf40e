use crate::utils::error::{FleetError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

const SERIAL_PREFIX: &str = "KON";

/// Cargo class of a container, identified by the type code inside its serial number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CargoClass {
    Refrigerated,
    Liquid,
    Gas,
}

impl CargoClass {
    pub fn type_code(self) -> char {
        match self {
            Self::Refrigerated => 'C',
            Self::Liquid => 'L',
            Self::Gas => 'G',
        }
    }

    pub fn from_type_code(code: &str) -> Option<Self> {
        match code {
            "C" => Some(Self::Refrigerated),
            "L" => Some(Self::Liquid),
            "G" => Some(Self::Gas),
            _ => None,
        }
    }
}

impl fmt::Display for CargoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Refrigerated => "refrigerated",
            Self::Liquid => "liquid",
            Self::Gas => "gas",
        };
        f.write_str(name)
    }
}

/// `KON-<TypeCode>-<UniqueNumber>`, e.g. `KON-C-001`.
///
/// The original text is kept verbatim (leading zeros included) so that lookups
/// by string match exactly what the caller registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerialNumber {
    raw: String,
    class: CargoClass,
    number: u64,
}

impl SerialNumber {
    pub fn new(class: CargoClass, number: u64) -> Self {
        Self {
            raw: format!("{}-{}-{}", SERIAL_PREFIX, class.type_code(), number),
            class,
            number,
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        let invalid = |reason: &str| FleetError::InvalidSerialNumberError {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let rest = value
            .strip_prefix(SERIAL_PREFIX)
            .and_then(|rest| rest.strip_prefix('-'))
            .ok_or_else(|| invalid("must start with KON-"))?;
        let (code, digits) = rest
            .split_once('-')
            .ok_or_else(|| invalid("expected KON-<TypeCode>-<Number>"))?;
        let class = CargoClass::from_type_code(code)
            .ok_or_else(|| invalid("type code must be one of C, L, G"))?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("number part must be decimal digits"));
        }
        let number = digits
            .parse::<u64>()
            .map_err(|_| invalid("number part is out of range"))?;

        Ok(Self {
            raw: value.to_string(),
            class,
            number,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn class(&self) -> CargoClass {
        self.class
    }

    pub fn number(&self) -> u64 {
        self.number
    }
}

impl FromStr for SerialNumber {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SerialNumber {
    type Error = FleetError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<SerialNumber> for String {
    fn from(serial: SerialNumber) -> Self {
        serial.raw
    }
}

impl AsRef<str> for SerialNumber {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl PartialEq<str> for SerialNumber {
    fn eq(&self, other: &str) -> bool {
        self.raw == other
    }
}

impl PartialEq<&str> for SerialNumber {
    fn eq(&self, other: &&str) -> bool {
        self.raw == *other
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A hazard signal raised by a container. Not an error: the operation that
/// raised it still returned normally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardReport {
    pub serial_number: SerialNumber,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl HazardReport {
    pub fn new(serial_number: SerialNumber, message: impl Into<String>) -> Self {
        Self {
            serial_number,
            message: message.into(),
            raised_at: Utc::now(),
        }
    }
}

impl fmt::Display for HazardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hazard for {}: {}", self.serial_number, self.message)
    }
}

/// What a successful `load` call did to the container.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded { cargo_mass_kg: f64 },
    /// Soft failure: cargo untouched, hazard raised instead.
    Rejected(HazardReport),
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KindSnapshot {
    Liquid,
    Gas {
        pressure: f64,
    },
    Refrigerated {
        product_type: String,
        temperature_c: f64,
        load_ledger: BTreeMap<String, f64>,
    },
}

/// Read-only view of a container, the data that `describe` output reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSnapshot {
    pub serial_number: String,
    pub cargo_mass_kg: f64,
    pub height_cm: u32,
    pub depth_cm: u32,
    pub own_weight_kg: f64,
    pub max_capacity_kg: f64,
    #[serde(flatten)]
    pub kind: KindSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipSnapshot {
    pub name: String,
    pub max_speed_knots: u32,
    pub max_container_count: usize,
    pub max_weight_tons: f64,
    pub total_weight_kg: f64,
    pub containers: Vec<ContainerSnapshot>,
}
