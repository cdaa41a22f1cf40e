use crate::core::ship::CapacityLimit;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FleetError {
    #[error("Overfill on {serial_number}: {requested_kg} kg requested, admission limit is {limit_kg} kg")]
    OverfillError {
        serial_number: String,
        requested_kg: f64,
        limit_kg: f64,
    },

    #[error("Invalid cargo mass for {serial_number}: {mass_kg} kg")]
    InvalidMassError { serial_number: String, mass_kg: f64 },

    #[error("Ship '{ship}' cannot take {serial_number}: {limit}")]
    CapacityExceededError {
        ship: String,
        serial_number: String,
        limit: CapacityLimit,
    },

    #[error("Container {serial_number} not found on ship '{ship}'")]
    NotFoundError { ship: String, serial_number: String },

    #[error("Container {serial_number} is already aboard ship '{ship}'")]
    DuplicateContainerError { ship: String, serial_number: String },

    #[error("Ship '{ship}' not found in the fleet")]
    ShipNotFoundError { ship: String },

    #[error("Ship '{ship}' is already part of the fleet")]
    DuplicateShipError { ship: String },

    #[error("Unknown product type: {product_type}")]
    UnknownProductError { product_type: String },

    #[error("Invalid state for {serial_number}: {message}")]
    InvalidStateError {
        serial_number: String,
        message: String,
    },

    #[error("Invalid shell for {serial_number}: {field} = {value}")]
    InvalidShellError {
        serial_number: String,
        field: String,
        value: f64,
    },

    #[error("Invalid serial number '{value}': {reason}")]
    InvalidSerialNumberError { value: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Cargo,
    Capacity,
    Lookup,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FleetError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::OverfillError { .. }
            | Self::InvalidMassError { .. }
            | Self::InvalidShellError { .. }
            | Self::UnknownProductError { .. }
            | Self::InvalidStateError { .. } => ErrorCategory::Cargo,
            Self::CapacityExceededError { .. }
            | Self::DuplicateContainerError { .. }
            | Self::DuplicateShipError { .. } => ErrorCategory::Capacity,
            Self::NotFoundError { .. }
            | Self::ShipNotFoundError { .. }
            | Self::InvalidSerialNumberError { .. } => ErrorCategory::Lookup,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup => ErrorSeverity::Medium,
            ErrorCategory::Cargo | ErrorCategory::Capacity => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::OverfillError { limit_kg, .. } => {
                format!("Load at most {} kg into this container", limit_kg)
            }
            Self::InvalidMassError { .. } => {
                "Cargo mass must be a finite, non-negative number of kilograms".to_string()
            }
            Self::InvalidShellError { .. } => {
                "Tare weight must be zero or more and capacity greater than zero".to_string()
            }
            Self::CapacityExceededError { ship, .. } => {
                format!("Remove containers from '{}' or choose a larger ship", ship)
            }
            Self::NotFoundError { ship, .. } => {
                format!("Check the serial numbers currently aboard '{}'", ship)
            }
            Self::ShipNotFoundError { .. } => "Check the ship names in the fleet".to_string(),
            Self::DuplicateShipError { .. } => "Give every ship a unique name".to_string(),
            Self::DuplicateContainerError { .. } => {
                "Serial numbers must be unique; issue a new one for this container".to_string()
            }
            Self::UnknownProductError { .. } => format!(
                "Use one of the known products: {}",
                crate::core::products::known_products().join(", ")
            ),
            Self::InvalidStateError { .. } => {
                "Unload the container before changing its product".to_string()
            }
            Self::InvalidSerialNumberError { .. } => {
                "Serial numbers look like KON-C-1, KON-L-2 or KON-G-3".to_string()
            }
            Self::IoError(_) => "Check that the file exists and is readable".to_string(),
            Self::SerializationError(_) => "Report this as a bug".to_string(),
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => {
                "Fix the configuration file and run again".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Cargo => format!("Cargo operation refused: {}", self),
            ErrorCategory::Capacity => format!("Ship capacity reached: {}", self),
            ErrorCategory::Lookup => format!("Lookup failed: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, FleetError>;
