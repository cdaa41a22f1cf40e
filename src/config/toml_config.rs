use crate::core::container::{Container, Shell};
use crate::core::fleet::Fleet;
use crate::core::ship::Ship;
use crate::domain::model::{CargoClass, SerialNumber};
use crate::domain::ports::Cargo;
use crate::utils::error::{FleetError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative_quantity, validate_positive_number,
    validate_positive_quantity, validate_range, validate_required_field, validate_unique,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Reefer settings outside this band are almost certainly typos.
const TEMPERATURE_RANGE_C: (f64, f64) = (-80.0, 60.0);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetConfig {
    pub fleet: FleetInfo,
    #[serde(default)]
    pub ships: Vec<ShipConfig>,
    #[serde(default)]
    pub containers: Vec<ContainerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipConfig {
    pub name: String,
    pub max_speed_knots: u32,
    pub max_container_count: usize,
    pub max_weight_tons: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerConfig {
    pub serial_number: String,
    pub kind: CargoClass,
    pub max_capacity_kg: f64,
    pub height_cm: u32,
    pub depth_cm: u32,
    pub own_weight_kg: f64,
    pub pressure: Option<f64>,
    pub product_type: Option<String>,
    pub temperature_c: Option<f64>,
    /// Ship to board; the container stays in the yard when absent.
    pub ship: Option<String>,
    /// Cargo loaded before boarding.
    pub load_kg: Option<f64>,
}

impl ContainerConfig {
    fn shell(&self) -> Shell {
        Shell::new(
            self.height_cm,
            self.depth_cm,
            self.own_weight_kg,
            self.max_capacity_kg,
        )
    }

    pub fn build(&self) -> Result<Container> {
        let field = |name: &str| format!("containers[{}].{}", self.serial_number, name);
        match self.kind {
            CargoClass::Liquid => Container::liquid(&self.serial_number, self.shell()),
            CargoClass::Gas => {
                let pressure = validate_required_field(&field("pressure"), &self.pressure)?;
                Container::gas(&self.serial_number, self.shell(), *pressure)
            }
            CargoClass::Refrigerated => {
                let product =
                    validate_required_field(&field("product_type"), &self.product_type)?;
                let temperature =
                    validate_required_field(&field("temperature_c"), &self.temperature_c)?;
                Container::refrigerated(&self.serial_number, self.shell(), product, *temperature)
            }
        }
    }

    fn validate_container(&self) -> Result<()> {
        let field = |name: &str| format!("containers[{}].{}", self.serial_number, name);

        SerialNumber::parse(&self.serial_number)?;
        validate_positive_quantity(&field("max_capacity_kg"), self.max_capacity_kg)?;
        validate_non_negative_quantity(&field("own_weight_kg"), self.own_weight_kg)?;
        if let Some(load_kg) = self.load_kg {
            validate_non_negative_quantity(&field("load_kg"), load_kg)?;
        }

        match self.kind {
            CargoClass::Liquid => {}
            CargoClass::Gas => {
                let pressure = validate_required_field(&field("pressure"), &self.pressure)?;
                validate_positive_quantity(&field("pressure"), *pressure)?;
            }
            CargoClass::Refrigerated => {
                let product =
                    validate_required_field(&field("product_type"), &self.product_type)?;
                validate_non_empty_string(&field("product_type"), product)?;
                let temperature =
                    validate_required_field(&field("temperature_c"), &self.temperature_c)?;
                validate_range(
                    &field("temperature_c"),
                    *temperature,
                    TEMPERATURE_RANGE_C.0,
                    TEMPERATURE_RANGE_C.1,
                )?;
            }
        }
        Ok(())
    }
}

impl FleetConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FleetError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FleetError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SHIP_NAME})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FleetError::ConfigError {
            message: format!("environment pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("fleet.name", &self.fleet.name)?;

        for ship in &self.ships {
            validate_non_empty_string("ships.name", &ship.name)?;
            validate_positive_number(
                &format!("ships[{}].max_container_count", ship.name),
                ship.max_container_count,
                1,
            )?;
            validate_positive_quantity(
                &format!("ships[{}].max_weight_tons", ship.name),
                ship.max_weight_tons,
            )?;
        }
        validate_unique("ships.name", self.ships.iter().map(|s| s.name.as_str()))?;

        for container in &self.containers {
            container.validate_container()?;
            if let Some(ship) = &container.ship {
                if !self.ships.iter().any(|s| &s.name == ship) {
                    return Err(FleetError::ConfigValidationError {
                        field: format!("containers[{}].ship", container.serial_number),
                        message: format!("ship '{}' is not declared in [[ships]]", ship),
                    });
                }
            }
        }
        validate_unique(
            "containers.serial_number",
            self.containers.iter().map(|c| c.serial_number.as_str()),
        )?;

        Ok(())
    }

    /// Builds the fleet: ships first, then every container is loaded, staged
    /// in the yard and boarded onto its ship if it names one.
    pub fn build_fleet(&self) -> Result<Fleet> {
        let mut fleet = Fleet::new(&self.fleet.name);
        for ship in &self.ships {
            fleet.add_ship(Ship::new(
                &ship.name,
                ship.max_speed_knots,
                ship.max_container_count,
                ship.max_weight_tons,
            ))?;
        }

        for config in &self.containers {
            let mut container = config.build()?;
            if let Some(load_kg) = config.load_kg {
                let outcome = container.load(load_kg)?;
                if !outcome.is_loaded() {
                    tracing::warn!(
                        "{} stays empty, its load of {} kg was refused",
                        config.serial_number,
                        load_kg
                    );
                }
            }
            fleet.stage_container(container)?;
            if let Some(ship) = &config.ship {
                fleet.board(&config.serial_number, ship)?;
            }
        }

        Ok(fleet)
    }
}

impl Validate for FleetConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
