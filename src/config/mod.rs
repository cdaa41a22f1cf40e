pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_non_empty_string, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "container-fleet")]
#[command(about = "Load containers onto ships under cargo safety and capacity rules")]
pub struct CliConfig {
    /// TOML scenario file; the built-in demo runs when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit log lines as JSON")]
    pub log_json: bool,

    #[arg(long, help = "Print the final ships as JSON instead of text")]
    pub json: bool,

    /// Validate the scenario file without running it
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_non_empty_string("config", path)?;
        } else if self.dry_run {
            return Err(crate::utils::error::FleetError::MissingConfigError {
                field: "config".to_string(),
            });
        }
        Ok(())
    }
}
