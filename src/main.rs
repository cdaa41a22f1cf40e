use clap::Parser;
use container_fleet::demo::run_demo;
use container_fleet::utils::error::ErrorSeverity;
use container_fleet::utils::{logger, validation::Validate};
use container_fleet::{CliConfig, Fleet, FleetConfig, FleetError};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("🚢 Starting container-fleet");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(&config) {
        Ok(Some(fleet)) => print_fleet(&fleet, config.json)?,
        Ok(None) => {}
        Err(e) => {
            tracing::error!(
                "❌ Scenario failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

/// `None` after a dry run, which stops once the scenario validates.
fn run(config: &CliConfig) -> Result<Option<Fleet>, FleetError> {
    let Some(path) = &config.config else {
        tracing::info!("📋 No scenario file given, running the built-in demo");
        return run_demo().map(Some);
    };

    tracing::info!("📁 Loading scenario from: {}", path);
    let scenario = FleetConfig::from_file(path)?;
    scenario.validate()?;
    tracing::info!(
        "✅ Scenario '{}' validated: {} ship(s), {} container(s)",
        scenario.fleet.name,
        scenario.ships.len(),
        scenario.containers.len()
    );

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing was loaded");
        return Ok(None);
    }

    scenario.build_fleet().map(Some)
}

fn print_fleet(fleet: &Fleet, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        let ships: Vec<_> = fleet.ships().iter().map(|s| s.snapshot()).collect();
        println!("{}", serde_json::to_string_pretty(&ships)?);
    } else {
        println!("{}", fleet.describe());
    }
    Ok(())
}
