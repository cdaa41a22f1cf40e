use anyhow::Result;
use container_fleet::demo::{run_demo, FIRST_SHIP, SECOND_SHIP};
use container_fleet::utils::validation::Validate;
use container_fleet::{FleetConfig, Location};
use tempfile::TempDir;

#[test]
fn test_scenario_file_end_to_end() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("fleet.toml");

    let config_content = r#"
[fleet]
name = "harbour-run"
description = "two ships, three containers"

[[ships]]
name = "Aurora"
max_speed_knots = 20
max_container_count = 5
max_weight_tons = 100.0

[[ships]]
name = "Borealis"
max_speed_knots = 15
max_container_count = 10
max_weight_tons = 150.0

[[containers]]
serial_number = "KON-C-001"
kind = "refrigerated"
max_capacity_kg = 10.0
height_cm = 2
depth_cm = 2
own_weight_kg = 2.0
product_type = "Fish"
temperature_c = 4.0
ship = "Aurora"
load_kg = 5.0

[[containers]]
serial_number = "KON-G-003"
kind = "gas"
max_capacity_kg = 20.0
height_cm = 2
depth_cm = 2
own_weight_kg = 2.0
pressure = 100.0
ship = "Borealis"
load_kg = 20.0

[[containers]]
serial_number = "KON-L-002"
kind = "liquid"
max_capacity_kg = 15.0
height_cm = 2
depth_cm = 2
own_weight_kg = 2.0
"#;
    std::fs::write(&config_path, config_content)?;

    let config = FleetConfig::from_file(&config_path)?;
    config.validate()?;
    let fleet = config.build_fleet()?;

    let aurora = fleet.ship("Aurora").expect("Aurora");
    assert_eq!(aurora.container("KON-C-001").map(|c| c.cargo_mass_kg()), Some(5.0));
    assert_eq!(aurora.total_weight_kg(), 7.0);

    let borealis = fleet.ship("Borealis").expect("Borealis");
    assert_eq!(borealis.total_weight_kg(), 22.0);

    assert!(matches!(fleet.locate("KON-L-002"), Some((Location::Yard, _))));

    let json = serde_json::to_value(aurora.snapshot())?;
    assert_eq!(json["containers"][0]["kind"], "refrigerated");
    assert_eq!(json["containers"][0]["load_ledger"]["Fish"], 5.0);
    Ok(())
}

#[test]
fn test_scenario_overfill_aborts_build() -> Result<()> {
    let config = FleetConfig::from_toml_str(
        r#"
[fleet]
name = "overfill"

[[containers]]
serial_number = "KON-L-1"
kind = "liquid"
max_capacity_kg = 10.0
height_cm = 2
depth_cm = 2
own_weight_kg = 2.0
load_kg = 9.5
"#,
    )?;
    config.validate()?;

    let err = config.build_fleet().unwrap_err();
    assert!(matches!(
        err,
        container_fleet::FleetError::OverfillError { .. }
    ));
    Ok(())
}

#[test]
fn test_built_in_demo_runs() -> Result<()> {
    let fleet = run_demo()?;

    let first = fleet.ship(FIRST_SHIP).expect("first ship");
    assert_eq!(first.len(), 1);
    assert!(first.contains("KON-C-004"));

    let second = fleet.ship(SECOND_SHIP).expect("second ship");
    assert_eq!(second.len(), 1);
    assert!(second.contains("KON-G-003"));
    Ok(())
}
