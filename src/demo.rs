//! Built-in walk-through used when the binary runs without a scenario file.

use crate::core::container::{Container, Shell};
use crate::core::fleet::Fleet;
use crate::core::ship::Ship;
use crate::utils::error::{FleetError, Result};

pub const FIRST_SHIP: &str = "Aurora";
pub const SECOND_SHIP: &str = "Borealis";

fn ship<'a>(fleet: &'a Fleet, name: &str) -> Result<&'a Ship> {
    fleet.ship(name).ok_or_else(|| FleetError::ShipNotFoundError {
        ship: name.to_string(),
    })
}

/// Two ships, three containers: board them, try to load fish into a reefer
/// that is set too cold, move the gas container to the other ship, drop the
/// liquid one and swap the reefer for a chocolate container.
pub fn run_demo() -> Result<Fleet> {
    let mut fleet = Fleet::new("demo");
    fleet.add_ship(Ship::new(FIRST_SHIP, 20, 5, 100.0))?;
    fleet.add_ship(Ship::new(SECOND_SHIP, 15, 10, 150.0))?;

    let shell = |max_capacity_kg| Shell::new(2, 2, 2.0, max_capacity_kg);
    let containers = [
        Container::refrigerated("KON-C-001", shell(10.0), "Fish", 0.0)?,
        Container::liquid("KON-L-002", shell(15.0))?,
        Container::gas("KON-G-003", shell(20.0), 100.0)?,
    ];
    for container in containers {
        let serial = container.serial_number().to_string();
        fleet.stage_container(container)?;
        fleet.board(&serial, FIRST_SHIP)?;
    }
    tracing::info!("\n{}", ship(&fleet, FIRST_SHIP)?.describe());

    // 0°C is below the 2°C fish needs: hazard, nothing loaded
    let outcome = fleet.load_container(FIRST_SHIP, "KON-C-001", 5.0)?;
    tracing::info!("KON-C-001 load outcome: {:?}", outcome);
    tracing::info!(
        "{}",
        ship(&fleet, FIRST_SHIP)?.describe_container("KON-C-001")
    );

    fleet.transfer(FIRST_SHIP, SECOND_SHIP, "KON-G-003")?;
    fleet.remove_container(FIRST_SHIP, "KON-L-002")?;

    let chocolate = Container::refrigerated("KON-C-004", shell(12.0), "Chocolate", -18.0)?;
    fleet.replace_container(FIRST_SHIP, "KON-C-001", chocolate)?;

    Ok(fleet)
}
