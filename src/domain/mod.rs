// Domain layer: serial numbers, hazard reports, snapshots and the capability traits.
// No behavior here beyond parsing and formatting.

pub mod model;
pub mod ports;
