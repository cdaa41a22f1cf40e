use crate::domain::model::{HazardReport, LoadOutcome};
use crate::utils::error::Result;

/// Capability to raise a hazard signal keyed by the emitter's serial number.
pub trait HazardNotifier {
    fn notify_hazard(&mut self, message: &str) -> HazardReport;
}

/// The load/unload contract every container variant fulfils with its own policy.
pub trait Cargo {
    fn load(&mut self, mass_kg: f64) -> Result<LoadOutcome>;
    fn unload(&mut self);
}
