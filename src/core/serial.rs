use crate::domain::model::{CargoClass, SerialNumber};

/// Hands out `KON-<code>-<n>` serial numbers.
///
/// The number part is shared across cargo classes and only ever increases, so
/// no two numbers issued by one generator collide even across classes.
#[derive(Debug, Clone)]
pub struct SerialNumberGenerator {
    next: u64,
}

impl SerialNumberGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// Continues after the highest number already in use.
    pub fn after<'a, I>(existing: I) -> Self
    where
        I: IntoIterator<Item = &'a SerialNumber>,
    {
        let highest = existing.into_iter().map(SerialNumber::number).max();
        Self::starting_at(highest.map_or(1, |n| n.saturating_add(1)))
    }

    pub fn issue(&mut self, class: CargoClass) -> SerialNumber {
        let serial = SerialNumber::new(class, self.next);
        self.next = self.next.saturating_add(1);
        serial
    }
}

impl Default for SerialNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
