use crate::core::products;
use crate::utils::error::{FleetError, Result};
use std::collections::BTreeMap;

/// Product, set temperature and per-product load ledger of a refrigerated container.
///
/// The ledger only grows. Unloading the container zeroes its cargo mass but
/// leaves these totals in place.
#[derive(Debug, Clone, PartialEq)]
pub struct RefrigeratedState {
    product_type: String,
    temperature_c: f64,
    load_ledger: BTreeMap<String, f64>,
}

pub(crate) enum Admission {
    Accept,
    TooCold { required_c: f64 },
}

/// Known products are keyed by their table name so spellings like "fish" and
/// "Fish" share one entry.
fn ledger_key(product_type: &str) -> String {
    products::canonical_name(product_type)
        .unwrap_or(product_type)
        .to_string()
}

impl RefrigeratedState {
    pub(crate) fn new(product_type: impl Into<String>, temperature_c: f64) -> Self {
        Self {
            product_type: product_type.into(),
            temperature_c,
            load_ledger: BTreeMap::new(),
        }
    }

    pub fn product_type(&self) -> &str {
        &self.product_type
    }

    pub fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    /// Minimum temperature for the current product, if the product is known.
    pub fn required_temperature(&self) -> Option<f64> {
        products::required_temperature(&self.product_type)
    }

    pub fn is_temperature_sufficient(&self, required_temperature_c: f64) -> bool {
        self.temperature_c >= required_temperature_c
    }

    pub fn load_ledger(&self) -> &BTreeMap<String, f64> {
        &self.load_ledger
    }

    /// Total loaded under `product_type`, matched the same way as the product table.
    pub fn ledger_total(&self, product_type: &str) -> f64 {
        self.load_ledger
            .get(ledger_key(product_type).as_str())
            .copied()
            .unwrap_or(0.0)
    }

    pub(crate) fn admission(&self) -> Result<Admission> {
        let required_c =
            self.required_temperature()
                .ok_or_else(|| FleetError::UnknownProductError {
                    product_type: self.product_type.clone(),
                })?;

        if self.is_temperature_sufficient(required_c) {
            Ok(Admission::Accept)
        } else {
            Ok(Admission::TooCold { required_c })
        }
    }

    pub(crate) fn record_load(&mut self, mass_kg: f64) {
        *self
            .load_ledger
            .entry(ledger_key(&self.product_type))
            .or_insert(0.0) += mass_kg;
    }

    pub(crate) fn repurpose(&mut self, product_type: String, temperature_c: f64) {
        self.product_type = product_type;
        self.temperature_c = temperature_c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_uses_table_spelling() {
        let mut state = RefrigeratedState::new("fish", 5.0);
        state.record_load(10.0);
        state.repurpose("FISH".to_string(), 5.0);
        state.record_load(2.5);

        assert_eq!(state.load_ledger().len(), 1);
        assert_eq!(state.load_ledger().get("Fish"), Some(&12.5));
        assert_eq!(state.ledger_total("Fish"), 12.5);
        assert_eq!(state.ledger_total("fish"), 12.5);
    }

    #[test]
    fn test_temperature_sufficiency_is_inclusive() {
        let state = RefrigeratedState::new("Fish", 2.0);
        assert!(state.is_temperature_sufficient(2.0));
        assert!(state.is_temperature_sufficient(-5.0));
        assert!(!state.is_temperature_sufficient(2.1));
    }

    #[test]
    fn test_admission_for_cold_and_warm_settings() {
        let cold = RefrigeratedState::new("Fish", 0.0);
        assert!(matches!(
            cold.admission().unwrap(),
            Admission::TooCold { required_c } if required_c == 2.0
        ));

        let warm = RefrigeratedState::new("Fish", 4.0);
        assert!(matches!(warm.admission().unwrap(), Admission::Accept));
    }

    #[test]
    fn test_admission_unknown_product() {
        let state = RefrigeratedState::new("Tofu", 5.0);
        assert!(matches!(
            state.admission(),
            Err(FleetError::UnknownProductError { product_type }) if product_type == "Tofu"
        ));
    }

    #[test]
    fn test_ledger_accumulates_per_product() {
        let mut state = RefrigeratedState::new("Meat", -10.0);
        state.record_load(3.0);
        state.record_load(1.5);
        state.repurpose("Cheese".to_string(), 8.0);
        state.record_load(2.0);

        assert_eq!(state.ledger_total("Meat"), 4.5);
        assert_eq!(state.ledger_total("Cheese"), 2.0);
        assert_eq!(state.ledger_total("Fish"), 0.0);
        assert_eq!(state.load_ledger().len(), 2);
    }
}
