//! Minimum storage temperatures for refrigerated cargo.
//!
//! Process-wide, read-only reference data. A refrigerated container set below
//! the listed temperature for its product refuses new cargo.

/// Product name and minimum required temperature in °C.
pub const PRODUCT_TEMPERATURES: &[(&str, f64)] = &[
    ("Bananas", 13.3),
    ("Chocolate", 18.0),
    ("Fish", 2.0),
    ("Meat", -15.0),
    ("Ice cream", -18.0),
    ("Frozen pizza", -30.0),
    ("Cheese", 7.2),
];

fn lookup(product_type: &str) -> Option<&'static (&'static str, f64)> {
    let wanted = product_type.trim();
    PRODUCT_TEMPERATURES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
}

/// Case-insensitive (ASCII) lookup of a product's minimum temperature.
pub fn required_temperature(product_type: &str) -> Option<f64> {
    lookup(product_type).map(|(_, temperature)| *temperature)
}

/// The table's spelling of a product, e.g. `" fish"` → `"Fish"`.
pub fn canonical_name(product_type: &str) -> Option<&'static str> {
    lookup(product_type).map(|(name, _)| *name)
}

pub fn is_known_product(product_type: &str) -> bool {
    required_temperature(product_type).is_some()
}

pub fn known_products() -> Vec<&'static str> {
    PRODUCT_TEMPERATURES.iter().map(|(name, _)| *name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("ICE CREAM"), Some("Ice cream"));
        assert_eq!(canonical_name(" fish"), Some("Fish"));
        assert_eq!(canonical_name("Tofu"), None);
    }

    #[test]
    fn test_required_temperature_lookup() {
        assert_eq!(required_temperature("Fish"), Some(2.0));
        assert_eq!(required_temperature("Frozen pizza"), Some(-30.0));
        assert_eq!(required_temperature("Cheese"), Some(7.2));
    }

    #[test]
    fn test_lookup_ignores_ascii_case() {
        assert_eq!(required_temperature("ice CREAM"), Some(-18.0));
        assert!(is_known_product(" bananas "));
    }

    #[test]
    fn test_unknown_product() {
        assert_eq!(required_temperature("Tofu"), None);
        assert!(!is_known_product(""));
    }

    #[test]
    fn test_known_products_lists_every_entry() {
        let names = known_products();
        assert_eq!(names.len(), 7);
        assert!(names.contains(&"Chocolate"));
    }
}
