use crate::utils::error::{FleetError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(FleetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Masses, pressures and tonnages: finite and strictly greater than zero.
pub fn validate_positive_quantity(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(FleetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number greater than zero".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_negative_quantity(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(FleetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number, zero or greater".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| FleetError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FleetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_unique<'a, I>(field_name: &str, values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(FleetError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.to_string(),
                reason: "Value appears more than once".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(FleetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("ships.max_container_count", 5, 1).is_ok());
        assert!(validate_positive_number("ships.max_container_count", 0, 1).is_err());
    }

    #[test]
    fn test_validate_positive_quantity() {
        assert!(validate_positive_quantity("ships.max_weight_tons", 100.0).is_ok());
        assert!(validate_positive_quantity("ships.max_weight_tons", 0.0).is_err());
        assert!(validate_positive_quantity("ships.max_weight_tons", -3.0).is_err());
        assert!(validate_positive_quantity("ships.max_weight_tons", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_non_negative_quantity() {
        assert!(validate_non_negative_quantity("containers.load_kg", 0.0).is_ok());
        assert!(validate_non_negative_quantity("containers.load_kg", -0.5).is_err());
        assert!(validate_non_negative_quantity("containers.load_kg", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_unique() {
        assert!(validate_unique("ships.name", ["Aurora", "Borealis"]).is_ok());
        let err = validate_unique("ships.name", ["Aurora", "Aurora"]).unwrap_err();
        assert!(matches!(err, FleetError::InvalidConfigValueError { value, .. } if value == "Aurora"));
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(2.5);
        let absent: Option<f64> = None;
        assert_eq!(*validate_required_field("containers.pressure", &present).unwrap(), 2.5);
        assert!(matches!(
            validate_required_field("containers.pressure", &absent),
            Err(FleetError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("containers.temperature_c", -18.0, -60.0, 40.0).is_ok());
        assert!(validate_range("containers.temperature_c", -90.0, -60.0, 40.0).is_err());
    }
}
