//! Validation Utilities
//!
//! Pure validation logic for planner inputs.
//! No IO dependencies.

use crate::error::{ModelError, Result};

/// Validate a hardware unit name
///
/// Rules:
/// - Length: 1-64 characters
/// - Characters: alphanumeric, underscore (_), hyphen (-), dot (.)
/// - Cannot contain path traversal sequences (..)
///
/// # Examples
/// ```
/// use ioplan_model::validate_unit_name;
///
/// assert!(validate_unit_name("SYM400b").is_ok());
/// assert!(validate_unit_name("XM-90").is_ok());
/// assert!(validate_unit_name("bad name").is_err());
/// assert!(validate_unit_name("").is_err());
/// ```
pub fn validate_unit_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ModelError::InvalidUnitName(
            "Unit name cannot be empty".to_string(),
        ));
    }
    if name.len() > 64 {
        return Err(ModelError::InvalidUnitName(format!(
            "Unit name too long ({} characters). Maximum length is 64 characters.",
            name.len()
        )));
    }

    if name.contains("..") {
        return Err(ModelError::InvalidUnitName(format!(
            "Unit name contains path traversal characters: '{}'",
            name
        )));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        return Err(ModelError::InvalidUnitName(format!(
            "Unit name can only contain letters, numbers, underscores, hyphens, and dots. Invalid name: '{}'",
            name
        )));
    }

    Ok(())
}

/// Validate a headroom fraction (must be within `[0, 1]`)
pub fn validate_headroom_fraction(fraction: f64) -> Result<()> {
    if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
        return Err(ModelError::validation(format!(
            "Headroom must be between 0 and 1, got {}",
            fraction
        )));
    }
    Ok(())
}

/// Validate a headroom percentage (must be within `[0, 100]`)
pub fn validate_headroom_percent(percent: f64) -> Result<()> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(ModelError::validation(format!(
            "Headroom percentage must be between 0 and 100, got {}",
            percent
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_unit_names() {
        assert!(validate_unit_name("SYM210").is_ok());
        assert!(validate_unit_name("UC600").is_ok());
        assert!(validate_unit_name("xm_30").is_ok());
        assert!(validate_unit_name("IO-8.2").is_ok());
    }

    #[test]
    fn test_invalid_unit_names() {
        assert!(validate_unit_name("").is_err());
        assert!(validate_unit_name("XM 30").is_err());
        assert!(validate_unit_name("a+b").is_err());
        assert!(validate_unit_name("../etc").is_err());

        let long_name = "a".repeat(65);
        assert!(validate_unit_name(&long_name).is_err());
    }

    #[test]
    fn test_headroom_bounds() {
        assert!(validate_headroom_fraction(0.0).is_ok());
        assert!(validate_headroom_fraction(1.0).is_ok());
        assert!(validate_headroom_fraction(1.5).is_err());
        assert!(validate_headroom_fraction(f64::INFINITY).is_err());
        assert!(validate_headroom_percent(42.5).is_ok());
        assert!(validate_headroom_percent(-1.0).is_err());
    }
}
