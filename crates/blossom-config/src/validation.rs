//! Validation errors and reusable field rules for `ConfigClass::validate`.

use std::fmt::Display;
use thiserror::Error;
use tracing::warn;

/// A configuration field that violates its schema rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Clamp `value` into `min..=max`, logging a warning when it had to move.
pub fn clamp_range<V>(field: &str, value: V, min: V, max: V) -> V
where
    V: PartialOrd + Copy + Display,
{
    if value < min {
        warn!("{} value {} is below minimum {}, clamping", field, value, min);
        min
    } else if value > max {
        warn!("{} value {} is above maximum {}, clamping", field, value, max);
        max
    } else {
        value
    }
}

/// Reject empty or whitespace-only strings.
pub fn ensure_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(())
}

/// Reject values outside a fixed set of choices.
pub fn ensure_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            format!("'{}' is not one of [{}]", value, allowed.join(", ")),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_range() {
        assert_eq!(clamp_range("volume", 200_u32, 0, 100), 100);
        assert_eq!(clamp_range("volume", 50_u32, 0, 100), 50);
        assert_eq!(clamp_range("offset", -5_i64, 0, 10), 0);
        assert!((clamp_range("ratio", 1.5_f64, 0.0, 1.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ensure_non_empty() {
        assert!(ensure_non_empty("name", "default").is_ok());
        assert!(ensure_non_empty("name", "").is_err());

        let error = ensure_non_empty("name", "   ").unwrap_err();
        assert_eq!(error.field, "name");
        assert_eq!(error.to_string(), "name: must not be empty");
    }

    #[test]
    fn test_ensure_one_of() {
        let allowed = ["low", "medium", "high"];
        assert!(ensure_one_of("quality", "medium", &allowed).is_ok());

        let error = ensure_one_of("quality", "ultra", &allowed).unwrap_err();
        assert_eq!(
            error.to_string(),
            "quality: 'ultra' is not one of [low, medium, high]"
        );
    }
}
