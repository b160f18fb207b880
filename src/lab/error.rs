//! Calculation error types

use thiserror::Error;

/// Errors raised by the lab calculators
///
/// Every error is terminal for the call that produced it. Nothing is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabError {
    /// A numeric input was outside its allowed domain (e.g. non-positive MW)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A set of inputs was inconsistent (vector count, fragment stocks, volumes)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Standard-curve text could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A computation would divide by zero (flat standard curve, identical x values)
    #[error("Division by zero: {0}")]
    DivisionByZero(String),
}

/// Result type for lab calculations
pub type LabResult<T> = Result<T, LabError>;

/// Reject NaN and infinities before they leak into a result
pub(crate) fn require_finite(name: &str, value: f64) -> LabResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LabError::InvalidArgument(format!(
            "{} must be a finite number (got {})",
            name, value
        )))
    }
}

pub(crate) fn require_positive(name: &str, value: f64) -> LabResult<f64> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(LabError::InvalidArgument(format!(
            "{} must be greater than 0 (got {})",
            name, value
        )))
    }
}

pub(crate) fn require_non_negative(name: &str, value: f64) -> LabResult<f64> {
    require_finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(LabError::InvalidArgument(format!(
            "{} must not be negative (got {})",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("mw", 58.44), Ok(58.44));
        assert!(matches!(
            require_positive("mw", 0.0),
            Err(LabError::InvalidArgument(_))
        ));
        assert!(matches!(
            require_positive("mw", f64::NAN),
            Err(LabError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_require_non_negative_allows_zero() {
        assert_eq!(require_non_negative("mass", 0.0), Ok(0.0));
        assert!(require_non_negative("mass", -1.0).is_err());
        assert!(require_non_negative("mass", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_display_names_kind() {
        let err = LabError::ParseError("Line 3 is empty".to_string());
        assert_eq!(err.to_string(), "Parse error: Line 3 is empty");
    }
}
