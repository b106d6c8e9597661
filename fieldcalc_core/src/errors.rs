//! # Error Types
//!
//! Structured error types for fieldcalc_core. Each variant carries enough
//! context to tell the user which field to fix and why, and serializes to
//! clean JSON for non-Rust consumers.
//!
//! Two failure classes are deliberately kept apart (see the calculator
//! modules): malformed input is an `Err(CalcError)` raised before any
//! numerics run, while a well-formed load case with no physical solution is
//! reported through the calculator's own outcome enum, not through this type.
//!
//! ## Example
//!
//! ```rust
//! use fieldcalc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_span(span_m: f64) -> CalcResult<()> {
//!     if span_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "span_m",
//!             span_m.to_string(),
//!             "Span must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for fieldcalc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculator operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-finite, wrong sign)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing (e.g., fewer than two known electrical quantities)
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Catalog lookup failed (unknown cable section, material class, etc.)
    #[error("Not in catalog: {item}")]
    NotInCatalog { item: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a NotInCatalog error
    pub fn not_in_catalog(item: impl Into<String>) -> Self {
        CalcError::NotInCatalog { item: item.into() }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::NotInCatalog { .. } => "NOT_IN_CATALOG",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

/// Validate that a value is finite and strictly positive.
///
/// Shared guard used by every calculator's `validate()`.
pub fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Must be a finite positive number",
        ));
    }
    Ok(())
}

/// Validate that a value is finite and non-negative.
pub fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Must be a finite non-negative number",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("span_m", "-5.0", "Span must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::missing_field("voltage_v").error_code(),
            "MISSING_FIELD"
        );
        assert_eq!(
            CalcError::not_in_catalog("S=17mm2").error_code(),
            "NOT_IN_CATALOG"
        );
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("x", 1.0).is_ok());
        assert!(require_positive("x", 0.0).is_err());
        assert!(require_positive("x", f64::NAN).is_err());
        assert!(require_positive("x", f64::INFINITY).is_err());
    }

    #[test]
    fn test_require_non_negative() {
        assert!(require_non_negative("w", 0.0).is_ok());
        assert!(require_non_negative("w", -0.1).is_err());
    }
}
