//! # Presentation Rows and Advisories
//!
//! The data the presentation layer renders: labeled value rows and leveled
//! advisory messages. Assembler functions live with each calculator's
//! result type (`summary_rows()` / `advisories()`); this module only defines
//! the shared records so UI code never reaches into solver internals.

use serde::{Deserialize, Serialize};

/// One labeled row of a results panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Human-readable label (e.g., "Max bending moment")
    pub label: String,
    /// Formatted value
    pub value: String,
    /// Unit suffix, empty for dimensionless values
    pub unit: String,
}

impl SummaryRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>, unit: impl Into<String>) -> Self {
        SummaryRow {
            label: label.into(),
            value: value.into(),
            unit: unit.into(),
        }
    }

    /// Row with a numeric value rendered at the given precision
    pub fn number(label: impl Into<String>, value: f64, decimals: usize, unit: impl Into<String>) -> Self {
        SummaryRow::new(label, format!("{value:.decimals$}"), unit)
    }
}

/// Advisory severity, ordered from informational to blocking
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Caution,
    Critical,
}

/// A warning or note attached to a calculation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub severity: Severity,
    pub message: String,
}

impl Advisory {
    pub fn info(message: impl Into<String>) -> Self {
        Advisory {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn caution(message: impl Into<String>) -> Self {
        Advisory {
            severity: Severity::Caution,
            message: message.into(),
        }
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Advisory {
            severity: Severity::Critical,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_row_formatting() {
        let row = SummaryRow::number("Design current", 72.169, 1, "A");
        assert_eq!(row.value, "72.2");
        assert_eq!(row.unit, "A");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Caution);
        assert!(Severity::Caution < Severity::Critical);
    }

    #[test]
    fn test_advisory_serialization() {
        let adv = Advisory::caution("Voltage drop exceeds 4%");
        let json = serde_json::to_string(&adv).unwrap();
        let roundtrip: Advisory = serde_json::from_str(&json).unwrap();
        assert_eq!(adv, roundtrip);
    }
}
