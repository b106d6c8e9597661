//! # Calculators
//!
//! Each calculator follows the same pattern:
//!
//! - `*Input` - input parameters (JSON-serializable)
//! - `*Result` - calculation results (JSON-serializable)
//! - `calculate(&input) -> CalcResult<...>` - pure function, recomputed
//!   from scratch on every call
//!
//! The iterative calculators ([`rc_section`], [`column`]) additionally
//! distinguish non-convergence from invalid input through tagged outcome
//! types; see [`crate::errors`] for the taxonomy.
//!
//! ## Available Calculators
//!
//! - [`beam`] - simply-supported beam shear/moment/deflection
//! - [`rc_section`] - RC section capacity by neutral-axis bisection
//! - [`column`] - biaxial column capacity with Bresler interaction
//! - [`voltage_drop`] - voltage drop and cable/breaker sizing
//! - [`ohms_law`] - two-of-four electrical quantity solver

pub mod beam;
pub mod column;
pub mod ohms_law;
pub mod rc_section;
pub mod section;
pub mod voltage_drop;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use beam::{BeamInput, BeamResult, PointLoad};
pub use column::{BarPoint, ColumnInput, ColumnResult};
pub use ohms_law::{OhmsLawInput, OhmsLawResult};
pub use rc_section::{RcSectionInput, RcSectionResult, SectionOutcome};
pub use voltage_drop::{VoltageDropInput, VoltageDropResult};

/// Enum wrapper for all calculation types.
///
/// Lets heterogeneous calculations live in a single collection with clean
/// tagged serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Simply-supported beam analysis
    Beam(BeamInput),
    /// RC section capacity check
    RcSection(RcSectionInput),
    /// Biaxial column capacity check
    Column(ColumnInput),
    /// Voltage drop and cable sizing
    VoltageDrop(VoltageDropInput),
    /// Ohm's law solver
    OhmsLaw(OhmsLawInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Beam(b) => &b.label,
            CalculationItem::RcSection(s) => &s.label,
            CalculationItem::Column(c) => &c.label,
            CalculationItem::VoltageDrop(v) => &v.label,
            CalculationItem::OhmsLaw(o) => &o.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Beam(_) => "Beam",
            CalculationItem::RcSection(_) => "RC Section",
            CalculationItem::Column(_) => "Column",
            CalculationItem::VoltageDrop(_) => "Voltage Drop",
            CalculationItem::OhmsLaw(_) => "Ohm's Law",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_serialization() {
        let item = CalculationItem::OhmsLaw(OhmsLawInput {
            label: "Lamp".to_string(),
            voltage_v: Some(230.0),
            resistance_ohm: Some(529.0),
            ..Default::default()
        });
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"type\":\"OhmsLaw\""));
        let roundtrip: CalculationItem = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.label(), "Lamp");
        assert_eq!(roundtrip.calc_type(), "Ohm's Law");
    }
}
