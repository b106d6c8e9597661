//! # Voltage Drop & Cable Sizing
//!
//! Closed-form electrical calculator: design current from the load data,
//! resistive voltage drop for the chosen cable, and a comparison table over
//! the standard section series with ampacity and drop checks. No iteration
//! anywhere: this is direct substitution into the stated formulas, and it
//! serves as the regression baseline for the catalog's non-numeric
//! calculators.
//!
//! Formulas:
//!
//! ```text
//! Ib = P·1000 / (k·V·cosφ·η)      k = √3 (three-phase) or 1
//! ΔV = c·ρ·L·Ib / S               c = √3 (three-phase) or 2
//! ```
//!
//! Ampacities are derated by the tabulated grouping factor when more than
//! one circuit shares the run.

use serde::{Deserialize, Serialize};

use crate::catalog::{ampacity_for_section, breaker_for, grouping_factor, Conductor, CABLE_SECTIONS};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::summary::{Advisory, SummaryRow};

/// Advisory limit on the percentage voltage drop
pub const MAX_DROP_PCT: f64 = 4.0;

/// Supply system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Phase {
    SinglePhase,
    #[default]
    ThreePhase,
}

/// Input parameters for the voltage drop calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropInput {
    /// User label for this circuit
    pub label: String,

    /// Supply system (single- or three-phase)
    pub phase: Phase,

    /// Nominal voltage (V): line-to-line for three-phase
    pub voltage_v: f64,

    /// Active power of the load (kW)
    pub power_kw: f64,

    /// Power factor cosφ, in (0, 1]
    pub cos_phi: f64,

    /// Load efficiency η, in (0, 1]
    pub efficiency: f64,

    /// One-way cable run length (m)
    pub length_m: f64,

    /// Conductor material
    pub conductor: Conductor,

    /// Chosen cable section (mm²)
    pub section_mm2: f64,

    /// Circuits bundled in the same run; every ampacity is derated by the
    /// tabulated grouping factor
    #[serde(default = "default_circuits")]
    pub circuits_in_group: usize,
}

fn default_circuits() -> usize {
    1
}

impl VoltageDropInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("voltage_v", self.voltage_v)?;
        require_positive("power_kw", self.power_kw)?;
        require_positive("length_m", self.length_m)?;
        require_positive("section_mm2", self.section_mm2)?;
        for (field, value) in [("cos_phi", self.cos_phi), ("efficiency", self.efficiency)] {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Must be in (0, 1]",
                ));
            }
        }
        if grouping_factor(self.circuits_in_group).is_none() {
            return Err(CalcError::invalid_input(
                "circuits_in_group",
                self.circuits_in_group.to_string(),
                "Grouping factors are tabulated for 1 to 6 bundled circuits",
            ));
        }
        Ok(())
    }

    fn phase_factor(&self) -> f64 {
        match self.phase {
            Phase::ThreePhase => 3.0_f64.sqrt(),
            Phase::SinglePhase => 1.0,
        }
    }

    fn drop_factor(&self) -> f64 {
        match self.phase {
            Phase::ThreePhase => 3.0_f64.sqrt(),
            Phase::SinglePhase => 2.0,
        }
    }
}

/// One row of the cable comparison table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableOption {
    pub section_mm2: f64,
    pub ampacity_a: f64,
    pub drop_v: f64,
    pub drop_pct: f64,
    /// Iz ≥ Ib
    pub ampacity_ok: bool,
    /// Drop within [`MAX_DROP_PCT`]
    pub drop_ok: bool,
}

/// Results from the voltage drop calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropResult {
    /// Design current Ib (A)
    pub design_current_a: f64,

    /// Voltage drop for the chosen section (V)
    pub drop_v: f64,

    /// Voltage drop as a percentage of nominal
    pub drop_pct: f64,

    /// Grouping correction factor applied to every ampacity
    pub grouping_factor: f64,

    /// Derated ampacity Iz of the chosen section (A), when it is a standard
    /// section
    pub ampacity_a: Option<f64>,

    /// Smallest standard breaker with Ib ≤ In ≤ Iz, when one exists
    pub suggested_breaker_a: Option<f64>,

    /// Full catalog comparison table
    pub comparison: Vec<CableOption>,
}

impl VoltageDropResult {
    /// Labeled rows for the results panel
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        let mut rows = vec![
            SummaryRow::number("Design current Ib", self.design_current_a, 1, "A"),
            SummaryRow::number("Voltage drop", self.drop_v, 2, "V"),
            SummaryRow::number("Voltage drop", self.drop_pct, 2, "%"),
        ];
        if self.grouping_factor < 1.0 {
            rows.push(SummaryRow::number("Grouping factor", self.grouping_factor, 2, ""));
        }
        if let Some(iz) = self.ampacity_a {
            rows.push(SummaryRow::number("Cable ampacity Iz", iz, 1, "A"));
        }
        if let Some(breaker) = self.suggested_breaker_a {
            rows.push(SummaryRow::number("Suggested breaker In", breaker, 0, "A"));
        }
        rows
    }

    /// Warnings derived from the result
    pub fn advisories(&self) -> Vec<Advisory> {
        let mut out = Vec::new();
        if self.drop_pct > MAX_DROP_PCT {
            out.push(Advisory::caution(format!(
                "Voltage drop {:.2}% exceeds the {MAX_DROP_PCT}% guideline",
                self.drop_pct
            )));
        }
        if let Some(iz) = self.ampacity_a {
            if self.design_current_a > iz {
                out.push(Advisory::critical(format!(
                    "Design current {:.1} A exceeds the derated cable ampacity {iz:.1} A",
                    self.design_current_a
                )));
            }
        }
        if self.ampacity_a.is_some() && self.suggested_breaker_a.is_none() {
            out.push(Advisory::info(
                "No standard breaker rating fits between Ib and Iz for this cable",
            ));
        }
        out
    }
}

/// Run the voltage drop calculation.
pub fn calculate(input: &VoltageDropInput) -> CalcResult<VoltageDropResult> {
    input.validate()?;

    let ib = input.power_kw * 1000.0
        / (input.phase_factor() * input.voltage_v * input.cos_phi * input.efficiency);

    let rho = input.conductor.resistivity();
    let drop_for = |section: f64| input.drop_factor() * rho * input.length_m * ib / section;

    let drop_v = drop_for(input.section_mm2);
    let drop_pct = drop_v / input.voltage_v * 100.0;

    let factor = grouping_factor(input.circuits_in_group).unwrap_or(1.0);
    let ampacity_a = ampacity_for_section(input.section_mm2).map(|iz| iz * factor);
    let suggested_breaker_a = ampacity_a.and_then(|iz| breaker_for(ib, iz));

    let comparison = CABLE_SECTIONS
        .iter()
        .map(|cable| {
            let v = drop_for(cable.section_mm2);
            let pct = v / input.voltage_v * 100.0;
            let iz = cable.ampacity_a * factor;
            CableOption {
                section_mm2: cable.section_mm2,
                ampacity_a: iz,
                drop_v: v,
                drop_pct: pct,
                ampacity_ok: iz >= ib,
                drop_ok: pct <= MAX_DROP_PCT,
            }
        })
        .collect();

    Ok(VoltageDropResult {
        design_current_a: ib,
        drop_v,
        drop_pct,
        grouping_factor: factor,
        ampacity_a,
        suggested_breaker_a,
        comparison,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_circuit() -> VoltageDropInput {
        VoltageDropInput {
            label: "Motor feed".to_string(),
            phase: Phase::ThreePhase,
            voltage_v: 400.0,
            power_kw: 45.0,
            cos_phi: 0.9,
            efficiency: 0.95,
            length_m: 30.0,
            conductor: Conductor::Copper,
            section_mm2: 16.0,
            circuits_in_group: 1,
        }
    }

    #[test]
    fn test_three_phase_formulas_exact() {
        // Ib = P·1000/(√3·V·cosφ·η), ΔV = √3·ρ·L·Ib/S (bit-exact)
        let result = calculate(&test_circuit()).unwrap();
        let ib = 45.0 * 1000.0 / (3.0_f64.sqrt() * 400.0 * 0.9 * 0.95);
        let dv = 3.0_f64.sqrt() * 0.0178 * 30.0 * ib / 16.0;
        assert_eq!(result.design_current_a, ib);
        assert_eq!(result.drop_v, dv);
        assert_eq!(result.drop_pct, dv / 400.0 * 100.0);
    }

    #[test]
    fn test_single_phase_factors() {
        let mut input = test_circuit();
        input.phase = Phase::SinglePhase;
        input.voltage_v = 230.0;
        input.power_kw = 3.0;
        input.section_mm2 = 2.5;
        let result = calculate(&input).unwrap();
        let ib = 3000.0 / (230.0 * 0.9 * 0.95);
        let dv = 2.0 * 0.0178 * 30.0 * ib / 2.5;
        assert_eq!(result.design_current_a, ib);
        assert_eq!(result.drop_v, dv);
    }

    #[test]
    fn test_comparison_table_covers_catalog() {
        let result = calculate(&test_circuit()).unwrap();
        assert_eq!(result.comparison.len(), CABLE_SECTIONS.len());
        // Drop decreases with section
        for pair in result.comparison.windows(2) {
            assert!(pair[1].drop_v < pair[0].drop_v);
        }
        // 16 mm² carries Ib ≈ 75.9 A with Iz = 76 A
        let sixteen = result
            .comparison
            .iter()
            .find(|c| c.section_mm2 == 16.0)
            .unwrap();
        assert!(sixteen.ampacity_ok);
    }

    #[test]
    fn test_breaker_suggestion_respects_iz() {
        // Ib ≈ 75.9 A, Iz = 76 A: no standard rating fits in between
        let result = calculate(&test_circuit()).unwrap();
        assert_eq!(result.suggested_breaker_a, None);

        // On 25 mm² (Iz = 101 A) the 80 A breaker fits
        let mut input = test_circuit();
        input.section_mm2 = 25.0;
        let result = calculate(&input).unwrap();
        assert_eq!(result.suggested_breaker_a, Some(80.0));
    }

    #[test]
    fn test_nonstandard_section_has_no_ampacity() {
        let mut input = test_circuit();
        input.section_mm2 = 17.0;
        let result = calculate(&input).unwrap();
        assert_eq!(result.ampacity_a, None);
        assert_eq!(result.suggested_breaker_a, None);
    }

    #[test]
    fn test_drop_advisory() {
        let mut input = test_circuit();
        input.length_m = 300.0;
        input.section_mm2 = 4.0;
        let result = calculate(&input).unwrap();
        assert!(result.drop_pct > MAX_DROP_PCT);
        assert!(!result.advisories().is_empty());
    }

    #[test]
    fn test_grouping_derates_ampacity() {
        // Two bundled circuits: Iz = 76 * 0.8 = 60.8 A < Ib ≈ 75.9 A
        let mut input = test_circuit();
        input.circuits_in_group = 2;
        let result = calculate(&input).unwrap();
        assert_eq!(result.grouping_factor, 0.8);
        assert_eq!(result.ampacity_a, Some(76.0 * 0.8));
        assert!(result.design_current_a > 60.8);
        assert_eq!(result.suggested_breaker_a, None);
        assert!(result
            .advisories()
            .iter()
            .any(|a| a.severity == crate::summary::Severity::Critical));
        // The comparison table is derated too
        let sixteen = result
            .comparison
            .iter()
            .find(|c| c.section_mm2 == 16.0)
            .unwrap();
        assert!(!sixteen.ampacity_ok);
        // The drop itself is unaffected by grouping
        assert_eq!(result.drop_v, calculate(&test_circuit()).unwrap().drop_v);
    }

    #[test]
    fn test_invalid_grouping_count() {
        let mut input = test_circuit();
        input.circuits_in_group = 0;
        assert!(calculate(&input).is_err());
        input.circuits_in_group = 7;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_circuits_in_group_defaults_on_deserialize() {
        let json = serde_json::to_string(&test_circuit()).unwrap();
        let stripped = json.replace(",\"circuits_in_group\":1", "");
        let input: VoltageDropInput = serde_json::from_str(&stripped).unwrap();
        assert_eq!(input.circuits_in_group, 1);
    }

    #[test]
    fn test_invalid_power_factor() {
        let mut input = test_circuit();
        input.cos_phi = 1.2;
        assert!(calculate(&input).is_err());
        input.cos_phi = 0.0;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_idempotence() {
        let input = test_circuit();
        assert_eq!(calculate(&input).unwrap(), calculate(&input).unwrap());
    }
}
