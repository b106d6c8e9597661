//! # Simply-Supported Beam Analysis
//!
//! Shear, bending moment and elastic deflection along a simply-supported
//! beam carrying a uniform load plus an arbitrary list of point loads.
//!
//! ## Method
//!
//! Support reactions come from statics. The span is discretized into
//! [`SEGMENTS`] equal segments and marched left to right: shear decreases
//! linearly under the distributed load and drops by each point-load
//! magnitude at its node (a sorted-pointer sweep, loads snapped to node
//! boundaries). Moment is the trapezoidal integral of shear; curvature is
//! M/EI; two further trapezoidal integrations give slope and deflection.
//! A rigid-body ramp is then subtracted so deflection is exactly zero at
//! both supports, which enforces the boundary condition that the
//! unconstrained integration from x = 0 cannot know about.
//!
//! ## Sign Convention
//!
//! - Positive shear: left side up
//! - Positive moment: sagging (tension on the bottom fiber)
//! - Deflection diagrams keep the raw integration sign (sagging comes out
//!   negative); reported maxima are magnitudes
//!
//! ## Units
//!
//! Inputs in engineering units (m, GPa, cm⁴, kN, kN/m); the curvature chain
//! runs in SI through [`crate::units`]; deflections are reported in mm.
//!
//! ## Example
//!
//! ```rust
//! use fieldcalc_core::calculations::beam::{BeamInput, PointLoad, calculate};
//!
//! let input = BeamInput {
//!     label: "B-1".to_string(),
//!     span_m: 6.0,
//!     e_gpa: 210.0,
//!     i_cm4: 8500.0,
//!     uniform_kn_m: 12.0,
//!     point_loads: vec![PointLoad { magnitude_kn: 10.0, position_m: 2.0 }],
//!     section_modulus_cm3: None,
//!     yield_mpa: None,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!(result.max_moment_knm > 54.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};
use crate::numeric::cumulative_trapezoid;
use crate::summary::{Advisory, SummaryRow};
use crate::units::{cm3_to_mm3, cm4_to_m4, gpa_to_pa, knm_to_nm, knm_to_nmm, m_to_mm};

/// Number of equal segments the span is discretized into.
///
/// Fixed, not tunable: 400 segments keep the trapezoidal deflection within
/// 1% of the closed-form references at negligible cost, and the accuracy
/// statements in the tests are calibrated against exactly this count.
pub const SEGMENTS: usize = 400;

/// Deflection advisory threshold as a span ratio (L/250 serviceability)
const DEFLECTION_SPAN_RATIO_LIMIT: f64 = 250.0;

/// A concentrated load on the beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    /// Load magnitude (kN), positive downward
    pub magnitude_kn: f64,
    /// Distance from the left support (m); clamped into `[0, span]`
    pub position_m: f64,
}

/// Input parameters for the beam calculator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "B-1",
///   "span_m": 6.0,
///   "e_gpa": 210.0,
///   "i_cm4": 8500.0,
///   "uniform_kn_m": 12.0,
///   "point_loads": [ { "magnitude_kn": 10.0, "position_m": 2.0 } ],
///   "section_modulus_cm3": 904.0,
///   "yield_mpa": 275.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamInput {
    /// User label for this beam (e.g., "B-1")
    pub label: String,

    /// Clear span (m)
    pub span_m: f64,

    /// Elastic modulus (GPa)
    pub e_gpa: f64,

    /// Second moment of area (cm⁴)
    pub i_cm4: f64,

    /// Uniformly distributed load over the full span (kN/m)
    pub uniform_kn_m: f64,

    /// Concentrated loads; order and duplicates are irrelevant
    pub point_loads: Vec<PointLoad>,

    /// Elastic section modulus (cm³); enables the flexural stress check
    pub section_modulus_cm3: Option<f64>,

    /// Yield strength (MPa) for the stress utilization, used with the
    /// section modulus
    pub yield_mpa: Option<f64>,
}

impl BeamInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("span_m", self.span_m)?;
        require_positive("e_gpa", self.e_gpa)?;
        require_positive("i_cm4", self.i_cm4)?;
        require_non_negative("uniform_kn_m", self.uniform_kn_m)?;
        for (i, load) in self.point_loads.iter().enumerate() {
            if !load.magnitude_kn.is_finite() || !load.position_m.is_finite() {
                return Err(CalcError::invalid_input(
                    format!("point_loads[{i}]"),
                    format!("{load:?}"),
                    "Load magnitude and position must be finite",
                ));
            }
        }
        if let Some(w) = self.section_modulus_cm3 {
            require_positive("section_modulus_cm3", w)?;
        }
        if let Some(fy) = self.yield_mpa {
            require_positive("yield_mpa", fy)?;
        }
        Ok(())
    }

    /// Point loads as the integrator consumes them: positions clamped into
    /// the span, zero magnitudes dropped, sorted by position.
    fn effective_loads(&self) -> Vec<PointLoad> {
        let mut loads: Vec<PointLoad> = self
            .point_loads
            .iter()
            .filter(|p| p.magnitude_kn != 0.0)
            .map(|p| PointLoad {
                magnitude_kn: p.magnitude_kn,
                position_m: p.position_m.clamp(0.0, self.span_m),
            })
            .collect();
        loads.sort_by(|a, b| a.position_m.total_cmp(&b.position_m));
        loads
    }
}

/// Results from the beam calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamResult {
    /// Left support reaction (kN), positive upward
    pub reaction_left_kn: f64,
    /// Right support reaction (kN), positive upward
    pub reaction_right_kn: f64,

    /// Maximum shear magnitude (kN) and its position (m)
    pub max_shear_kn: f64,
    pub max_shear_position_m: f64,

    /// Maximum moment magnitude (kN·m) and its position (m)
    pub max_moment_knm: f64,
    pub max_moment_position_m: f64,

    /// Maximum deflection magnitude (mm) and its position (m)
    pub max_deflection_mm: f64,
    pub max_deflection_position_m: f64,

    /// Span-to-deflection ratio L/δ (∞-free: f64::MAX when δ = 0)
    pub span_over_deflection: f64,

    /// Sampled shear values (x in m, V in kN) at all nodes
    pub shear_diagram: Vec<(f64, f64)>,
    /// Sampled moment values (x in m, M in kN·m)
    pub moment_diagram: Vec<(f64, f64)>,
    /// Sampled deflection values (x in m, δ in mm, positive up)
    pub deflection_diagram: Vec<(f64, f64)>,

    /// Flexural stress M/W (MPa), when a section modulus was supplied
    pub bending_stress_mpa: Option<f64>,
    /// Stress utilization against yield (%), when both W and fy were supplied
    pub stress_utilization_pct: Option<f64>,
}

impl BeamResult {
    /// Labeled rows for the results panel
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        let mut rows = vec![
            SummaryRow::number("Reaction at left support", self.reaction_left_kn, 2, "kN"),
            SummaryRow::number("Reaction at right support", self.reaction_right_kn, 2, "kN"),
            SummaryRow::number("Max shear", self.max_shear_kn, 2, "kN"),
            SummaryRow::number("Max bending moment", self.max_moment_knm, 2, "kN·m"),
            SummaryRow::number("Max deflection", self.max_deflection_mm, 2, "mm"),
            SummaryRow::number("Span / deflection", self.span_over_deflection, 0, ""),
        ];
        if let Some(sigma) = self.bending_stress_mpa {
            rows.push(SummaryRow::number("Bending stress", sigma, 1, "MPa"));
        }
        if let Some(util) = self.stress_utilization_pct {
            rows.push(SummaryRow::number("Stress utilization", util, 1, "%"));
        }
        rows
    }

    /// Warnings derived from the result
    pub fn advisories(&self) -> Vec<Advisory> {
        let mut out = Vec::new();
        if self.span_over_deflection < DEFLECTION_SPAN_RATIO_LIMIT {
            out.push(Advisory::caution(format!(
                "Deflection L/{:.0} exceeds the L/{:.0} serviceability guideline",
                self.span_over_deflection, DEFLECTION_SPAN_RATIO_LIMIT
            )));
        }
        if let Some(util) = self.stress_utilization_pct {
            if util > 100.0 {
                out.push(Advisory::critical(format!(
                    "Bending stress exceeds yield ({util:.0}% utilization)"
                )));
            }
        }
        out
    }
}

/// Run the beam analysis.
///
/// Pure function: identical inputs yield bit-identical results.
///
/// # Returns
///
/// * `Ok(BeamResult)` - diagrams, maxima and optional stress check
/// * `Err(CalcError)` - if span, E or I are non-positive or any value is
///   non-finite (the "no result" outcome; nothing is computed)
pub fn calculate(input: &BeamInput) -> CalcResult<BeamResult> {
    input.validate()?;

    let span = input.span_m;
    let w = input.uniform_kn_m;
    let loads = input.effective_loads();

    // Reactions by statics: ΣM about the right support for R1, ΣF for R2
    let total_point_kn: f64 = loads.iter().map(|p| p.magnitude_kn).sum();
    let reaction_left_kn = w * span / 2.0
        + loads
            .iter()
            .map(|p| p.magnitude_kn * (span - p.position_m) / span)
            .sum::<f64>();
    let reaction_right_kn = w * span + total_point_kn - reaction_left_kn;

    let dx = span / SEGMENTS as f64;
    let snap = dx * 1e-6;

    // Shear sweep: start at R1, shed the distributed load linearly and drop
    // each point load at the first node at-or-after its position
    let mut shear = Vec::with_capacity(SEGMENTS + 1);
    let mut v = reaction_left_kn;
    let mut next = 0;
    while next < loads.len() && loads[next].position_m <= snap {
        v -= loads[next].magnitude_kn;
        next += 1;
    }
    shear.push(v);
    for i in 1..=SEGMENTS {
        let x = dx * i as f64;
        v -= w * dx;
        while next < loads.len() && loads[next].position_m <= x + snap {
            v -= loads[next].magnitude_kn;
            next += 1;
        }
        shear.push(v);
    }

    // Moment from shear (kN·m), then the curvature chain in SI
    let moment = cumulative_trapezoid(&shear, dx);

    let ei = gpa_to_pa(input.e_gpa) * cm4_to_m4(input.i_cm4);
    let curvature: Vec<f64> = moment.iter().map(|&m| knm_to_nm(m) / ei).collect();
    let slope = cumulative_trapezoid(&curvature, dx);
    let deflection_raw = cumulative_trapezoid(&slope, dx);

    // Rigid-body correction: subtract the linear ramp through the support
    // values so δ(0) = δ(L) = 0 exactly
    let end = deflection_raw[SEGMENTS];
    let deflection: Vec<f64> = deflection_raw
        .iter()
        .enumerate()
        .map(|(i, &d)| d - end * (i as f64 / SEGMENTS as f64))
        .collect();

    // Maxima by magnitude
    let (max_shear_kn, max_shear_position_m) = peak_abs(&shear, dx);
    let (max_moment_knm, max_moment_position_m) = peak_abs(&moment, dx);
    let (max_deflection_m, max_deflection_position_m) = peak_abs(&deflection, dx);
    let max_deflection_mm = m_to_mm(max_deflection_m);

    let span_over_deflection = if max_deflection_m > 0.0 {
        span / max_deflection_m
    } else {
        f64::MAX
    };

    // Optional flexural check: σ = M/W in MPa (N/mm²)
    let bending_stress_mpa = input
        .section_modulus_cm3
        .map(|w_cm3| knm_to_nmm(max_moment_knm) / cm3_to_mm3(w_cm3));
    let stress_utilization_pct = match (bending_stress_mpa, input.yield_mpa) {
        (Some(sigma), Some(fy)) => Some(sigma / fy * 100.0),
        _ => None,
    };

    let to_diagram = |values: &[f64], scale: f64| -> Vec<(f64, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(i, &y)| (dx * i as f64, y * scale))
            .collect()
    };

    Ok(BeamResult {
        reaction_left_kn,
        reaction_right_kn,
        max_shear_kn,
        max_shear_position_m,
        max_moment_knm,
        max_moment_position_m,
        max_deflection_mm,
        max_deflection_position_m,
        span_over_deflection,
        shear_diagram: to_diagram(&shear, 1.0),
        moment_diagram: to_diagram(&moment, 1.0),
        deflection_diagram: to_diagram(&deflection, 1.0e3),
        bending_stress_mpa,
        stress_utilization_pct,
    })
}

/// Largest absolute sample and its position for uniformly spaced samples
fn peak_abs(samples: &[f64], dx: f64) -> (f64, f64) {
    let mut best = 0.0_f64;
    let mut best_pos = 0.0;
    for (i, &s) in samples.iter().enumerate() {
        if s.abs() > best {
            best = s.abs();
            best_pos = dx * i as f64;
        }
    }
    (best, best_pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_beam() -> BeamInput {
        BeamInput {
            label: "Test".to_string(),
            span_m: 6.0,
            e_gpa: 210.0,
            i_cm4: 8500.0,
            uniform_kn_m: 12.0,
            point_loads: Vec::new(),
            section_modulus_cm3: None,
            yield_mpa: None,
        }
    }

    fn rel_eq(a: f64, b: f64, tol: f64) -> bool {
        if b.abs() < 1e-12 {
            a.abs() < tol
        } else {
            ((a - b) / b).abs() < tol
        }
    }

    #[test]
    fn test_uniform_reactions() {
        // R = wL/2 = 12 * 6 / 2 = 36 kN each
        let result = calculate(&uniform_beam()).unwrap();
        assert!(rel_eq(result.reaction_left_kn, 36.0, 1e-9));
        assert!(rel_eq(result.reaction_right_kn, 36.0, 1e-9));
    }

    #[test]
    fn test_reactions_balance_total_load() {
        let mut input = uniform_beam();
        input.point_loads = vec![
            PointLoad { magnitude_kn: 15.0, position_m: 1.3 },
            PointLoad { magnitude_kn: 7.5, position_m: 4.1 },
        ];
        let result = calculate(&input).unwrap();
        let total = 12.0 * 6.0 + 15.0 + 7.5;
        assert!(rel_eq(
            result.reaction_left_kn + result.reaction_right_kn,
            total,
            1e-9
        ));
    }

    #[test]
    fn test_uniform_max_moment() {
        // M = wL²/8 = 12 * 36 / 8 = 54 kN·m at midspan
        let result = calculate(&uniform_beam()).unwrap();
        assert!(rel_eq(result.max_moment_knm, 54.0, 1e-4));
        assert!((result.max_moment_position_m - 3.0).abs() < 6.0 / SEGMENTS as f64 + 1e-9);
    }

    #[test]
    fn test_uniform_deflection_closed_form() {
        // δ = 5wL⁴/(384EI) = 5·12000·6⁴/(384·210e9·8500e-8) m ≈ 11.34 mm
        let result = calculate(&uniform_beam()).unwrap();
        let expected_m = 5.0 * 12_000.0 * 6.0_f64.powi(4) / (384.0 * 210.0e9 * 8500.0e-8);
        assert!(rel_eq(result.max_deflection_mm, expected_m * 1000.0, 0.01));
        assert!((result.max_deflection_position_m - 3.0).abs() < 0.05);
    }

    #[test]
    fn test_deflection_zero_at_supports() {
        let mut input = uniform_beam();
        input.point_loads = vec![PointLoad { magnitude_kn: 25.0, position_m: 2.1 }];
        let result = calculate(&input).unwrap();
        let first = result.deflection_diagram.first().unwrap().1;
        let last = result.deflection_diagram.last().unwrap().1;
        assert!(first.abs() < 1e-6);
        assert!(last.abs() < 1e-6);
    }

    #[test]
    fn test_midspan_point_load() {
        // M = PL/4, δ = PL³/48EI
        let input = BeamInput {
            label: "P".to_string(),
            span_m: 4.0,
            e_gpa: 210.0,
            i_cm4: 8500.0,
            uniform_kn_m: 0.0,
            point_loads: vec![PointLoad { magnitude_kn: 20.0, position_m: 2.0 }],
            section_modulus_cm3: None,
            yield_mpa: None,
        };
        let result = calculate(&input).unwrap();
        assert!(rel_eq(result.max_moment_knm, 20.0 * 4.0 / 4.0, 0.01));

        let ei = 210.0e9 * 8500.0e-8;
        let expected_mm = 20_000.0 * 4.0_f64.powi(3) / (48.0 * ei) * 1000.0;
        assert!(rel_eq(result.max_deflection_mm, expected_mm, 0.01));
    }

    #[test]
    fn test_position_clamped_to_span() {
        // A load past the right support clamps onto it and carries straight
        // into the reaction: no internal moment
        let input = BeamInput {
            label: "clamp".to_string(),
            span_m: 6.0,
            e_gpa: 210.0,
            i_cm4: 8500.0,
            uniform_kn_m: 0.0,
            point_loads: vec![PointLoad { magnitude_kn: 10.0, position_m: 10.0 }],
            section_modulus_cm3: None,
            yield_mpa: None,
        };
        let result = calculate(&input).unwrap();
        assert!(rel_eq(result.reaction_right_kn, 10.0, 1e-9));
        // The shear drop lands on the final node, so the trapezoid leaves at
        // most half a segment of residual moment
        assert!(result.max_moment_knm.abs() < 10.0 * result.shear_diagram[1].0);
    }

    #[test]
    fn test_zero_magnitude_loads_filtered() {
        let base = calculate(&uniform_beam()).unwrap();
        let mut with_zero = uniform_beam();
        with_zero.point_loads = vec![PointLoad { magnitude_kn: 0.0, position_m: 2.0 }];
        let result = calculate(&with_zero).unwrap();
        assert_eq!(base, result);
    }

    #[test]
    fn test_idempotence() {
        let mut input = uniform_beam();
        input.point_loads = vec![PointLoad { magnitude_kn: 9.0, position_m: 1.7 }];
        let a = calculate(&input).unwrap();
        let b = calculate(&input).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_stiffness_is_no_result() {
        let mut input = uniform_beam();
        input.e_gpa = 0.0;
        assert!(calculate(&input).is_err());
        input = uniform_beam();
        input.i_cm4 = -1.0;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_stress_check() {
        // σ = M/W = 54e6 N·mm / 904e3 mm³ = 59.7 MPa; 21.7% of S275
        let mut input = uniform_beam();
        input.section_modulus_cm3 = Some(904.0);
        input.yield_mpa = Some(275.0);
        let result = calculate(&input).unwrap();
        let sigma = result.bending_stress_mpa.unwrap();
        assert!(rel_eq(sigma, 54.0e6 / 904.0e3, 1e-3));
        let util = result.stress_utilization_pct.unwrap();
        assert!(rel_eq(util, sigma / 275.0 * 100.0, 1e-9));
    }

    #[test]
    fn test_diagram_length() {
        let result = calculate(&uniform_beam()).unwrap();
        assert_eq!(result.shear_diagram.len(), SEGMENTS + 1);
        assert_eq!(result.moment_diagram.len(), SEGMENTS + 1);
        assert_eq!(result.deflection_diagram.len(), SEGMENTS + 1);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let input = uniform_beam();
        let json = serde_json::to_string(&input).unwrap();
        let roundtrip: BeamInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }
}
