//! # RC Section Capacity (uniaxial bending + axial load)
//!
//! Ultimate-limit-state capacity of a rectangular reinforced-concrete
//! section with top and bottom reinforcement. The neutral-axis depth is
//! found by bisection on the longitudinal force residual (see
//! [`super::section`]); the resisting moment follows from the converged
//! force distribution.
//!
//! The outcome is three-valued, and the distinction matters to the user:
//!
//! - malformed geometry or materials → `Err(CalcError)` ("fix the input")
//! - well-formed input whose axial load no neutral-axis position can
//!   balance → [`SectionOutcome::NoEquilibrium`] ("adjust loads or
//!   reinforcement")
//! - otherwise → [`SectionOutcome::Converged`]
//!
//! ## Example
//!
//! ```rust
//! use fieldcalc_core::calculations::rc_section::{RcSectionInput, SectionOutcome, calculate};
//! use fieldcalc_core::catalog::{ConcreteClass, RebarGrade};
//!
//! let input = RcSectionInput {
//!     label: "Girder midspan".to_string(),
//!     width_mm: 300.0,
//!     height_mm: 500.0,
//!     cover_mm: 40.0,
//!     as_top_mm2: 226.2,
//!     as_bot_mm2: 942.5,
//!     concrete: ConcreteClass::C25_30,
//!     steel: RebarGrade::B450C,
//!     ned_kn: 0.0,
//!     med_knm: 100.0,
//! };
//!
//! match calculate(&input).unwrap() {
//!     SectionOutcome::Converged(r) => assert!(r.mrd_knm > 100.0),
//!     SectionOutcome::NoEquilibrium { .. } => unreachable!(),
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{ConcreteClass, RebarGrade};
use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};
use crate::summary::{Advisory, SummaryRow};
use crate::units::kn_to_n;

use super::section::{solve_axis, AxisSolve, SteelLayer};

/// Ductility limit on the neutral-axis ratio x/d; higher values flag a
/// brittle, compression-controlled section
pub const X_OVER_D_LIMIT: f64 = 0.45;

/// Input parameters for the RC section check.
///
/// Covers are measured to the bar center. Axial load is compression
/// positive, applied at the section centroid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RcSectionInput {
    /// User label for this check
    pub label: String,

    /// Section width b (mm)
    pub width_mm: f64,

    /// Section height h (mm)
    pub height_mm: f64,

    /// Cover to bar center, both faces (mm)
    pub cover_mm: f64,

    /// Top (compression face) reinforcement area (mm²)
    pub as_top_mm2: f64,

    /// Bottom (tension face) reinforcement area (mm²)
    pub as_bot_mm2: f64,

    /// Concrete strength class
    pub concrete: ConcreteClass,

    /// Reinforcement grade
    pub steel: RebarGrade,

    /// Applied axial load NEd (kN), compression positive
    pub ned_kn: f64,

    /// Applied bending moment MEd (kN·m), sagging
    pub med_knm: f64,
}

impl RcSectionInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("width_mm", self.width_mm)?;
        require_positive("height_mm", self.height_mm)?;
        require_positive("cover_mm", self.cover_mm)?;
        if self.cover_mm >= self.height_mm / 2.0 {
            return Err(CalcError::invalid_input(
                "cover_mm",
                self.cover_mm.to_string(),
                "Cover must be less than half the section height",
            ));
        }
        require_non_negative("as_top_mm2", self.as_top_mm2)?;
        require_non_negative("as_bot_mm2", self.as_bot_mm2)?;
        require_non_negative("med_knm", self.med_knm)?;
        if !self.ned_kn.is_finite() {
            return Err(CalcError::invalid_input(
                "ned_kn",
                self.ned_kn.to_string(),
                "Axial load must be finite",
            ));
        }
        Ok(())
    }

    /// Effective depth to the tension reinforcement (mm)
    pub fn effective_depth_mm(&self) -> f64 {
        self.height_mm - self.cover_mm
    }
}

/// Converged capacity results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RcSectionResult {
    /// Neutral-axis depth from the compression fiber (mm)
    pub neutral_axis_mm: f64,

    /// Neutral-axis ratio x/d
    pub x_over_d: f64,

    /// Resisting moment MRd (kN·m)
    pub mrd_knm: f64,

    /// Demand utilization MEd/MRd (%)
    pub utilization_pct: f64,

    /// Top steel stress utilization |σ|/fyd (%)
    pub top_steel_utilization_pct: f64,

    /// Bottom steel stress utilization |σ|/fyd (%)
    pub bottom_steel_utilization_pct: f64,

    /// Bisection refinements used
    pub iterations: usize,
}

/// Outcome of the section check.
///
/// `NoEquilibrium` means the inputs were well-formed but the requested
/// axial load cannot be balanced by any neutral-axis position. That calls
/// for different user guidance than an input error, so it travels in the
/// `Ok` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum SectionOutcome {
    Converged(RcSectionResult),
    NoEquilibrium { reason: String },
}

impl RcSectionResult {
    /// Labeled rows for the results panel
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        vec![
            SummaryRow::number("Neutral axis depth", self.neutral_axis_mm, 1, "mm"),
            SummaryRow::number("x/d", self.x_over_d, 3, ""),
            SummaryRow::number("Resisting moment MRd", self.mrd_knm, 1, "kN·m"),
            SummaryRow::number("Utilization MEd/MRd", self.utilization_pct, 1, "%"),
            SummaryRow::number("Top steel stress", self.top_steel_utilization_pct, 1, "% of fyd"),
            SummaryRow::number(
                "Bottom steel stress",
                self.bottom_steel_utilization_pct,
                1,
                "% of fyd",
            ),
        ]
    }

    /// Warnings derived from the result
    pub fn advisories(&self) -> Vec<Advisory> {
        let mut out = Vec::new();
        if self.x_over_d > X_OVER_D_LIMIT {
            out.push(Advisory::caution(format!(
                "x/d = {:.2} exceeds {X_OVER_D_LIMIT}: section is compression-controlled, \
                 limited ductility",
                self.x_over_d
            )));
        }
        if self.utilization_pct > 100.0 {
            out.push(Advisory::critical(format!(
                "MEd exceeds MRd ({:.0}% utilization)",
                self.utilization_pct
            )));
        }
        out
    }
}

/// Run the section capacity check.
pub fn calculate(input: &RcSectionInput) -> CalcResult<SectionOutcome> {
    input.validate()?;

    let layers = [
        SteelLayer {
            depth_mm: input.cover_mm,
            area_mm2: input.as_top_mm2,
        },
        SteelLayer {
            depth_mm: input.effective_depth_mm(),
            area_mm2: input.as_bot_mm2,
        },
    ];

    let fcd = input.concrete.fcd_mpa();
    let fyd = input.steel.fyd_mpa();

    let solve = solve_axis(
        input.width_mm,
        input.height_mm,
        &layers,
        fcd,
        fyd,
        kn_to_n(input.ned_kn),
    );

    let cap = match solve {
        AxisSolve::NoEquilibrium { reason } => {
            return Ok(SectionOutcome::NoEquilibrium { reason });
        }
        AxisSolve::Converged(cap) => cap,
    };

    let d = input.effective_depth_mm();
    let mrd = cap.mrd_knm;
    let utilization_pct = if mrd.abs() > 0.0 {
        input.med_knm / mrd * 100.0
    } else {
        f64::MAX
    };

    Ok(SectionOutcome::Converged(RcSectionResult {
        neutral_axis_mm: cap.x_mm,
        x_over_d: cap.x_mm / d,
        mrd_knm: mrd,
        utilization_pct,
        top_steel_utilization_pct: cap.layer_stresses_mpa[0].abs() / fyd * 100.0,
        bottom_steel_utilization_pct: cap.layer_stresses_mpa[1].abs() / fyd * 100.0,
        iterations: cap.iterations,
    }))
}
