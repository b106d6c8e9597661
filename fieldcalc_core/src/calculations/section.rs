//! # Rectangular Section Equilibrium
//!
//! The machinery shared by the RC section and biaxial column calculators:
//! given a rectangular concrete compression zone and a set of steel layers
//! at known depths, find the neutral-axis depth that balances longitudinal
//! forces, then take moments for the section capacity.
//!
//! ## Physical model
//!
//! Plane sections: strain varies linearly from the concrete ultimate strain
//! [`EPS_CU`] at the compression fiber, zero at the neutral axis. Steel is
//! elastic-perfectly-plastic (`σ = ε·Es` clamped to ±fyd). Concrete carries
//! an equivalent rectangular stress block of depth [`LAMBDA`]`·x` at fcd;
//! concrete displaced by bars is neglected.
//!
//! The equilibrium residual is expressed in newtons and handed to
//! [`crate::numeric::bisect`] over a bracket inside the section depth. A
//! bracket without a sign change means the axial load lies outside what the
//! section can balance at any neutral-axis position; that is reported, not
//! papered over by widening the bracket.

use serde::{Deserialize, Serialize};

use crate::catalog::ES_MPA;
use crate::numeric::{bisect, Bisection};
use crate::units::nmm_to_knm;

/// Concrete ultimate compressive strain
pub const EPS_CU: f64 = 0.0035;

/// Rectangular stress block depth factor (λ·x at fcd)
pub const LAMBDA: f64 = 0.8;

/// Equilibrium tolerance on the force residual (N)
pub const FORCE_TOL_N: f64 = 1.0;

/// One layer of reinforcement at a common depth from the compression fiber
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelLayer {
    /// Depth from the extreme compression fiber (mm)
    pub depth_mm: f64,
    /// Total bar area in the layer (mm²)
    pub area_mm2: f64,
}

/// Converged uniaxial capacity for one bending axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisCapacity {
    /// Neutral-axis depth from the compression fiber (mm)
    pub x_mm: f64,
    /// Bisection refinements performed
    pub iterations: usize,
    /// Resisting moment about the section mid-depth (kN·m)
    pub mrd_knm: f64,
    /// Steel stress per layer (MPa, compression positive), same order as input
    pub layer_stresses_mpa: Vec<f64>,
}

/// Outcome of a uniaxial equilibrium solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum AxisSolve {
    Converged(AxisCapacity),
    /// The residual never changes sign inside the section: no neutral-axis
    /// position balances the requested axial load
    NoEquilibrium { reason: String },
}

/// Steel stress (MPa, compression positive) at a layer depth for neutral
/// axis `x`, elastic-perfectly-plastic
fn steel_stress_mpa(x_mm: f64, depth_mm: f64, fyd_mpa: f64) -> f64 {
    let strain = EPS_CU * (x_mm - depth_mm) / x_mm;
    (strain * ES_MPA).clamp(-fyd_mpa, fyd_mpa)
}

/// Solve force equilibrium for one bending axis.
///
/// `width_mm` is the dimension parallel to the neutral axis, `depth_mm`
/// the dimension strain varies over. `ned_n` is the applied axial load in
/// newtons, compression positive.
pub fn solve_axis(
    width_mm: f64,
    depth_mm: f64,
    layers: &[SteelLayer],
    fcd_mpa: f64,
    fyd_mpa: f64,
    ned_n: f64,
) -> AxisSolve {
    let residual = |x: f64| -> f64 {
        let concrete_n = fcd_mpa * width_mm * LAMBDA * x;
        let steel_n: f64 = layers
            .iter()
            .map(|layer| steel_stress_mpa(x, layer.depth_mm, fyd_mpa) * layer.area_mm2)
            .sum();
        concrete_n + steel_n - ned_n
    };

    // Lower bound strictly off zero keeps the hyperbolic strain term finite;
    // upper bound is the section depth itself
    let low = depth_mm / 1000.0;
    let high = depth_mm;

    match bisect(low, high, FORCE_TOL_N, residual) {
        Bisection::NoSignChange {
            residual_low,
            residual_high,
        } => AxisSolve::NoEquilibrium {
            reason: format!(
                "No neutral-axis depth inside the section balances the axial load \
                 (residual {residual_low:.0} N at x={low:.1} mm, \
                 {residual_high:.0} N at x={high:.1} mm)"
            ),
        },
        Bisection::Converged {
            root: x,
            iterations,
            ..
        } => {
            let layer_stresses_mpa: Vec<f64> = layers
                .iter()
                .map(|layer| steel_stress_mpa(x, layer.depth_mm, fyd_mpa))
                .collect();

            // Moments about mid-depth: the axial load acts at the centroid,
            // so its own contribution drops out here
            let half = depth_mm / 2.0;
            let concrete_nmm = fcd_mpa * width_mm * LAMBDA * x * (half - LAMBDA * x / 2.0);
            let steel_nmm: f64 = layers
                .iter()
                .zip(&layer_stresses_mpa)
                .map(|(layer, sigma)| sigma * layer.area_mm2 * (half - layer.depth_mm))
                .sum();

            AxisSolve::Converged(AxisCapacity {
                x_mm: x,
                iterations,
                mrd_knm: nmm_to_knm(concrete_nmm + steel_nmm),
                layer_stresses_mpa,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::MAX_BISECTION_ITER;

    // 300x500 section, 2φ12 top + 3φ20 bottom, C25/30 / B450C
    fn test_layers() -> Vec<SteelLayer> {
        vec![
            SteelLayer { depth_mm: 40.0, area_mm2: 226.2 },
            SteelLayer { depth_mm: 460.0, area_mm2: 942.5 },
        ]
    }

    #[test]
    fn test_pure_bending_converges_inside_section() {
        let solve = solve_axis(300.0, 500.0, &test_layers(), 14.17, 391.3, 0.0);
        match solve {
            AxisSolve::Converged(cap) => {
                assert!(cap.x_mm > 0.0 && cap.x_mm < 500.0);
                assert!(cap.iterations <= MAX_BISECTION_ITER);
                assert!(cap.mrd_knm > 0.0);
                // Bottom steel is far below the neutral axis: fully yielded
                assert!((cap.layer_stresses_mpa[1] + 391.3).abs() < 1e-9);
            }
            other => panic!("expected convergence, got {other:?}"),
        }
    }

    #[test]
    fn test_residual_small_at_root() {
        let layers = test_layers();
        if let AxisSolve::Converged(cap) = solve_axis(300.0, 500.0, &layers, 14.17, 391.3, 0.0) {
            let concrete = 14.17 * 300.0 * LAMBDA * cap.x_mm;
            let steel: f64 = layers
                .iter()
                .zip(&cap.layer_stresses_mpa)
                .map(|(l, s)| s * l.area_mm2)
                .sum();
            assert!((concrete + steel).abs() < FORCE_TOL_N);
        } else {
            panic!("expected convergence");
        }
    }

    #[test]
    fn test_axial_beyond_capacity_is_no_equilibrium() {
        // Pure-compression capacity of this section is well under 5000 kN
        let solve = solve_axis(300.0, 500.0, &test_layers(), 14.17, 391.3, 5.0e6);
        assert!(matches!(solve, AxisSolve::NoEquilibrium { .. }));
    }

    #[test]
    fn test_steel_stress_clamping() {
        // Deep below the axis: yielded in tension
        assert_eq!(steel_stress_mpa(100.0, 460.0, 391.3), -391.3);
        // Just under the compression fiber with a deep axis: yielded in compression
        assert_eq!(steel_stress_mpa(400.0, 40.0, 391.3), 391.3);
        // At the neutral axis: zero
        assert_eq!(steel_stress_mpa(200.0, 200.0, 391.3), 0.0);
    }
}
