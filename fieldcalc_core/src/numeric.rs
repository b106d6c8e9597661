//! # Numerical Primitives
//!
//! The two routines shared by the iterative calculators: bounded bisection
//! with explicit bracket-failure signaling, and cumulative trapezoidal
//! integration over uniformly spaced samples.
//!
//! Every loop here is capped by a fixed iteration count. Termination is
//! guaranteed by construction, so no timeout machinery is needed anywhere
//! in the crate.

use serde::{Deserialize, Serialize};

/// Hard ceiling on bisection refinements.
///
/// 80 halvings shrink the bracket by 2⁻⁸⁰; combined with the residual
/// tolerance this is far past f64 resolution for any section geometry, so
/// the cap only ever fires as a termination guarantee.
pub const MAX_BISECTION_ITER: usize = 80;

/// Outcome of a bisection search.
///
/// The bracket-failure case is a first-class variant rather than a
/// zero-filled stub, so downstream code cannot silently use a non-solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum Bisection {
    /// The residual crossed zero and the search converged.
    Converged {
        /// Root estimate
        root: f64,
        /// Residual at the root estimate
        residual: f64,
        /// Refinements actually performed
        iterations: usize,
    },
    /// The residual has the same sign at both bracket endpoints.
    NoSignChange {
        residual_low: f64,
        residual_high: f64,
    },
}

/// Find a root of `f` in `[low, high]` by bisection.
///
/// Requires a sign change across the bracket (`f(low)·f(high) ≤ 0`);
/// otherwise reports [`Bisection::NoSignChange`] without guessing. Stops as
/// soon as `|f(mid)| < tol` or after [`MAX_BISECTION_ITER`] halvings.
pub fn bisect(low: f64, high: f64, tol: f64, f: impl Fn(f64) -> f64) -> Bisection {
    let f_low = f(low);
    let f_high = f(high);

    if f_low * f_high > 0.0 {
        return Bisection::NoSignChange {
            residual_low: f_low,
            residual_high: f_high,
        };
    }

    let (mut a, mut b) = (low, high);
    let mut f_a = f_low;
    let mut mid = 0.5 * (a + b);
    let mut f_mid = f(mid);

    for i in 0..MAX_BISECTION_ITER {
        if f_mid.abs() < tol {
            return Bisection::Converged {
                root: mid,
                residual: f_mid,
                iterations: i,
            };
        }
        if f_a * f_mid <= 0.0 {
            b = mid;
        } else {
            a = mid;
            f_a = f_mid;
        }
        mid = 0.5 * (a + b);
        f_mid = f(mid);
    }

    Bisection::Converged {
        root: mid,
        residual: f_mid,
        iterations: MAX_BISECTION_ITER,
    }
}

/// Cumulative trapezoidal integral of uniformly spaced samples.
///
/// Returns an array of the same length where element `i` is the integral
/// from the first sample to sample `i` (element 0 is zero).
pub fn cumulative_trapezoid(samples: &[f64], dx: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(samples.len());
    let mut acc = 0.0;
    out.push(0.0);
    for pair in samples.windows(2) {
        acc += 0.5 * (pair[0] + pair[1]) * dx;
        out.push(acc);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bisect_finds_sqrt2() {
        let outcome = bisect(0.0, 2.0, 1e-12, |x| x * x - 2.0);
        match outcome {
            Bisection::Converged { root, .. } => {
                assert!((root - std::f64::consts::SQRT_2).abs() < 1e-6);
            }
            other => panic!("expected convergence, got {other:?}"),
        }
    }

    #[test]
    fn test_bisect_reports_missing_sign_change() {
        let outcome = bisect(1.0, 2.0, 1e-9, |x| x * x + 1.0);
        assert!(matches!(outcome, Bisection::NoSignChange { .. }));
    }

    #[test]
    fn test_bisect_respects_iteration_cap() {
        // A root at an irrational point never hits |f| < tol for tol = 0,
        // so the loop must stop at the cap.
        let outcome = bisect(0.0, 2.0, 0.0, |x| x * x - 2.0);
        match outcome {
            Bisection::Converged { iterations, root, .. } => {
                assert_eq!(iterations, MAX_BISECTION_ITER);
                assert!((root - std::f64::consts::SQRT_2).abs() < 1e-12);
            }
            other => panic!("expected capped convergence, got {other:?}"),
        }
    }

    #[test]
    fn test_cumulative_trapezoid_linear() {
        // ∫₀ˣ t dt = x²/2, exact for the trapezoidal rule
        let samples: Vec<f64> = (0..=10).map(|i| i as f64).collect();
        let integral = cumulative_trapezoid(&samples, 1.0);
        assert_eq!(integral.len(), samples.len());
        assert!((integral[10] - 50.0).abs() < 1e-12);
        assert!((integral[5] - 12.5).abs() < 1e-12);
    }

    #[test]
    fn test_cumulative_trapezoid_single_sample() {
        assert_eq!(cumulative_trapezoid(&[3.0], 0.5), vec![0.0]);
    }
}
