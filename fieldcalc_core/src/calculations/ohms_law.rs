//! # Ohm's Law Solver (two knowns of four)
//!
//! Given exactly two of voltage, current, resistance and power, derive the
//! other two. Despite looking iterative, this is a bounded fixed-point
//! substitution over the relation set (V = I·R, P = V·I and their
//! rearrangements), capped at [`MAX_ROUNDS`] rounds, not a
//! convergence-sensitive numerical method. Every pass either fills in an
//! unknown or makes no progress, so the loop terminates well inside the
//! cap; the cap exists as a hard guarantee, and whether every valid
//! two-known combination resolves within it is exercised by a property
//! test rather than assumed.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::summary::SummaryRow;

/// Hard ceiling on substitution rounds
pub const MAX_ROUNDS: usize = 12;

/// Input: exactly two fields must be `Some`, all values positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OhmsLawInput {
    /// User label for this calculation
    #[serde(default)]
    pub label: String,

    pub voltage_v: Option<f64>,
    pub current_a: Option<f64>,
    pub resistance_ohm: Option<f64>,
    pub power_w: Option<f64>,
}

impl OhmsLawInput {
    /// Validate input parameters: exactly two positive knowns.
    pub fn validate(&self) -> CalcResult<()> {
        let fields = [
            ("voltage_v", self.voltage_v),
            ("current_a", self.current_a),
            ("resistance_ohm", self.resistance_ohm),
            ("power_w", self.power_w),
        ];

        let mut known = 0;
        for (name, value) in fields {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(CalcError::invalid_input(
                        name,
                        v.to_string(),
                        "Must be a finite positive number",
                    ));
                }
                known += 1;
            }
        }

        match known {
            2 => Ok(()),
            n if n < 2 => Err(CalcError::missing_field(
                "two of voltage_v/current_a/resistance_ohm/power_w",
            )),
            n => Err(CalcError::invalid_input(
                "knowns",
                n.to_string(),
                "Exactly two quantities must be given; the rest are derived",
            )),
        }
    }
}

/// Fully resolved electrical state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhmsLawResult {
    pub voltage_v: f64,
    pub current_a: f64,
    pub resistance_ohm: f64,
    pub power_w: f64,

    /// Names of the fields that were derived (not supplied)
    pub derived: Vec<String>,

    /// Substitution rounds actually used
    pub rounds: usize,
}

impl OhmsLawResult {
    /// Labeled rows for the results panel
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        vec![
            SummaryRow::number("Voltage", self.voltage_v, 3, "V"),
            SummaryRow::number("Current", self.current_a, 3, "A"),
            SummaryRow::number("Resistance", self.resistance_ohm, 3, "Ω"),
            SummaryRow::number("Power", self.power_w, 3, "W"),
        ]
    }
}

/// Run the solve.
pub fn calculate(input: &OhmsLawInput) -> CalcResult<OhmsLawResult> {
    input.validate()?;

    let mut v = input.voltage_v;
    let mut i = input.current_a;
    let mut r = input.resistance_ohm;
    let mut p = input.power_w;

    let mut rounds = 0;
    while rounds < MAX_ROUNDS && [v, i, r, p].iter().any(Option::is_none) {
        let before = (v, i, r, p);

        if v.is_none() {
            v = match (i, r, p) {
                (Some(i), Some(r), _) => Some(i * r),
                (Some(i), _, Some(p)) => Some(p / i),
                (_, Some(r), Some(p)) => Some((p * r).sqrt()),
                _ => None,
            };
        }
        if i.is_none() {
            i = match (v, r, p) {
                (Some(v), Some(r), _) => Some(v / r),
                (Some(v), _, Some(p)) => Some(p / v),
                (_, Some(r), Some(p)) => Some((p / r).sqrt()),
                _ => None,
            };
        }
        if r.is_none() {
            r = match (v, i, p) {
                (Some(v), Some(i), _) => Some(v / i),
                (Some(v), _, Some(p)) => Some(v * v / p),
                (_, Some(i), Some(p)) => Some(p / (i * i)),
                _ => None,
            };
        }
        if p.is_none() {
            p = match (v, i, r) {
                (Some(v), Some(i), _) => Some(v * i),
                (Some(v), _, Some(r)) => Some(v * v / r),
                (_, Some(i), Some(r)) => Some(i * i * r),
                _ => None,
            };
        }

        rounds += 1;
        if (v, i, r, p) == before {
            break;
        }
    }

    match (v, i, r, p) {
        (Some(v), Some(i), Some(r), Some(p)) => {
            let mut derived = Vec::new();
            if input.voltage_v.is_none() {
                derived.push("voltage_v".to_string());
            }
            if input.current_a.is_none() {
                derived.push("current_a".to_string());
            }
            if input.resistance_ohm.is_none() {
                derived.push("resistance_ohm".to_string());
            }
            if input.power_w.is_none() {
                derived.push("power_w".to_string());
            }
            Ok(OhmsLawResult {
                voltage_v: v,
                current_a: i,
                resistance_ohm: r,
                power_w: p,
                derived,
                rounds,
            })
        }
        _ => Err(CalcError::Internal {
            message: format!("substitution stalled after {rounds} rounds"),
        }),
    }
}
