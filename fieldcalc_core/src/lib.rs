//! # fieldcalc_core - Engineering Calculator Engine
//!
//! `fieldcalc_core` is the computational engine behind the fieldcalc calculator
//! catalog: structural beam analysis, reinforced-concrete section capacity, and
//! electrical sizing. All inputs and outputs are JSON-serializable so any
//! presentation layer (CLI, web form, desktop UI) can be rebuilt on top.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every calculator is a pure function from an input struct
//!   to a result struct, re-derived from scratch on every call
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Bounded Numerics**: every iterative routine carries a hard iteration
//!   ceiling; non-convergence is a tagged outcome, never a sentinel value
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldcalc_core::calculations::beam::{BeamInput, calculate};
//!
//! let input = BeamInput {
//!     label: "B-1".to_string(),
//!     span_m: 6.0,
//!     e_gpa: 210.0,
//!     i_cm4: 8500.0,
//!     uniform_kn_m: 12.0,
//!     point_loads: Vec::new(),
//!     section_modulus_cm3: None,
//!     yield_mpa: None,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.max_moment_knm - 54.0).abs() < 0.01);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - All calculator types (beam, RC section, column, electrical)
//! - [`catalog`] - Static lookup tables (cables, breakers, material classes)
//! - [`parse`] - Locale-tolerant numeric input normalization
//! - [`summary`] - Presentation-layer rows and advisories
//! - [`numeric`] - Shared bisection and integration primitives
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod errors;
pub mod numeric;
pub mod parse;
pub mod summary;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use summary::{Advisory, Severity, SummaryRow};
