//! # Unit Conversions
//!
//! The calculators accept inputs in the units engineers actually type
//! (spans in m, E in GPa, I in cm⁴, loads in kN and kN/m, strengths in MPa)
//! and run their numerics in coherent SI (N, Pa, m). Keeping every
//! conversion factor here, named, is the main defense against the
//! unit-mismatch bugs this kind of code attracts.

/// Gigapascals to pascals (E input → SI)
pub fn gpa_to_pa(e_gpa: f64) -> f64 {
    e_gpa * 1.0e9
}

/// Centimeters⁴ to meters⁴ (second moment of area input → SI)
pub fn cm4_to_m4(i_cm4: f64) -> f64 {
    i_cm4 * 1.0e-8
}

/// Cubic centimeters to cubic millimeters (section modulus, for stress in MPa)
pub fn cm3_to_mm3(w_cm3: f64) -> f64 {
    w_cm3 * 1.0e3
}

/// Kilonewtons to newtons
pub fn kn_to_n(f_kn: f64) -> f64 {
    f_kn * 1.0e3
}

/// Kilonewton-meters to newton-meters
pub fn knm_to_nm(m_knm: f64) -> f64 {
    m_knm * 1.0e3
}

/// Kilonewton-meters to newton-millimeters (for stress in MPa over mm³)
pub fn knm_to_nmm(m_knm: f64) -> f64 {
    m_knm * 1.0e6
}

/// Newton-millimeters to kilonewton-meters (section capacity → report units)
pub fn nmm_to_knm(m_nmm: f64) -> f64 {
    m_nmm * 1.0e-6
}

/// Meters to millimeters (deflections are reported in mm)
pub fn m_to_mm(x_m: f64) -> f64 {
    x_m * 1.0e3
}
