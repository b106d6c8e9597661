//! # Catalog Tables
//!
//! Immutable lookup data compiled into the binary: the standard cable
//! section series with ampacities, standard breaker ratings, conductor
//! resistivities, and the concrete/steel material classes used by the
//! structural calculators. Loaded once at startup; nothing here is
//! recomputed per call.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// Conductors
// ============================================================================

/// Conductor material for cable calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Conductor {
    /// Copper, ρ = 0.0178 Ω·mm²/m at 20 °C
    #[default]
    Copper,
    /// Aluminum, ρ = 0.0282 Ω·mm²/m at 20 °C
    Aluminum,
}

impl Conductor {
    /// Resistivity in Ω·mm²/m at 20 °C
    pub fn resistivity(&self) -> f64 {
        match self {
            Conductor::Copper => 0.0178,
            Conductor::Aluminum => 0.0282,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Conductor::Copper => "Cu",
            Conductor::Aluminum => "Al",
        }
    }
}

/// One row of the cable catalog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CableSection {
    /// Nominal cross-section (mm²)
    pub section_mm2: f64,
    /// Current-carrying capacity Iz (A), copper, PVC, installation method B1
    pub ampacity_a: f64,
}

/// Standard IEC cable section series with copper/PVC ampacities (method B1)
pub const CABLE_SECTIONS: [CableSection; 15] = [
    CableSection { section_mm2: 1.5, ampacity_a: 17.5 },
    CableSection { section_mm2: 2.5, ampacity_a: 24.0 },
    CableSection { section_mm2: 4.0, ampacity_a: 32.0 },
    CableSection { section_mm2: 6.0, ampacity_a: 41.0 },
    CableSection { section_mm2: 10.0, ampacity_a: 57.0 },
    CableSection { section_mm2: 16.0, ampacity_a: 76.0 },
    CableSection { section_mm2: 25.0, ampacity_a: 101.0 },
    CableSection { section_mm2: 35.0, ampacity_a: 125.0 },
    CableSection { section_mm2: 50.0, ampacity_a: 151.0 },
    CableSection { section_mm2: 70.0, ampacity_a: 192.0 },
    CableSection { section_mm2: 95.0, ampacity_a: 232.0 },
    CableSection { section_mm2: 120.0, ampacity_a: 269.0 },
    CableSection { section_mm2: 150.0, ampacity_a: 309.0 },
    CableSection { section_mm2: 185.0, ampacity_a: 353.0 },
    CableSection { section_mm2: 240.0, ampacity_a: 415.0 },
];

/// Standard breaker ratings In (A), IEC 60898 series
pub const BREAKER_RATINGS: [f64; 16] = [
    6.0, 10.0, 13.0, 16.0, 20.0, 25.0, 32.0, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0, 160.0, 200.0,
    250.0,
];

/// Grouping correction factors for 1..=6 circuits bundled together
/// (IEC 60364-5-52 Table B.52.17, single layer)
pub const GROUPING_FACTORS: [f64; 6] = [1.0, 0.8, 0.7, 0.65, 0.6, 0.57];

/// Grouping correction factor for a bundle of `circuits` circuits, `None`
/// outside the tabulated 1..=6 range.
pub fn grouping_factor(circuits: usize) -> Option<f64> {
    if circuits == 0 {
        return None;
    }
    GROUPING_FACTORS.get(circuits - 1).copied()
}

/// Ampacity lookup keyed by nominal section, derived from [`CABLE_SECTIONS`].
static AMPACITY_BY_SECTION: Lazy<Vec<(f64, f64)>> = Lazy::new(|| {
    CABLE_SECTIONS
        .iter()
        .map(|c| (c.section_mm2, c.ampacity_a))
        .collect()
});

/// Ampacity Iz (A) for a nominal section, `None` if the section is not in
/// the standard series.
pub fn ampacity_for_section(section_mm2: f64) -> Option<f64> {
    AMPACITY_BY_SECTION
        .iter()
        .find(|(s, _)| (*s - section_mm2).abs() < 1e-9)
        .map(|(_, iz)| *iz)
}

/// Smallest standard breaker rating with `ib <= In <= iz`, if any exists.
pub fn breaker_for(ib_a: f64, iz_a: f64) -> Option<f64> {
    BREAKER_RATINGS
        .iter()
        .copied()
        .find(|&rating| rating >= ib_a && rating <= iz_a)
}

// ============================================================================
// Structural materials
// ============================================================================

/// Concrete strength class (EN 206 / Eurocode 2 naming)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ConcreteClass {
    C20_25,
    #[default]
    C25_30,
    C28_35,
    C32_40,
    C35_45,
    C40_50,
    C45_55,
    C50_60,
}

/// Partial safety factor for concrete
pub const GAMMA_C: f64 = 1.5;
/// Long-term strength coefficient applied to fcd
pub const ALPHA_CC: f64 = 0.85;
/// Partial safety factor for reinforcement steel
pub const GAMMA_S: f64 = 1.15;
/// Elastic modulus of reinforcement steel (MPa)
pub const ES_MPA: f64 = 200_000.0;

impl ConcreteClass {
    /// All classes, in catalog order
    pub const ALL: [ConcreteClass; 8] = [
        ConcreteClass::C20_25,
        ConcreteClass::C25_30,
        ConcreteClass::C28_35,
        ConcreteClass::C32_40,
        ConcreteClass::C35_45,
        ConcreteClass::C40_50,
        ConcreteClass::C45_55,
        ConcreteClass::C50_60,
    ];

    /// Characteristic cylinder strength fck (MPa)
    pub fn fck_mpa(&self) -> f64 {
        match self {
            ConcreteClass::C20_25 => 20.0,
            ConcreteClass::C25_30 => 25.0,
            ConcreteClass::C28_35 => 28.0,
            ConcreteClass::C32_40 => 32.0,
            ConcreteClass::C35_45 => 35.0,
            ConcreteClass::C40_50 => 40.0,
            ConcreteClass::C45_55 => 45.0,
            ConcreteClass::C50_60 => 50.0,
        }
    }

    /// Design compressive strength fcd = αcc·fck/γc (MPa)
    pub fn fcd_mpa(&self) -> f64 {
        ALPHA_CC * self.fck_mpa() / GAMMA_C
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConcreteClass::C20_25 => "C20/25",
            ConcreteClass::C25_30 => "C25/30",
            ConcreteClass::C28_35 => "C28/35",
            ConcreteClass::C32_40 => "C32/40",
            ConcreteClass::C35_45 => "C35/45",
            ConcreteClass::C40_50 => "C40/50",
            ConcreteClass::C45_55 => "C45/55",
            ConcreteClass::C50_60 => "C50/60",
        }
    }
}

/// Reinforcement steel grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RebarGrade {
    /// fyk = 450 MPa
    #[default]
    B450C,
    /// fyk = 500 MPa
    B500B,
}

impl RebarGrade {
    /// All grades, in catalog order
    pub const ALL: [RebarGrade; 2] = [RebarGrade::B450C, RebarGrade::B500B];

    /// Characteristic yield strength fyk (MPa)
    pub fn fyk_mpa(&self) -> f64 {
        match self {
            RebarGrade::B450C => 450.0,
            RebarGrade::B500B => 500.0,
        }
    }

    /// Design yield strength fyd = fyk/γs (MPa)
    pub fn fyd_mpa(&self) -> f64 {
        self.fyk_mpa() / GAMMA_S
    }

    pub fn name(&self) -> &'static str {
        match self {
            RebarGrade::B450C => "B450C",
            RebarGrade::B500B => "B500B",
        }
    }
}

/// Structural steel grade (for the beam flexural check)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SteelGrade {
    S235,
    #[default]
    S275,
    S355,
}

impl SteelGrade {
    /// All grades, in catalog order
    pub const ALL: [SteelGrade; 3] = [SteelGrade::S235, SteelGrade::S275, SteelGrade::S355];

    /// Nominal yield strength fy (MPa), t ≤ 40 mm
    pub fn fy_mpa(&self) -> f64 {
        match self {
            SteelGrade::S235 => 235.0,
            SteelGrade::S275 => 275.0,
            SteelGrade::S355 => 355.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SteelGrade::S235 => "S235",
            SteelGrade::S275 => "S275",
            SteelGrade::S355 => "S355",
        }
    }
}
