//! # Fieldcalc CLI
//!
//! Command-line front end for the calculator engine: one subcommand per
//! calculator, a human-readable report by default, `--json` for the raw
//! serialized result. All numeric flags accept comma-decimal input
//! ("12,5") as well as dot-decimal.

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use fieldcalc_core::calculations::beam::{self, BeamInput, PointLoad};
use fieldcalc_core::calculations::column::{self, ColumnInput};
use fieldcalc_core::calculations::ohms_law::{self, OhmsLawInput};
use fieldcalc_core::calculations::rc_section::{self, RcSectionInput, SectionOutcome};
use fieldcalc_core::calculations::voltage_drop::{self, Phase, VoltageDropInput};
use fieldcalc_core::catalog::{ConcreteClass, Conductor, RebarGrade, SteelGrade};
use fieldcalc_core::parse::parse_decimal;
use fieldcalc_core::{Advisory, Severity, SummaryRow};

#[derive(Parser)]
#[command(name = "fieldcalc", version, about = "Engineering calculators")]
struct Cli {
    /// Emit the raw result as JSON instead of a report
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simply-supported beam shear/moment/deflection
    Beam(BeamArgs),
    /// RC section capacity (uniaxial bending + axial load)
    Section(SectionArgs),
    /// Biaxial column capacity
    Column(ColumnArgs),
    /// Voltage drop and cable sizing
    VoltageDrop(VoltageDropArgs),
    /// Ohm's law: derive two quantities from two knowns
    Ohm(OhmArgs),
}

/// Locale-tolerant f64 flag parser
fn decimal(raw: &str) -> Result<f64, String> {
    parse_decimal(raw).ok_or_else(|| format!("'{raw}' is not a number"))
}

/// Point load flag parser: "MAG@POS", e.g. "10@2,5"
fn point_load(raw: &str) -> Result<PointLoad, String> {
    let (mag, pos) = raw
        .split_once('@')
        .ok_or_else(|| format!("'{raw}' is not MAG@POS"))?;
    Ok(PointLoad {
        magnitude_kn: decimal(mag)?,
        position_m: decimal(pos)?,
    })
}

fn concrete_class(raw: &str) -> Result<ConcreteClass, String> {
    ConcreteClass::ALL
        .iter()
        .copied()
        .find(|c| c.name().eq_ignore_ascii_case(raw))
        .ok_or_else(|| format!("unknown concrete class '{raw}' (e.g. C25/30)"))
}

fn rebar_grade(raw: &str) -> Result<RebarGrade, String> {
    RebarGrade::ALL
        .iter()
        .copied()
        .find(|g| g.name().eq_ignore_ascii_case(raw))
        .ok_or_else(|| format!("unknown rebar grade '{raw}' (B450C or B500B)"))
}

fn steel_grade(raw: &str) -> Result<SteelGrade, String> {
    SteelGrade::ALL
        .iter()
        .copied()
        .find(|g| g.name().eq_ignore_ascii_case(raw))
        .ok_or_else(|| format!("unknown steel grade '{raw}' (S235, S275 or S355)"))
}

fn conductor(raw: &str) -> Result<Conductor, String> {
    [Conductor::Copper, Conductor::Aluminum]
        .into_iter()
        .find(|c| {
            c.name().eq_ignore_ascii_case(raw)
                || matches!(
                    (c, raw.to_ascii_lowercase().as_str()),
                    (Conductor::Copper, "copper") | (Conductor::Aluminum, "aluminum" | "aluminium")
                )
        })
        .ok_or_else(|| format!("unknown conductor '{raw}' (cu or al)"))
}

#[derive(Args)]
struct BeamArgs {
    /// Span (m)
    #[arg(long, value_parser = decimal)]
    span: f64,
    /// Elastic modulus (GPa)
    #[arg(long, value_parser = decimal, default_value = "210")]
    e: f64,
    /// Second moment of area (cm⁴)
    #[arg(long, value_parser = decimal)]
    i: f64,
    /// Uniform load (kN/m)
    #[arg(long, value_parser = decimal, default_value = "0")]
    uniform: f64,
    /// Point load MAG@POS in kN and m; repeatable
    #[arg(long = "point", value_parser = point_load)]
    points: Vec<PointLoad>,
    /// Section modulus (cm³), enables the stress check
    #[arg(long, value_parser = decimal)]
    w: Option<f64>,
    /// Yield strength (MPa) for the stress utilization
    #[arg(long, value_parser = decimal, conflicts_with = "steel")]
    fy: Option<f64>,
    /// Steel grade supplying the yield strength (S235, S275 or S355)
    #[arg(long, value_parser = steel_grade)]
    steel: Option<SteelGrade>,
}

#[derive(Args)]
struct SectionArgs {
    /// Section width (mm)
    #[arg(long, value_parser = decimal)]
    width: f64,
    /// Section height (mm)
    #[arg(long, value_parser = decimal)]
    height: f64,
    /// Cover to bar center (mm)
    #[arg(long, value_parser = decimal, default_value = "40")]
    cover: f64,
    /// Top reinforcement area (mm²)
    #[arg(long, value_parser = decimal, default_value = "0")]
    as_top: f64,
    /// Bottom reinforcement area (mm²)
    #[arg(long, value_parser = decimal)]
    as_bot: f64,
    /// Concrete class (e.g. C25/30)
    #[arg(long, value_parser = concrete_class, default_value = "C25/30")]
    concrete: ConcreteClass,
    /// Rebar grade (B450C or B500B)
    #[arg(long, value_parser = rebar_grade, default_value = "B450C")]
    steel: RebarGrade,
    /// Axial load NEd (kN), compression positive
    #[arg(long, value_parser = decimal, default_value = "0")]
    ned: f64,
    /// Bending moment MEd (kN·m)
    #[arg(long, value_parser = decimal)]
    med: f64,
}

#[derive(Args)]
struct ColumnArgs {
    /// Section width (mm)
    #[arg(long, value_parser = decimal)]
    width: f64,
    /// Section height (mm)
    #[arg(long, value_parser = decimal)]
    height: f64,
    /// Cover to bar center (mm)
    #[arg(long, value_parser = decimal, default_value = "50")]
    cover: f64,
    /// Bars along the width
    #[arg(long, default_value_t = 2)]
    bars_x: usize,
    /// Bars along the height
    #[arg(long, default_value_t = 2)]
    bars_y: usize,
    /// Bar diameter (mm)
    #[arg(long, value_parser = decimal)]
    diameter: f64,
    /// Concrete class (e.g. C32/40)
    #[arg(long, value_parser = concrete_class, default_value = "C32/40")]
    concrete: ConcreteClass,
    /// Rebar grade (B450C or B500B)
    #[arg(long, value_parser = rebar_grade, default_value = "B450C")]
    steel: RebarGrade,
    /// Axial load NEd (kN)
    #[arg(long, value_parser = decimal)]
    ned: f64,
    /// Moment about x (kN·m)
    #[arg(long, value_parser = decimal, default_value = "0")]
    medx: f64,
    /// Moment about y (kN·m)
    #[arg(long, value_parser = decimal, default_value = "0")]
    medy: f64,
}

#[derive(Args)]
struct VoltageDropArgs {
    /// Single-phase system (default is three-phase)
    #[arg(long)]
    single_phase: bool,
    /// Nominal voltage (V)
    #[arg(long, value_parser = decimal, default_value = "400")]
    voltage: f64,
    /// Active power (kW)
    #[arg(long, value_parser = decimal)]
    power: f64,
    /// Power factor cosφ
    #[arg(long, value_parser = decimal, default_value = "0.9")]
    cos_phi: f64,
    /// Load efficiency η
    #[arg(long, value_parser = decimal, default_value = "1")]
    efficiency: f64,
    /// Cable run length (m)
    #[arg(long, value_parser = decimal)]
    length: f64,
    /// Conductor material (cu or al)
    #[arg(long, value_parser = conductor, default_value = "cu")]
    conductor: Conductor,
    /// Cable section (mm²)
    #[arg(long, value_parser = decimal)]
    section: f64,
    /// Circuits bundled in the same run (derates ampacity)
    #[arg(long, default_value_t = 1)]
    circuits: usize,
}

#[derive(Args)]
struct OhmArgs {
    /// Voltage (V)
    #[arg(long, value_parser = decimal)]
    voltage: Option<f64>,
    /// Current (A)
    #[arg(long, value_parser = decimal)]
    current: Option<f64>,
    /// Resistance (Ω)
    #[arg(long, value_parser = decimal)]
    resistance: Option<f64>,
    /// Power (W)
    #[arg(long, value_parser = decimal)]
    power: Option<f64>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(message) = run(&cli) {
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    match &cli.command {
        Command::Beam(args) => {
            let input = BeamInput {
                label: "CLI".to_string(),
                span_m: args.span,
                e_gpa: args.e,
                i_cm4: args.i,
                uniform_kn_m: args.uniform,
                point_loads: args.points.clone(),
                section_modulus_cm3: args.w,
                yield_mpa: args.fy.or_else(|| args.steel.map(|g| g.fy_mpa())),
            };
            let result = beam::calculate(&input).map_err(|e| e.to_string())?;
            emit(cli.json, "BEAM ANALYSIS", &result, result.summary_rows(), result.advisories())
        }
        Command::Section(args) => {
            let input = RcSectionInput {
                label: "CLI".to_string(),
                width_mm: args.width,
                height_mm: args.height,
                cover_mm: args.cover,
                as_top_mm2: args.as_top,
                as_bot_mm2: args.as_bot,
                concrete: args.concrete,
                steel: args.steel,
                ned_kn: args.ned,
                med_knm: args.med,
            };
            let outcome = rc_section::calculate(&input).map_err(|e| e.to_string())?;
            match &outcome {
                SectionOutcome::Converged(result) => emit(
                    cli.json,
                    "RC SECTION CAPACITY",
                    &outcome,
                    result.summary_rows(),
                    result.advisories(),
                ),
                SectionOutcome::NoEquilibrium { reason } => {
                    emit_no_equilibrium(cli.json, &outcome, reason)
                }
            }
        }
        Command::Column(args) => {
            let input = ColumnInput {
                label: "CLI".to_string(),
                width_mm: args.width,
                height_mm: args.height,
                cover_mm: args.cover,
                bars_x: args.bars_x,
                bars_y: args.bars_y,
                bar_diameter_mm: args.diameter,
                concrete: args.concrete,
                steel: args.steel,
                ned_kn: args.ned,
                medx_knm: args.medx,
                medy_knm: args.medy,
            };
            let result = column::calculate(&input).map_err(|e| e.to_string())?;
            emit(cli.json, "BIAXIAL COLUMN", &result, result.summary_rows(), result.advisories())
        }
        Command::VoltageDrop(args) => {
            let input = VoltageDropInput {
                label: "CLI".to_string(),
                phase: if args.single_phase {
                    Phase::SinglePhase
                } else {
                    Phase::ThreePhase
                },
                voltage_v: args.voltage,
                power_kw: args.power,
                cos_phi: args.cos_phi,
                efficiency: args.efficiency,
                length_m: args.length,
                conductor: args.conductor,
                section_mm2: args.section,
                circuits_in_group: args.circuits,
            };
            let result = voltage_drop::calculate(&input).map_err(|e| e.to_string())?;
            if !cli.json {
                print_report("VOLTAGE DROP", &result.summary_rows(), &result.advisories());
                print_cable_table(&result);
                return Ok(());
            }
            emit(cli.json, "VOLTAGE DROP", &result, result.summary_rows(), result.advisories())
        }
        Command::Ohm(args) => {
            let input = OhmsLawInput {
                label: "CLI".to_string(),
                voltage_v: args.voltage,
                current_a: args.current,
                resistance_ohm: args.resistance,
                power_w: args.power,
            };
            let result = ohms_law::calculate(&input).map_err(|e| e.to_string())?;
            emit(cli.json, "OHM'S LAW", &result, result.summary_rows(), Vec::new())
        }
    }
}

fn emit<T: Serialize>(
    json: bool,
    title: &str,
    result: &T,
    rows: Vec<SummaryRow>,
    advisories: Vec<Advisory>,
) -> Result<(), String> {
    if json {
        let out = serde_json::to_string_pretty(result).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        print_report(title, &rows, &advisories);
    }
    Ok(())
}

fn emit_no_equilibrium<T: Serialize>(json: bool, outcome: &T, reason: &str) -> Result<(), String> {
    if json {
        let out = serde_json::to_string_pretty(outcome).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        println!("No equilibrium: {reason}");
        println!("Adjust the loads or the reinforcement and retry.");
    }
    Ok(())
}

fn print_report(title: &str, rows: &[SummaryRow], advisories: &[Advisory]) {
    println!("═══════════════════════════════════════");
    println!("  {title}");
    println!("═══════════════════════════════════════");
    let width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
    for row in rows {
        println!("  {:<width$}  {} {}", row.label, row.value, row.unit);
    }
    for advisory in advisories {
        println!("  {} {}", severity_icon(advisory.severity), advisory.message);
    }
}

fn print_cable_table(result: &fieldcalc_core::calculations::voltage_drop::VoltageDropResult) {
    println!();
    println!("  {:>8}  {:>6}  {:>8}  {:>7}  check", "S (mm²)", "Iz (A)", "ΔV (V)", "ΔV (%)");
    for option in &result.comparison {
        println!(
            "  {:>8}  {:>6.1}  {:>8.2}  {:>7.2}  {}",
            option.section_mm2,
            option.ampacity_a,
            option.drop_v,
            option.drop_pct,
            if option.ampacity_ok && option.drop_ok { "[OK]" } else { "[--]" }
        );
    }
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "[i]",
        Severity::Caution => "[!]",
        Severity::Critical => "[!!]",
    }
}
