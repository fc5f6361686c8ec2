//! # brew-calc - Brewing Calculator
//!
//! Command-line front end for `brew-core`. It takes measurements from the
//! command line, runs the requested conversion and prints the result.
//!
//! ## Usage
//! ```text
//! brew-calc [--calibration FILE] <command> <args...>
//! brew-calc plato 1.048
//! brew-calc abv 1.050 2.6
//! brew-calc --calibration my_hydrometer.json hydrometer 1.046 24
//! ```
//!
//! Set `RUST_LOG=debug` to see root-finder diagnostics on stderr.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use brew_core::{conversions, BrewResult, Calibration};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: brew-calc [--calibration FILE] <command> <args...>

Commands:
  plato <sg>                            Plato from specific gravity
  sg <plato>                            Specific gravity from Plato
  water-density <celsius>               Water density in kg/L
  hydrometer <reading_sg> <celsius>     Correct a 15 C hydrometer reading
  sugar <sugar_kg> <wort_l>             Plato of a sucrose solution
  abv <og> <plato>                      ABV from original gravity and current Plato
  abw <og> <plato>                      ABW from original gravity and current Plato
  refractometer <start_plato> <plato>   SG from starting and current refractometer readings
  ri <plato>                            Refractive index
  real-extract <sg> <plato>             Real extract from gravity and apparent Plato
  calibration                           Print the active calibration as JSON
  help                                  Show this message";

/// A single conversion requested on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Plato { sg: f64 },
    Sg { plato: f64 },
    WaterDensity { celsius: f64 },
    Hydrometer { reading_sg: f64, celsius: f64 },
    Sugar { sugar_kg: f64, wort_l: f64 },
    Abv { og: f64, plato: f64 },
    Abw { og: f64, plato: f64 },
    Refractometer { starting_plato: f64, current_plato: f64 },
    RefractiveIndex { plato: f64 },
    RealExtract { sg: f64, plato: f64 },
    ShowCalibration,
    Help,
}

/// Everything parsed from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub calibration_path: Option<PathBuf>,
    pub command: Command,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = parse_args(&args)?;
    debug!(?invocation, "parsed command line");

    let calibration = match &invocation.calibration_path {
        Some(path) => {
            info!(path = %path.display(), "loading calibration");
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading calibration file {}", path.display()))?;
            Calibration::from_json(&text)
                .with_context(|| format!("parsing calibration file {}", path.display()))?
        }
        None => Calibration::standard().clone(),
    };

    let output = evaluate(&invocation.command, &calibration)?;
    println!("{output}");
    Ok(())
}

/// Parses the arguments that follow the program name.
fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut calibration_path = None;
    let mut rest = Vec::with_capacity(args.len());

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--calibration" {
            let path = iter
                .next()
                .ok_or_else(|| anyhow!("--calibration needs a file path"))?;
            calibration_path = Some(PathBuf::from(path));
        } else {
            rest.push(arg.as_str());
        }
    }

    let Some((&name, operands)) = rest.split_first() else {
        return Ok(Invocation { calibration_path, command: Command::Help });
    };

    let command = match name {
        "plato" => {
            let [sg] = numbers(name, operands, ["sg"])?;
            Command::Plato { sg }
        }
        "sg" => {
            let [plato] = numbers(name, operands, ["plato"])?;
            Command::Sg { plato }
        }
        "water-density" => {
            let [celsius] = numbers(name, operands, ["celsius"])?;
            Command::WaterDensity { celsius }
        }
        "hydrometer" => {
            let [reading_sg, celsius] = numbers(name, operands, ["reading_sg", "celsius"])?;
            Command::Hydrometer { reading_sg, celsius }
        }
        "sugar" => {
            let [sugar_kg, wort_l] = numbers(name, operands, ["sugar_kg", "wort_l"])?;
            Command::Sugar { sugar_kg, wort_l }
        }
        "abv" => {
            let [og, plato] = numbers(name, operands, ["og", "plato"])?;
            Command::Abv { og, plato }
        }
        "abw" => {
            let [og, plato] = numbers(name, operands, ["og", "plato"])?;
            Command::Abw { og, plato }
        }
        "refractometer" => {
            let [starting_plato, current_plato] =
                numbers(name, operands, ["start_plato", "plato"])?;
            Command::Refractometer { starting_plato, current_plato }
        }
        "ri" => {
            let [plato] = numbers(name, operands, ["plato"])?;
            Command::RefractiveIndex { plato }
        }
        "real-extract" => {
            let [sg, plato] = numbers(name, operands, ["sg", "plato"])?;
            Command::RealExtract { sg, plato }
        }
        "calibration" => Command::ShowCalibration,
        "help" | "--help" | "-h" => Command::Help,
        other => bail!("unknown command '{other}'\n\n{USAGE}"),
    };

    Ok(Invocation { calibration_path, command })
}

/// Parses exactly `N` numeric operands for `command`.
fn numbers<const N: usize>(command: &str, operands: &[&str], names: [&str; N]) -> Result<[f64; N]> {
    if operands.len() != N {
        bail!(
            "'{command}' expects {N} argument(s): <{}>, got {}",
            names.join("> <"),
            operands.len()
        );
    }
    let mut values = [0.0; N];
    for ((value, operand), name) in values.iter_mut().zip(operands).zip(names) {
        *value = operand
            .parse()
            .with_context(|| format!("'{command}': {name} must be a number, got '{operand}'"))?;
    }
    Ok(values)
}

/// Runs a command against `calibration` and renders the result for display.
fn evaluate(command: &Command, calibration: &Calibration) -> BrewResult<String> {
    let output = match *command {
        Command::Plato { sg } => format!("{:.2} °P", calibration.sg_20c20c_to_plato(sg)),
        Command::Sg { plato } => format!("{:.4}", calibration.plato_to_sg_20c20c(plato)?),
        Command::WaterDensity { celsius } => {
            format!("{:.5} kg/L", calibration.water_density_kg_l(celsius))
        }
        Command::Hydrometer { reading_sg, celsius } => format!(
            "{:.4} (correction {:+.4})",
            calibration.corrected_hydrometer_reading(reading_sg, celsius),
            calibration.hydrometer_15c_correction(celsius)
        ),
        Command::Sugar { sugar_kg, wort_l } => {
            format!("{:.2} °P", calibration.plato_from_sugar(sugar_kg, wort_l))
        }
        Command::Abv { og, plato } => {
            let fg = calibration.plato_to_sg_20c20c(plato)?;
            format!(
                "{:.2}% ABV (FG {fg:.4}, apparent attenuation {:.1}%)",
                calibration.abv_by_sg_plato(og, plato)?,
                conversions::apparent_attenuation(og, fg)
            )
        }
        Command::Abw { og, plato } => {
            format!("{:.2}% ABW", calibration.abw_by_sg_plato(og, plato)?)
        }
        Command::Refractometer { starting_plato, current_plato } => format!(
            "{:.4}",
            conversions::sg_by_starting_plato(starting_plato, current_plato)
        ),
        Command::RefractiveIndex { plato } => {
            format!("{:.5}", conversions::refractive_index(plato))
        }
        Command::RealExtract { sg, plato } => {
            format!("{:.2} °P", conversions::real_extract(sg, plato))
        }
        Command::ShowCalibration => calibration.to_json_pretty()?,
        Command::Help => USAGE.to_string(),
    };
    Ok(output)
}
