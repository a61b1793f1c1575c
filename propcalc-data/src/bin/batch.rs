use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use propcalc_core::calculations::common::round_half_up;
use propcalc_core::{
    FeasibilityWorksheet, OutputRecord, RentalRoiWorksheet, RepaymentWorksheet, Worksheet,
};
use propcalc_data::{ScenarioWriter, load_from_file};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Feasibility,
    Rental,
    Repayment,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// `scenario,section,key,value` rows
    Csv,
    /// One aligned block of outputs per scenario
    Summary,
}

/// Run a batch of property scenarios from a CSV file.
///
/// The CSV header names input fields by key (e.g. `land_price`,
/// `contingency_pct`). An optional `scenario` column names each row.
/// Missing fields default to zero.
#[derive(Parser, Debug)]
#[command(name = "propcalc-batch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file of scenarios
    #[arg(short, long)]
    file: PathBuf,

    /// Which worksheet the scenarios are for
    #[arg(short, long, value_enum, default_value_t = Kind::Feasibility)]
    kind: Kind,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `warn` so piped CSV output stays clean.
/// * Logs go to stderr, never into the CSV.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn write_summary<O: OutputRecord>(
    out: &mut dyn Write,
    name: &str,
    outputs: &O,
) -> io::Result<()> {
    writeln!(out, "{name}")?;
    for (key, value) in outputs.entries() {
        writeln!(out, "  {key:<28} {:>18.2}", round_half_up(value))?;
    }
    writeln!(out)
}

fn run<W: Worksheet>(
    args: &Args,
    out: Box<dyn Write>,
) -> Result<()> {
    let scenarios = load_from_file::<W::Input>(&args.file)
        .with_context(|| format!("Failed to load scenarios: {}", args.file.display()))?;

    info!(
        worksheet = W::NAME,
        count = scenarios.len(),
        "running scenarios"
    );

    let worksheet = W::default();
    match args.format {
        Format::Csv => {
            let mut writer = ScenarioWriter::new(out);
            for scenario in &scenarios {
                let outputs = worksheet.calculate(&scenario.inputs);
                debug!(scenario = %scenario.name, "calculated");
                writer
                    .write_scenario(&scenario.name, &scenario.inputs, &outputs)
                    .with_context(|| format!("Failed to write scenario: {}", scenario.name))?;
            }
            writer
                .finish()
                .context("Failed to flush CSV output")?
                .flush()
                .context("Failed to flush CSV output")?;
        }
        Format::Summary => {
            let mut out = out;
            for scenario in &scenarios {
                let outputs = worksheet.calculate(&scenario.inputs);
                write_summary(&mut *out, &scenario.name, &outputs)
                    .context("Failed to write summary")?;
            }
            out.flush().context("Failed to flush summary")?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create: {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    match args.kind {
        Kind::Feasibility => run::<FeasibilityWorksheet>(&args, out),
        Kind::Rental => run::<RentalRoiWorksheet>(&args, out),
        Kind::Repayment => run::<RepaymentWorksheet>(&args, out),
    }
}
