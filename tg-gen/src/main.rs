#![deny(
    // This is overly strict, of course. The intent is somewhat of a "quality seal," less to fix everything, and more to force us to add inline allows, which are even more needlessly verbose, but give us a mechanism to say "we think this is okay, but you might want to take a second look here."
    clippy::nursery,
    clippy::pedantic,
    // These are also just for clinic purposes
    missing_docs,
    clippy::missing_docs_in_private_items,
)]
//! Command line interface for the tg-gen forest generator.
//!
//! Generates a dataset of node records with acyclic parent references and writes it as JSON Lines
//! or a JSON array, optionally followed by a CSV export. See binary --help for more information.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tg_core::TimeWindow;
use tg_gen::forest::{
    DEFAULT_HEALTH_MAX,
    DEFAULT_HEALTH_MIN,
    DEFAULT_MAX_CHILDREN_HINT,
    DEFAULT_MAX_LEVEL,
    DEFAULT_ROOT_SHARE,
};
use tg_gen::{
    ExportOutcome,
    ForestConfig,
    OutputFormat,
    RunConfig,
};
use tracing::info;

/// Generate a large synthetic nodes dataset with acyclic parent references.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of rows to generate (e.g. 100000).
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    rows: u64,

    /// Output format: one object per line, or a single array.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Jsonl)]
    format: OutputFormat,

    /// Output file path.
    #[arg(short, long)]
    out: PathBuf,

    /// Probability that a node is a root (range 0.0–1.0).
    #[arg(long, default_value_t = DEFAULT_ROOT_SHARE, value_parser = parse_probability)]
    root_share: f64,

    /// Not strict; accepted for compatibility and does not change the output.
    #[arg(long, default_value_t = DEFAULT_MAX_CHILDREN_HINT, allow_negative_numbers = true)]
    max_children_hint: i64,

    /// Minimum health value (inclusive).
    #[arg(long, alias = "buffer-min", default_value_t = DEFAULT_HEALTH_MIN, allow_negative_numbers = true)]
    health_min: f64,

    /// Maximum health value (inclusive).
    #[arg(long, alias = "buffer-max", default_value_t = DEFAULT_HEALTH_MAX, allow_negative_numbers = true)]
    health_max: f64,

    /// Earliest timestamp (ISO, UTC), e.g. 2025-01-01T00:00:00.000Z.
    #[arg(long, default_value = "2025-01-01T00:00:00.000Z")]
    start_ts: String,

    /// Latest timestamp (ISO, UTC), e.g. 2025-12-31T23:59:59.000Z.
    #[arg(long, default_value = "2025-12-31T23:59:59.000Z")]
    end_ts: String,

    /// Maximum depth of any tree.
    #[arg(long, alias = "max-level-tree", default_value_t = DEFAULT_MAX_LEVEL, value_parser = clap::value_parser!(u32).range(1..))]
    max_level: u32,

    /// Random seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Also export the output as CSV to this path.
    #[arg(long)]
    csv_out: Option<PathBuf>,

    /// Logging verbosity level (`trace`, `debug`, `info`, `warn`, `error`).
    #[arg(short, long, default_value = "info")]
    verbosity: String,
}

/// Custom parser for probabilities to enforce range [0.0, 1.0]
fn parse_probability(s: &str) -> Result<f64, String> {
    let val: f64 = s.parse().map_err(|_| format!("'{s}' isn't a valid float number"))?;
    if (0.0..=1.0).contains(&val) {
        Ok(val)
    } else {
        Err(format!("value must be between 0.0 and 1.0, got: {val}"))
    }
}

impl Cli {
    /// Turn parsed flags into a run description, validating everything up front.
    fn into_run_config(self) -> Result<RunConfig> {
        let window = TimeWindow::parse(&self.start_ts, &self.end_ts)?;
        let rows = usize::try_from(self.rows)?;

        let forest = ForestConfig {
            root_share: self.root_share,
            max_children_hint: self.max_children_hint,
            health_min: self.health_min,
            health_max: self.health_max,
            max_level: self.max_level,
            ..ForestConfig::new(rows, window)
        };
        forest.validate()?;

        Ok(RunConfig { forest, seed: self.seed, format: self.format, out: self.out, csv_out: self.csv_out })
    }
}

/// Parse flags, run the generator, and print confirmations.
fn main() -> Result<()> {
    let args = Cli::parse();

    // Conform to crate-standard logging.
    tg_core::logging::setup(&args.verbosity);

    let config = args.into_run_config()?;
    info!(rows = config.forest.rows, seed = ?config.seed, "Starting generation");

    let summary = tg_gen::run(&config)?;
    println!("Wrote {} rows to {} as {}", summary.rows, summary.out.display(), summary.format);

    match summary.export {
        Some(ExportOutcome::Written { path, rows, .. }) => {
            println!("Wrote {rows} rows to {} as CSV", path.display());
        },
        Some(ExportOutcome::Empty) => println!("No rows found; CSV export skipped"),
        None => {},
    }
    Ok(())
}
