//! `estimate` — R estimates from a daily cumulative case feed.
//!
//! ```text
//! estimate us-states.csv Re.csv
//! estimate time_series_covid19_confirmed_US.csv Re.csv --format wide --all-series
//! ```
//!
//! Reads the feed, estimates R for every configured region plus the
//! aggregate, writes the R table (and optionally the companion series) and
//! prints a summary of the latest day. Any fatal error prints one line and
//! exits non-zero before anything is written.

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};

use rt_estimate::{
    estimation::{
        EstimatorOptions, LeastSquaresSolver, RegressionTarget,
        options::{DEFAULT_GENERATION_INTERVAL, DEFAULT_SERIAL_INTERVAL, DEFAULT_WINDOW},
    },
    feed::FeedFormat,
    pipeline::{self, PipelineOptions},
    results::{SummaryScope, render_summary},
    series::{DEFAULT_AGGREGATE_LABEL, FillPolicy, RegionSet},
};

/// Regions used when no `--regions` file is given: the 50 US states and DC.
const DEFAULT_REGIONS: [&str; 51] = [
    "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado", "Connecticut",
    "Delaware", "District of Columbia", "Florida", "Georgia", "Hawaii", "Idaho", "Illinois",
    "Indiana", "Iowa", "Kansas", "Kentucky", "Louisiana", "Maine", "Maryland", "Massachusetts",
    "Michigan", "Minnesota", "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada",
    "New Hampshire", "New Jersey", "New Mexico", "New York", "North Carolina", "North Dakota",
    "Ohio", "Oklahoma", "Oregon", "Pennsylvania", "Rhode Island", "South Carolina",
    "South Dakota", "Tennessee", "Texas", "Utah", "Vermont", "Virginia", "Washington",
    "West Virginia", "Wisconsin", "Wyoming",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Auto,
    Long,
    Wide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TargetArg {
    Raw,
    Shifted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FillArg {
    Zero,
    Carry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SolverArg {
    Centered,
    Svd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SummaryArg {
    All,
    Aggregate,
}

/// Estimate the effective reproduction number R per region from daily
/// cumulative case counts.
#[derive(Parser, Debug)]
#[command(name = "estimate")]
#[command(version)]
struct Cli {
    /// Case feed (CSV, long or wide layout)
    input: PathBuf,

    /// Output table for the R estimates
    output: PathBuf,

    /// Feed layout; `auto` detects it from the header row
    #[arg(long, value_enum, default_value = "auto")]
    format: FormatArg,

    /// File with one base region per line (default: 50 states + DC)
    #[arg(long)]
    regions: Option<PathBuf>,

    /// Label of the derived aggregate row
    #[arg(long, default_value = DEFAULT_AGGREGATE_LABEL)]
    aggregate_label: String,

    /// Regression window in days
    #[arg(long, default_value_t = DEFAULT_WINDOW)]
    window: usize,

    /// Serial interval in days (scales the daily growth rate into R)
    #[arg(long, default_value_t = DEFAULT_SERIAL_INTERVAL)]
    serial_interval: f64,

    /// Generation interval in days (infectious-pool length)
    #[arg(long, default_value_t = DEFAULT_GENERATION_INTERVAL)]
    generation_interval: usize,

    /// Minimum baseline for an estimate (default: 35 raw, 20 shifted)
    #[arg(long)]
    noise_floor: Option<f64>,

    /// Quantity to regress
    #[arg(long, value_enum, default_value = "raw")]
    target: TargetArg,

    /// Treatment of unreported region-days
    #[arg(long, value_enum, default_value = "zero")]
    fill: FillArg,

    /// Least-squares solver
    #[arg(long, value_enum, default_value = "centered")]
    solver: SolverArg,

    /// Also write cumulative, new-case and infectious-pool tables
    #[arg(long)]
    all_series: bool,

    /// Regions shown in the console summary
    #[arg(long, value_enum, default_value = "all")]
    summary: SummaryArg,

    /// Leave existing output files untouched
    #[arg(long)]
    no_overwrite: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let regions = match &cli.regions {
        Some(path) => RegionSet::new(read_region_file(path)?, &cli.aggregate_label),
        None => RegionSet::new(DEFAULT_REGIONS, &cli.aggregate_label),
    }
    .context("invalid region list")?;

    let target = match cli.target {
        TargetArg::Raw => RegressionTarget::RawWindow,
        TargetArg::Shifted => RegressionTarget::ShiftedWindow,
    };
    let solver = match cli.solver {
        SolverArg::Centered => LeastSquaresSolver::Centered,
        SolverArg::Svd => LeastSquaresSolver::Svd,
    };
    let estimator = EstimatorOptions::new(
        cli.window,
        cli.serial_interval,
        cli.generation_interval,
        target,
        cli.noise_floor,
        solver,
    )
    .context("invalid estimator options")?;

    let format = match cli.format {
        FormatArg::Auto => None,
        FormatArg::Long => Some(FeedFormat::Long),
        FormatArg::Wide => Some(FeedFormat::Wide),
    };
    let fill = match cli.fill {
        FillArg::Zero => FillPolicy::ZeroFill,
        FillArg::Carry => FillPolicy::CarryForward,
    };
    let options =
        PipelineOptions::new(regions, estimator).with_format(format).with_fill_policy(fill);

    let table = pipeline::run(&cli.input, &options)?;
    let written = pipeline::persist_results(&table, &cli.output, cli.all_series, !cli.no_overwrite)?;
    info!("{} table(s) written", written.len());

    let scope = match cli.summary {
        SummaryArg::All => SummaryScope::All,
        SummaryArg::Aggregate => SummaryScope::AggregateOnly,
    };
    print!("{}", render_summary(&table, scope));
    Ok(())
}

fn read_region_file(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read region list {}", path.display()))?;
    let names: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        bail!("region list {} is empty", path.display());
    }
    Ok(names)
}
