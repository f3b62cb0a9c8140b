//! pipeline — one complete run from input file to result tables.
//!
//! Purpose
//! -------
//! Wire the stages together in their fixed order: feed → canonical series →
//! incidence and infectious pool → R estimates → assembled results →
//! persisted tables. Each stage returns `Result`; the first failure aborts
//! the run and nothing is written.
//!
//! Key behaviors
//! -------------
//! - [`load_feed`] checks the input exists, opens it with the configured or
//!   detected layout and reads every observation.
//! - [`build_results`] freezes the canonical matrix (aggregate included),
//!   then derives and estimates every region in parallel with rayon. The
//!   parallel map writes one slot per region and joins before assembly.
//! - [`persist_results`] writes the R table and, on request, the cumulative,
//!   incidence and infectious-pool tables next to it.
//!
//! Invariants & assumptions
//! ------------------------
//! - The aggregate row is computed from finished base rows before any
//!   estimation starts.
//! - Region order in the output follows the configured list, aggregate last.
//!
//! Conventions
//! -----------
//! - Stage milestones log at `info`, per-region details at `debug`, suspicious
//!   data (negative daily counts) at `warn`.
pub mod errors;
pub mod options;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{PipelineError, PipelineResult};
pub use self::options::PipelineOptions;

use crate::{
    estimation::{EstimationInput, EstimationResult, GrowthEstimator},
    feed::open_feed,
    results::{RegionResult, ResultAssembler, ResultTable, SeriesKind, write_series},
    series::{CanonicalSeriesBuilder, RawObservation, derive_incidence, derive_infectious_pool},
};
use log::{debug, info, warn};
use ndarray::ArrayView1;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Read every observation from the feed at `input`.
///
/// # Errors
/// - [`PipelineError::InputNotFound`] if `input` is not a file.
/// - [`PipelineError::Series`] wrapping the feed error for unreadable or
///   mislaid-out input.
pub fn load_feed(input: &Path, options: &PipelineOptions) -> PipelineResult<Vec<RawObservation>> {
    if !input.is_file() {
        return Err(PipelineError::InputNotFound { path: input.to_path_buf() });
    }
    info!("reading case feed {}", input.display());
    let mut feed = open_feed(input, options.format, &options.layouts)?;
    let observations = feed.observations()?;
    info!("read {} observations", observations.len());
    Ok(observations)
}

/// Build, estimate and assemble results from loaded observations.
///
/// Parameters
/// ----------
/// - `observations`: raw feed rows, any order.
/// - `options`: regions, fill policy and estimator settings.
///
/// Returns
/// -------
/// A structurally checked [`ResultTable`].
///
/// Errors
/// ------
/// - [`PipelineError::Series`] for an empty feed, negative counts and other
///   ingestion failures.
/// - [`PipelineError::Estimation`] if a regression fails.
/// - [`PipelineError::Results`] if assembly finds an inconsistent series.
pub fn build_results(
    observations: &[RawObservation], options: &PipelineOptions,
) -> PipelineResult<ResultTable> {
    let canonical = CanonicalSeriesBuilder::from_observations(
        options.regions.clone(),
        options.fill_policy,
        observations,
    )?;
    let axis = *canonical.axis();
    info!(
        "canonical series: {} regions over {} days ({} to {})",
        options.regions.len(),
        axis.len(),
        axis.first(),
        axis.last()
    );

    let estimator = GrowthEstimator::new(options.estimator);
    let rows: Vec<(&str, ArrayView1<'_, i64>)> = canonical.rows().collect();
    let regions = rows
        .par_iter()
        .map(|(name, cumulative)| derive_region(name, *cumulative, &estimator))
        .collect::<EstimationResult<Vec<_>>>()?;

    let mut assembler = ResultAssembler::new(
        axis,
        options.regions.aggregate_label(),
        options.estimator.first_eligible_index(),
    );
    for region in regions {
        assembler.push(region);
    }
    let table = assembler.finish()?;
    info!("estimated R for {} regions", table.regions().len());
    Ok(table)
}

/// [`load_feed`] followed by [`build_results`].
///
/// # Errors
/// Any error of either stage.
pub fn run(input: &Path, options: &PipelineOptions) -> PipelineResult<ResultTable> {
    let observations = load_feed(input, options)?;
    build_results(&observations, options)
}

/// Write result tables for `table`.
///
/// The R table goes to `output`. With `all_series`, the other three series
/// go next to it as `<stem>_cases`, `<stem>_new_cases` and
/// `<stem>_infectious` with the same extension.
///
/// Returns
/// -------
/// The paths actually written. A path that already exists is skipped with a
/// warning unless `overwrite` is set.
///
/// Errors
/// ------
/// - [`PipelineError::Results`] on write failures.
pub fn persist_results(
    table: &ResultTable, output: &Path, all_series: bool, overwrite: bool,
) -> PipelineResult<Vec<PathBuf>> {
    let kinds: &[SeriesKind] =
        if all_series { &SeriesKind::ALL } else { &[SeriesKind::Reproduction] };

    let mut written = Vec::new();
    for &kind in kinds {
        let path = companion_path(output, kind);
        if write_series(table, kind, &path, overwrite)? {
            info!("wrote {}", path.display());
            written.push(path);
        } else {
            warn!("{} already exists; not overwritten", path.display());
        }
    }
    Ok(written)
}

/// Output path for `kind`: `output` itself for R, a suffixed sibling
/// otherwise.
pub fn companion_path(output: &Path, kind: SeriesKind) -> PathBuf {
    let suffix = kind.file_suffix();
    if suffix.is_empty() {
        return output.to_path_buf();
    }
    let stem = output.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let extension = output.extension().map(|e| e.to_string_lossy().into_owned());
    let name = match extension {
        Some(ext) => format!("{stem}{suffix}.{ext}"),
        None => format!("{stem}{suffix}"),
    };
    output.with_file_name(name)
}

fn derive_region(
    name: &str, cumulative: ArrayView1<'_, i64>, estimator: &GrowthEstimator,
) -> EstimationResult<RegionResult> {
    let incidence = derive_incidence(cumulative);
    let drops = incidence.iter().filter(|&&v| v < 0).count();
    if drops > 0 {
        warn!("{name}: {drops} days with negative new cases (cumulative count revised down)");
    }
    let infectious_pool =
        derive_infectious_pool(incidence.view(), estimator.options().generation_interval());

    let cumulative_f = cumulative.mapv(|v| v as f64);
    let pool_f = infectious_pool.mapv(|v| v as f64);
    let input = EstimationInput::new(cumulative_f.view(), pool_f.view())?;
    let r_estimate = estimator.estimate(&input)?;
    debug!(
        "{name}: {} of {} days estimable",
        r_estimate.iter().filter(|r| r.is_defined()).count(),
        r_estimate.len()
    );

    Ok(RegionResult {
        name: name.to_string(),
        cumulative: cumulative.to_owned(),
        incidence,
        infectious_pool,
        r_estimate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{estimation::EstimatorOptions, series::RegionSet};
    use chrono::NaiveDate;

    #[test]
    fn companion_paths_share_stem_and_extension() {
        let out = Path::new("/tmp/out/Re.csv");
        assert_eq!(companion_path(out, SeriesKind::Reproduction), PathBuf::from("/tmp/out/Re.csv"));
        assert_eq!(companion_path(out, SeriesKind::Cumulative), PathBuf::from("/tmp/out/Re_cases.csv"));
        assert_eq!(
            companion_path(Path::new("Re"), SeriesKind::InfectiousPool),
            PathBuf::from("Re_infectious")
        );
    }

    #[test]
    // Purpose
    // -------
    // `build_results` produces aligned series for every region with the
    // aggregate last and the aggregate's R computed from summed counts.
    //
    // Given
    // -----
    // - Two regions doubling daily from 40 and 60 over 10 days.
    //
    // Expect
    // ------
    // - Regions A, B, All Regions; R at the last day equals 7 ln 2 for all
    //   three.
    fn build_results_estimates_every_region() {
        // Arrange
        let first = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        let mut observations = Vec::new();
        for day in 0..10_i64 {
            let date = first + chrono::Duration::days(day);
            observations.push(RawObservation::new(date, "A", 40 << day));
            observations.push(RawObservation::new(date, "B", 60 << day));
        }
        let options = PipelineOptions::new(
            RegionSet::with_default_aggregate(["A", "B"]).unwrap(),
            EstimatorOptions::default(),
        );

        // Act
        let table = build_results(&observations, &options).unwrap();

        // Assert
        let names: Vec<&str> = table.regions().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "All Regions"]);
        for region in table.regions() {
            let r = region.r_estimate[9].value().unwrap();
            assert!((r - 7.0 * std::f64::consts::LN_2).abs() < 1e-9, "{}: {r}", region.name);
        }
        assert_eq!(table.aggregate().cumulative[0], 100);
    }

    #[test]
    fn missing_input_is_reported() {
        let options = PipelineOptions::new(
            RegionSet::with_default_aggregate(["A"]).unwrap(),
            EstimatorOptions::default(),
        );
        let err = run(Path::new("/definitely/not/here.csv"), &options).unwrap_err();
        assert_eq!(err, PipelineError::InputNotFound { path: PathBuf::from("/definitely/not/here.csv") });
    }
}
