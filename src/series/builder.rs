//! series::builder — canonical region × date cumulative-case matrix.
//!
//! Purpose
//! -------
//! Normalize raw (date, region, cumulative count) observations into a dense
//! matrix over a contiguous [`DateAxis`], one row per configured base region
//! plus a derived aggregate row. This is the only stage that sees the raw feed;
//! everything downstream works on the frozen [`CanonicalSeries`].
//!
//! Key behaviors
//! -------------
//! - [`CanonicalSeriesBuilder`] owns a pre-sized `regions × days` matrix and a
//!   matching "reported" mask, both filled by a single pass over the feed.
//! - Observations for regions outside the configured [`RegionSet`] are counted
//!   and dropped without inspecting their count cell.
//! - Several observations for the same (region, day) are summed, which is how
//!   sub-region rows (e.g. counties) roll up into their region.
//! - [`CanonicalSeriesBuilder::finish`] applies the [`FillPolicy`] to cells
//!   nobody reported, then appends the aggregate row as the column-wise sum of
//!   the finished base rows.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every row of the frozen matrix has exactly `axis.len()` entries.
//! - Cell values are non-negative; negative or unparseable counts of configured
//!   regions are rejected at ingestion.
//! - The aggregate row is always the last row and is never configured.
//!
//! Conventions
//! -----------
//! - Row order follows `RegionSet::base()`; column `j` is `axis.date(j)`.
//! - Zero-fill is the default policy. It mirrors the historical behaviour of
//!   treating an unreported region-day as zero cumulative cases, which can
//!   produce artificial one-day drops; carry-forward is available to compare.
//!
//! Testing notes
//! -------------
//! - Unit tests cover aggregate identity, both fill policies, summing of
//!   repeated observations, ignored regions, and axis construction from the
//!   observation span.
use crate::{
    feed::errors::FeedError,
    series::{
        axis::DateAxis,
        errors::{SeriesError, SeriesResult},
        regions::RegionSet,
    },
};
use chrono::NaiveDate;
use log::debug;
use ndarray::{Array2, ArrayView1, Axis, s};

/// Cumulative count cell of a raw feed row.
///
/// A cell that does not parse is carried as [`RawCount::Invalid`] so that it
/// only fails the run if its region is configured.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCount {
    Value(i64),
    Invalid(FeedError),
}

/// One raw feed row: cumulative cases reported for `region` on `date`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawObservation {
    pub date: NaiveDate,
    pub region: String,
    pub count: RawCount,
}

impl RawObservation {
    pub fn new(date: NaiveDate, region: impl Into<String>, cumulative: i64) -> Self {
        RawObservation { date, region: region.into(), count: RawCount::Value(cumulative) }
    }

    /// Row whose count cell failed to parse with `error`.
    pub fn invalid(date: NaiveDate, region: impl Into<String>, error: FeedError) -> Self {
        RawObservation { date, region: region.into(), count: RawCount::Invalid(error) }
    }

    /// Parsed cumulative count, `None` for an invalid cell.
    pub fn cumulative(&self) -> Option<i64> {
        match self.count {
            RawCount::Value(value) => Some(value),
            RawCount::Invalid(_) => None,
        }
    }
}

/// How to fill a (region, day) cell that no observation reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillPolicy {
    /// Unreported cells count as zero cumulative cases.
    #[default]
    ZeroFill,
    /// Unreported cells repeat the previous day's value (zero before the
    /// first report).
    CarryForward,
}

/// CanonicalSeriesBuilder — single-pass builder for the cumulative matrix.
///
/// Purpose
/// -------
/// Own the pre-sized matrix while the feed is scanned, so no other component
/// can observe a partially built series.
///
/// Fields
/// ------
/// - `regions`: configured base regions and aggregate label.
/// - `axis`: contiguous date axis fixing the column count.
/// - `policy`: fill policy applied in [`finish`](Self::finish).
/// - `cells`: `regions.len() × axis.len()` running sums of reported counts.
/// - `reported`: whether any observation touched a cell.
/// - `ignored`: observations dropped because their region is not configured.
#[derive(Debug, Clone)]
pub struct CanonicalSeriesBuilder {
    regions: RegionSet,
    axis: DateAxis,
    policy: FillPolicy,
    cells: Array2<i64>,
    reported: Array2<bool>,
    ignored: usize,
}

impl CanonicalSeriesBuilder {
    pub fn new(regions: RegionSet, axis: DateAxis, policy: FillPolicy) -> Self {
        let shape = (regions.len(), axis.len());
        CanonicalSeriesBuilder {
            regions,
            axis,
            policy,
            cells: Array2::zeros(shape),
            reported: Array2::from_elem(shape, false),
            ignored: 0,
        }
    }

    /// Build a builder whose axis spans every observation date, ingest all
    /// observations, and freeze the result.
    ///
    /// The axis covers observations of ignored regions too, so it reflects
    /// the feed's own date range.
    ///
    /// # Errors
    /// - [`SeriesError::EmptyFeed`] if `observations` is empty.
    /// - Any error from [`ingest`](Self::ingest).
    pub fn from_observations(
        regions: RegionSet, policy: FillPolicy, observations: &[RawObservation],
    ) -> SeriesResult<CanonicalSeries> {
        let axis = DateAxis::spanning(observations.iter().map(|obs| obs.date))
            .ok_or(SeriesError::EmptyFeed)?;
        let mut builder = CanonicalSeriesBuilder::new(regions, axis, policy);
        for obs in observations {
            builder.ingest(obs)?;
        }
        Ok(builder.finish())
    }

    /// Add one observation to the matrix.
    ///
    /// Rows for unconfigured regions are counted and dropped before their
    /// count cell is looked at.
    ///
    /// # Errors
    /// - [`SeriesError::MalformedFeed`] for a count cell that did not parse.
    /// - [`SeriesError::NegativeCount`] for a negative cumulative value.
    /// - [`SeriesError::DateOutsideAxis`] if the date is not on the axis.
    pub fn ingest(&mut self, obs: &RawObservation) -> SeriesResult<()> {
        let Some(row) = self.regions.index_of(obs.region.trim()) else {
            self.ignored += 1;
            return Ok(());
        };
        let cumulative = match &obs.count {
            RawCount::Value(value) if *value < 0 => {
                return Err(SeriesError::NegativeCount {
                    region: obs.region.clone(),
                    date: obs.date,
                    value: *value,
                });
            }
            RawCount::Value(value) => *value,
            RawCount::Invalid(err) => return Err(SeriesError::MalformedFeed(err.clone())),
        };
        let col = self.axis.index_of(obs.date).ok_or(SeriesError::DateOutsideAxis {
            date: obs.date,
            first: self.axis.first(),
            last: self.axis.last(),
        })?;
        self.cells[[row, col]] += cumulative;
        self.reported[[row, col]] = true;
        Ok(())
    }

    /// Number of observations dropped so far for unconfigured regions.
    pub fn ignored(&self) -> usize {
        self.ignored
    }

    /// Apply the fill policy, append the aggregate row, and freeze.
    pub fn finish(self) -> CanonicalSeries {
        let CanonicalSeriesBuilder { regions, axis, policy, mut cells, reported, ignored } = self;

        if ignored > 0 {
            debug!("ignored {ignored} observations for regions outside the configured list");
        }

        if policy == FillPolicy::CarryForward {
            for (mut row, mask) in cells.outer_iter_mut().zip(reported.outer_iter()) {
                let mut last = 0_i64;
                for (cell, &seen) in row.iter_mut().zip(mask.iter()) {
                    if seen {
                        last = *cell;
                    } else {
                        *cell = last;
                    }
                }
            }
        }

        let n_base = regions.len();
        let mut cumulative = Array2::<i64>::zeros((n_base + 1, axis.len()));
        cumulative.slice_mut(s![..n_base, ..]).assign(&cells);
        let aggregate = cells.sum_axis(Axis(0));
        cumulative.row_mut(n_base).assign(&aggregate);

        CanonicalSeries { regions, axis, cumulative }
    }
}

/// CanonicalSeries — frozen cumulative matrix with its axis and regions.
///
/// Rows `0..regions.len()` are the base regions in configured order; the last
/// row is the aggregate. No mutation API.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalSeries {
    regions: RegionSet,
    axis: DateAxis,
    cumulative: Array2<i64>,
}

impl CanonicalSeries {
    pub fn axis(&self) -> &DateAxis {
        &self.axis
    }

    pub fn regions(&self) -> &RegionSet {
        &self.regions
    }

    /// Full matrix, `(regions + 1) × days`.
    pub fn matrix(&self) -> &Array2<i64> {
        &self.cumulative
    }

    /// Cumulative series for a base region or the aggregate label.
    pub fn series(&self, name: &str) -> Option<ArrayView1<'_, i64>> {
        if name == self.regions.aggregate_label() {
            return Some(self.aggregate());
        }
        self.regions.index_of(name).map(|row| self.cumulative.row(row))
    }

    pub fn aggregate(&self) -> ArrayView1<'_, i64> {
        self.cumulative.row(self.regions.len())
    }

    /// `(name, series)` pairs, base regions first and aggregate last.
    pub fn rows(&self) -> impl Iterator<Item = (&str, ArrayView1<'_, i64>)> {
        self.regions.all_names().zip(self.cumulative.outer_iter())
    }
}
