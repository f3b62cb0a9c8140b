//! results::assembler — aligned per-region results and their consistency gate.
//!
//! Purpose
//! -------
//! Collect the four per-region series produced by the earlier stages and
//! freeze them, together with the shared date axis, into an immutable
//! [`ResultTable`]. Nothing reaches persistence or the console before the
//! structural check in [`ResultAssembler::finish`] has passed.
//!
//! Key behaviors
//! -------------
//! - Every series of every region must have exactly `axis.len()` entries;
//!   the first violation is reported as
//!   [`ResultsError::InconsistentSeriesLength`].
//! - Region names are unique; the aggregate must be present and always ends
//!   up as the last region, whatever order it was pushed in.
//!
//! Invariants & assumptions
//! ------------------------
//! - A `ResultTable` has no mutation API.
//! - `estimation_start` is the first index at which any estimate can exist
//!   under the options used; it only affects which rows are persisted.
use crate::{
    estimation::REstimate,
    results::errors::{ResultsError, ResultsResult},
    series::DateAxis,
};
use ndarray::Array1;
use std::collections::HashSet;

/// The four aligned series of one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionResult {
    pub name: String,
    pub cumulative: Array1<i64>,
    pub incidence: Array1<i64>,
    pub infectious_pool: Array1<i64>,
    pub r_estimate: Vec<REstimate>,
}

impl RegionResult {
    fn lengths(&self) -> [(&'static str, usize); 4] {
        [
            ("cumulative", self.cumulative.len()),
            ("incidence", self.incidence.len()),
            ("infectious pool", self.infectious_pool.len()),
            ("R estimate", self.r_estimate.len()),
        ]
    }
}

/// Accumulates region results for one run.
#[derive(Debug, Clone)]
pub struct ResultAssembler {
    axis: DateAxis,
    aggregate_label: String,
    estimation_start: usize,
    regions: Vec<RegionResult>,
}

impl ResultAssembler {
    pub fn new(axis: DateAxis, aggregate_label: impl Into<String>, estimation_start: usize) -> Self {
        ResultAssembler {
            axis,
            aggregate_label: aggregate_label.into(),
            estimation_start,
            regions: Vec::new(),
        }
    }

    /// Queue one region. Checks are deferred to [`finish`](Self::finish).
    pub fn push(&mut self, region: RegionResult) {
        self.regions.push(region);
    }

    /// Verify structure and freeze.
    ///
    /// Errors
    /// ------
    /// - [`ResultsError::InconsistentSeriesLength`] for the first series whose
    ///   length differs from the axis.
    /// - [`ResultsError::DuplicateRegion`] for a repeated name.
    /// - [`ResultsError::MissingAggregate`] if no region has the aggregate
    ///   label.
    pub fn finish(self) -> ResultsResult<ResultTable> {
        let ResultAssembler { axis, aggregate_label, estimation_start, mut regions } = self;
        let expected = axis.len();

        let mut seen = HashSet::new();
        for region in &regions {
            if !seen.insert(region.name.as_str()) {
                return Err(ResultsError::DuplicateRegion { name: region.name.clone() });
            }
            for (series, actual) in region.lengths() {
                if actual != expected {
                    return Err(ResultsError::InconsistentSeriesLength {
                        region: region.name.clone(),
                        series,
                        expected,
                        actual,
                    });
                }
            }
        }

        let position = regions
            .iter()
            .position(|r| r.name == aggregate_label)
            .ok_or_else(|| ResultsError::MissingAggregate { label: aggregate_label.clone() })?;
        let aggregate = regions.remove(position);
        regions.push(aggregate);

        Ok(ResultTable { axis, aggregate_label, estimation_start, regions })
    }
}

/// One summary line: a region's values on the last axis date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatestRow<'a> {
    pub region: &'a str,
    pub cumulative: i64,
    pub r_estimate: REstimate,
}

/// ResultTable — frozen, structurally checked results of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    axis: DateAxis,
    aggregate_label: String,
    estimation_start: usize,
    regions: Vec<RegionResult>,
}

impl ResultTable {
    pub fn axis(&self) -> &DateAxis {
        &self.axis
    }

    /// All regions, base regions first and the aggregate last.
    pub fn regions(&self) -> &[RegionResult] {
        &self.regions
    }

    pub fn region(&self, name: &str) -> Option<&RegionResult> {
        self.regions.iter().find(|r| r.name == name)
    }

    pub fn aggregate(&self) -> &RegionResult {
        &self.regions[self.regions.len() - 1]
    }

    pub fn aggregate_label(&self) -> &str {
        &self.aggregate_label
    }

    pub fn estimation_start(&self) -> usize {
        self.estimation_start
    }

    /// Values on the last axis date, in region order.
    pub fn latest(&self) -> Vec<LatestRow<'_>> {
        let last = self.axis.len() - 1;
        self.regions
            .iter()
            .map(|r| LatestRow {
                region: &r.name,
                cumulative: r.cumulative[last],
                r_estimate: r.r_estimate[last],
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::UndefinedReason;
    use chrono::NaiveDate;
    use ndarray::array;

    fn axis(len: usize) -> DateAxis {
        let first = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        DateAxis::from_range(first, first + chrono::Duration::days(len as i64 - 1)).unwrap()
    }

    fn region(name: &str, r: f64) -> RegionResult {
        RegionResult {
            name: name.to_string(),
            cumulative: array![1, 3],
            incidence: array![1, 2],
            infectious_pool: array![0, 1],
            r_estimate: vec![REstimate::Undefined(UndefinedReason::InsufficientHistory), REstimate::Defined(r)],
        }
    }

    #[test]
    // Purpose
    // -------
    // A consistent set of regions freezes with the aggregate moved last.
    //
    // Given
    // -----
    // - Aggregate pushed first, then two base regions, axis of 2 days.
    //
    // Expect
    // ------
    // - Order A, B, All Regions; `latest()` reads index 1.
    fn finish_orders_aggregate_last() {
        // Arrange
        let mut assembler = ResultAssembler::new(axis(2), "All Regions", 1);
        assembler.push(region("All Regions", 0.5));
        assembler.push(region("A", 1.0));
        assembler.push(region("B", 2.0));

        // Act
        let table = assembler.finish().unwrap();

        // Assert
        let names: Vec<&str> = table.regions().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "All Regions"]);
        assert_eq!(table.aggregate().name, "All Regions");
        let latest = table.latest();
        assert_eq!(latest[1], LatestRow { region: "B", cumulative: 3, r_estimate: REstimate::Defined(2.0) });
        assert_eq!(table.region("A").unwrap().incidence, array![1, 2]);
        assert_eq!(table.estimation_start(), 1);
    }

    #[test]
    // Purpose
    // -------
    // A series one entry short is a fatal structural error naming the
    // region and the series.
    //
    // Given
    // -----
    // - Region B whose R series has one entry on a 2-day axis.
    //
    // Expect
    // ------
    // - InconsistentSeriesLength { "B", "R estimate", 2, 1 }.
    fn short_series_is_inconsistent() {
        // Arrange
        let mut assembler = ResultAssembler::new(axis(2), "All Regions", 1);
        assembler.push(region("A", 1.0));
        let mut broken = region("B", 1.0);
        broken.r_estimate.pop();
        assembler.push(broken);
        assembler.push(region("All Regions", 1.0));

        // Act
        let err = assembler.finish().unwrap_err();

        // Assert
        assert_eq!(
            err,
            ResultsError::InconsistentSeriesLength {
                region: "B".to_string(),
                series: "R estimate",
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn duplicates_and_missing_aggregate_are_fatal() {
        let mut dup = ResultAssembler::new(axis(2), "All Regions", 1);
        dup.push(region("A", 1.0));
        dup.push(region("A", 1.0));
        assert_eq!(dup.finish().unwrap_err(), ResultsError::DuplicateRegion { name: "A".to_string() });

        let mut missing = ResultAssembler::new(axis(2), "All Regions", 1);
        missing.push(region("A", 1.0));
        assert!(matches!(missing.finish(), Err(ResultsError::MissingAggregate { .. })));
    }
}
