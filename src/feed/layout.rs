//! feed::layout — expected column layouts and their sentinel checks.
//!
//! Purpose
//! -------
//! Describe where the date, region, and count fields live in each supported
//! feed shape, and validate a header row against that description exactly
//! once, before any data row is read.
//!
//! Key behaviors
//! -------------
//! - [`LongLayout`]: one row per (date, region). Defaults follow the
//!   `date,state,fips,cases,deaths` state-level layout.
//! - [`WideLayout`]: one row per sub-region, one column per date. Defaults
//!   follow the confirmed-cases time-series layout with `Province_State` at
//!   column 6 and `M/D/YY` date headers from column 11 on.
//! - Both `validate` methods compare sentinel headers by position; any
//!   mismatch is a [`FeedError::LayoutMismatch`].
//!
//! Conventions
//! -----------
//! - Column positions are 0-based.
//! - Header comparison is exact after trimming surrounding whitespace.
use crate::feed::errors::{FeedError, FeedResult};
use chrono::{Datelike, NaiveDate};
use csv::StringRecord;

/// Positions and sentinel names of a long (row per date/region) feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongLayout {
    pub date_column: usize,
    pub date_header: String,
    pub region_column: usize,
    pub region_header: String,
    pub cases_column: usize,
    pub cases_header: String,
}

impl Default for LongLayout {
    fn default() -> Self {
        LongLayout {
            date_column: 0,
            date_header: "date".to_string(),
            region_column: 1,
            region_header: "state".to_string(),
            cases_column: 3,
            cases_header: "cases".to_string(),
        }
    }
}

impl LongLayout {
    /// Check the three sentinel headers.
    ///
    /// # Errors
    /// - [`FeedError::MissingColumn`] if the header is too short.
    /// - [`FeedError::LayoutMismatch`] on the first sentinel that differs.
    pub fn validate(&self, header: &StringRecord) -> FeedResult<()> {
        expect_header(header, self.date_column, &self.date_header)?;
        expect_header(header, self.region_column, &self.region_header)?;
        expect_header(header, self.cases_column, &self.cases_header)?;
        Ok(())
    }

    /// Minimum number of fields a data row must have.
    pub fn min_width(&self) -> usize {
        self.date_column.max(self.region_column).max(self.cases_column) + 1
    }
}

/// Positions and sentinel names of a wide (column per date) feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideLayout {
    pub region_column: usize,
    pub region_header: String,
    pub first_date_column: usize,
}

impl Default for WideLayout {
    fn default() -> Self {
        WideLayout {
            region_column: 6,
            region_header: "Province_State".to_string(),
            first_date_column: 11,
        }
    }
}

impl WideLayout {
    /// Check the region sentinel and parse every date header.
    ///
    /// Returns the dates in column order.
    ///
    /// # Errors
    /// - [`FeedError::MissingColumn`] / [`FeedError::LayoutMismatch`] for the
    ///   region sentinel.
    /// - [`FeedError::NoDateColumns`] if nothing follows `first_date_column`.
    /// - [`FeedError::InvalidDate`] (line 1) for a date header that does not
    ///   parse as `M/D/YY`.
    pub fn validate(&self, header: &StringRecord) -> FeedResult<Vec<NaiveDate>> {
        expect_header(header, self.region_column, &self.region_header)?;
        if header.len() <= self.first_date_column {
            return Err(FeedError::NoDateColumns);
        }
        header
            .iter()
            .skip(self.first_date_column)
            .map(|cell| {
                parse_us_short_date(cell)
                    .ok_or_else(|| FeedError::InvalidDate { line: 1, value: cell.to_string() })
            })
            .collect()
    }
}

fn expect_header(header: &StringRecord, column: usize, expected: &str) -> FeedResult<()> {
    let found = header
        .get(column)
        .ok_or(FeedError::MissingColumn { column, width: header.len() })?
        .trim();
    if found != expected {
        return Err(FeedError::LayoutMismatch {
            column,
            expected: expected.to_string(),
            found: found.to_string(),
        });
    }
    Ok(())
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Parse an `M/D/YY` date such as `1/22/20` (years are 20YY).
pub fn parse_us_short_date(value: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value.trim(), "%m/%d/%y").ok()?;
    // `%y` puts 70..=99 in the 1900s.
    if date.year() < 2000 { date.with_year(date.year() + 100) } else { Some(date) }
}
