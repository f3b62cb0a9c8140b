//! series::errors — structural failures while building canonical case series.
//!
//! Purpose
//! -------
//! Provide the error type for the ingestion stage: region-list configuration,
//! feed layout problems, and cells that cannot be placed on the date axis.
//! Every variant here is fatal for a run; per-point degradations never reach
//! this module.
//!
//! Conventions
//! -----------
//! - Feed-level parsing failures arrive as [`FeedError`] and are wrapped in
//!   [`SeriesError::MalformedFeed`] by the `From` conversion below.
//! - Messages name the offending region/date/value so a one-line diagnostic
//!   printed by the binary is enough to locate the problem in the input file.
use crate::feed::errors::FeedError;
use chrono::NaiveDate;

/// Result alias for the ingestion stage.
pub type SeriesResult<T> = Result<T, SeriesError>;

/// Fatal errors raised while building the canonical region × date matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    // ---- Configuration ----
    /// The configured base-region list is empty.
    EmptyRegionList,

    /// A region name appears twice in the configured list.
    DuplicateRegion { name: String },

    /// A region name is blank after trimming.
    BlankRegionName { index: usize },

    /// A configured base region uses the aggregate label.
    AggregateLabelCollision { name: String },

    // ---- Feed ----
    /// The raw feed does not match the expected layout or cannot be parsed.
    MalformedFeed(FeedError),

    /// The raw feed carried no dated observations at all.
    EmptyFeed,

    /// A cumulative count is negative.
    NegativeCount { region: String, date: NaiveDate, value: i64 },

    // ---- Axis ----
    /// An observation falls outside the pre-sized date axis.
    DateOutsideAxis { date: NaiveDate, first: NaiveDate, last: NaiveDate },

    /// The requested axis bounds are reversed.
    InvalidAxisRange { first: NaiveDate, last: NaiveDate },
}

impl std::error::Error for SeriesError {}

impl std::fmt::Display for SeriesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            SeriesError::EmptyRegionList => {
                write!(f, "Region list is empty; at least one base region is required.")
            }
            SeriesError::DuplicateRegion { name } => {
                write!(f, "Region {name:?} is listed more than once.")
            }
            SeriesError::BlankRegionName { index } => {
                write!(f, "Region name at position {index} is blank.")
            }
            SeriesError::AggregateLabelCollision { name } => {
                write!(f, "Region {name:?} collides with the aggregate label.")
            }
            // ---- Feed ----
            SeriesError::MalformedFeed(err) => {
                write!(f, "File format may have changed: {err}")
            }
            SeriesError::EmptyFeed => {
                write!(f, "Input feed contains no dated observations.")
            }
            SeriesError::NegativeCount { region, date, value } => {
                write!(f, "Negative cumulative count {value} for {region} on {date}.")
            }
            // ---- Axis ----
            SeriesError::DateOutsideAxis { date, first, last } => {
                write!(f, "Date {date} lies outside the date axis [{first}, {last}].")
            }
            SeriesError::InvalidAxisRange { first, last } => {
                write!(f, "Date axis start {first} is after its end {last}.")
            }
        }
    }
}

impl From<FeedError> for SeriesError {
    fn from(err: FeedError) -> SeriesError {
        SeriesError::MalformedFeed(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Check that feed errors are surfaced as `MalformedFeed` and keep
    // their own message inside the series-level diagnostic.
    //
    // Given
    // -----
    // - A `FeedError::LayoutMismatch` for column 6.
    //
    // Expect
    // ------
    // - Conversion yields `SeriesError::MalformedFeed`.
    // - The display string mentions the expected header.
    fn feed_error_converts_to_malformed_feed() {
        // Arrange
        let feed_err = FeedError::LayoutMismatch {
            column: 6,
            expected: "Province_State".to_string(),
            found: "Admin2".to_string(),
        };

        // Act
        let err: SeriesError = feed_err.clone().into();

        // Assert
        assert_eq!(err, SeriesError::MalformedFeed(feed_err));
        assert!(err.to_string().contains("Province_State"));
    }

    #[test]
    fn negative_count_message_names_region_and_date() {
        let date = NaiveDate::from_ymd_opt(2020, 4, 1).unwrap();
        let err = SeriesError::NegativeCount { region: "Ohio".to_string(), date, value: -3 };
        let msg = err.to_string();
        assert!(msg.contains("Ohio") && msg.contains("2020-04-01") && msg.contains("-3"));
    }
}
