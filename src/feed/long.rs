//! Long feed: one CSV row per (date, region) with a cumulative count.
use crate::{
    feed::{
        RawCaseFeed,
        errors::{FeedError, FeedResult},
        layout::{LongLayout, parse_iso_date},
    },
    series::RawObservation,
};
use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use std::io::Read;

/// LongFeed — reader over a `date,region,…,cases` table.
///
/// The header is validated against the [`LongLayout`] in [`LongFeed::new`];
/// data rows are only parsed when [`RawCaseFeed::observations`] is called.
/// A count cell that is not an integer is passed on as
/// [`RawCount::Invalid`](crate::series::RawCount::Invalid) rather than failing
/// the read, since the row may belong to an ignored region.
pub struct LongFeed<R: Read> {
    reader: Reader<R>,
    layout: LongLayout,
}

impl<R: Read> LongFeed<R> {
    /// Wrap `source` and validate its header.
    ///
    /// # Errors
    /// - [`FeedError::MissingHeader`] for an empty source.
    /// - Layout errors from [`LongLayout::validate`].
    pub fn new(source: R, layout: LongLayout) -> FeedResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(source);
        let header = reader.headers()?.clone();
        if header.is_empty() {
            return Err(FeedError::MissingHeader);
        }
        layout.validate(&header)?;
        Ok(LongFeed { reader, layout })
    }

    fn parse_row(&self, record: &StringRecord) -> FeedResult<RawObservation> {
        let line = record.position().map_or(0, |p| p.line());
        if record.len() < self.layout.min_width() {
            return Err(FeedError::RowTooShort {
                line,
                width: record.len(),
                expected: self.layout.min_width(),
            });
        }
        let date_cell = &record[self.layout.date_column];
        let date = parse_iso_date(date_cell)
            .ok_or_else(|| FeedError::InvalidDate { line, value: date_cell.to_string() })?;
        let region = &record[self.layout.region_column];
        let count_cell = &record[self.layout.cases_column];
        Ok(match count_cell.parse::<i64>() {
            Ok(cumulative) => RawObservation::new(date, region, cumulative),
            Err(_) => RawObservation::invalid(
                date,
                region,
                FeedError::InvalidCount {
                    line,
                    column: self.layout.cases_column,
                    value: count_cell.to_string(),
                },
            ),
        })
    }
}

impl<R: Read> RawCaseFeed for LongFeed<R> {
    fn observations(&mut self) -> FeedResult<Vec<RawObservation>> {
        let mut out = Vec::new();
        let mut record = StringRecord::new();
        while self.reader.read_record(&mut record)? {
            out.push(self.parse_row(&record)?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::RawCount;
    use chrono::NaiveDate;

    const SAMPLE: &str = "\
date,state,fips,cases,deaths
2020-03-01,Washington,53,11,1
2020-03-01,Oregon,41,1,0
2020-03-02,Washington,53,18,6
";

    #[test]
    // Purpose
    // -------
    // Parse a well-formed long feed into observations in file order.
    //
    // Given
    // -----
    // - Three rows in the default state-level layout.
    //
    // Expect
    // ------
    // - Three observations; the third is Washington on 2020-03-02 with 18.
    fn reads_rows_in_order() {
        // Arrange
        let mut feed = LongFeed::new(SAMPLE.as_bytes(), LongLayout::default()).unwrap();

        // Act
        let obs = feed.observations().unwrap();

        // Assert
        assert_eq!(obs.len(), 3);
        assert_eq!(
            obs[2],
            RawObservation::new(NaiveDate::from_ymd_opt(2020, 3, 2).unwrap(), "Washington", 18)
        );
    }

    #[test]
    fn layout_mismatch_is_detected_before_reading_rows() {
        let text = "date,county,state,fips,cases\n2020-03-01,King,Washington,53061,1\n";
        let err = LongFeed::new(text.as_bytes(), LongLayout::default()).err().unwrap();
        assert!(matches!(err, FeedError::LayoutMismatch { column: 1, .. }));
    }

    #[test]
    fn bad_dates_are_fatal_and_bad_counts_are_forwarded() {
        let bad_date = "date,state,fips,cases\n03/01/2020,Ohio,39,5\n";
        let mut feed = LongFeed::new(bad_date.as_bytes(), LongLayout::default()).unwrap();
        assert!(matches!(feed.observations(), Err(FeedError::InvalidDate { line: 2, .. })));

        let bad_count = "date,state,fips,cases\n2020-03-01,Ohio,39,five\n";
        let mut feed = LongFeed::new(bad_count.as_bytes(), LongLayout::default()).unwrap();
        let obs = feed.observations().unwrap();
        assert_eq!(obs[0].cumulative(), None);
        assert!(matches!(
            &obs[0].count,
            RawCount::Invalid(FeedError::InvalidCount { line: 2, column: 3, .. })
        ));
    }

    #[test]
    fn empty_source_has_no_header() {
        let err = LongFeed::new("".as_bytes(), LongLayout::default()).err().unwrap();
        assert_eq!(err, FeedError::MissingHeader);
    }
}
