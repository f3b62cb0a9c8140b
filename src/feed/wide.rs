//! Wide feed: one CSV row per sub-region, one cumulative-count column per date.
//!
//! Each data row expands into one observation per date column. Several rows
//! usually share a region (one per county); the builder sums them. Count cells
//! that do not parse are forwarded as invalid observations; the builder decides
//! whether they matter.
use crate::{
    feed::{
        RawCaseFeed,
        errors::{FeedError, FeedResult},
        layout::WideLayout,
    },
    series::RawObservation,
};
use chrono::NaiveDate;
use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use std::io::Read;

/// WideFeed — reader over a region × date table.
///
/// Date headers are parsed and the region sentinel checked in
/// [`WideFeed::new`].
pub struct WideFeed<R: Read> {
    reader: Reader<R>,
    layout: WideLayout,
    dates: Vec<NaiveDate>,
}

impl<R: Read> WideFeed<R> {
    /// Wrap `source`, validate its header and parse the date columns.
    ///
    /// # Errors
    /// - [`FeedError::MissingHeader`] for an empty source.
    /// - Layout errors from [`WideLayout::validate`].
    pub fn new(source: R, layout: WideLayout) -> FeedResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(source);
        let header = reader.headers()?.clone();
        if header.is_empty() {
            return Err(FeedError::MissingHeader);
        }
        let dates = layout.validate(&header)?;
        Ok(WideFeed { reader, layout, dates })
    }

    /// Dates taken from the header, in column order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    fn expand_row(&self, record: &StringRecord, out: &mut Vec<RawObservation>) -> FeedResult<()> {
        let line = record.position().map_or(0, |p| p.line());
        let expected = self.layout.first_date_column + self.dates.len();
        if record.len() < expected {
            return Err(FeedError::RowTooShort { line, width: record.len(), expected });
        }
        let region = &record[self.layout.region_column];
        for (offset, &date) in self.dates.iter().enumerate() {
            let column = self.layout.first_date_column + offset;
            let cell = &record[column];
            out.push(match cell.parse::<i64>() {
                Ok(cumulative) => RawObservation::new(date, region, cumulative),
                Err(_) => RawObservation::invalid(
                    date,
                    region,
                    FeedError::InvalidCount { line, column, value: cell.to_string() },
                ),
            });
        }
        Ok(())
    }
}

impl<R: Read> RawCaseFeed for WideFeed<R> {
    fn observations(&mut self) -> FeedResult<Vec<RawObservation>> {
        let mut out = Vec::new();
        let mut record = StringRecord::new();
        while self.reader.read_record(&mut record)? {
            self.expand_row(&record, &mut out)?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::RawCount;

    const HEADER: &str = "UID,iso2,iso3,code3,FIPS,Admin2,Province_State,Country_Region,Lat,Long_,Combined_Key,1/22/20,1/23/20";

    fn sample() -> String {
        format!(
            "{HEADER}\n\
             1,US,USA,840,1001,Autauga,Alabama,US,32.5,-86.6,\"Autauga, Alabama, US\",0,2\n\
             2,US,USA,840,1003,Baldwin,Alabama,US,30.7,-87.7,\"Baldwin, Alabama, US\",1,3\n"
        )
    }

    #[test]
    // Purpose
    // -------
    // Every data row expands into one observation per date column,
    // with quoted commas in other fields left untouched.
    //
    // Given
    // -----
    // - Two Alabama county rows over two dates.
    //
    // Expect
    // ------
    // - Four observations, all for "Alabama"; the county rows are not
    //   summed here (that is the builder's job).
    fn expands_rows_per_date() {
        // Arrange
        let text = sample();
        let mut feed = WideFeed::new(text.as_bytes(), WideLayout::default()).unwrap();

        // Act
        let obs = feed.observations().unwrap();

        // Assert
        assert_eq!(feed.dates().len(), 2);
        assert_eq!(obs.len(), 4);
        assert!(obs.iter().all(|o| o.region == "Alabama"));
        let counts: Vec<Option<i64>> = obs.iter().map(RawObservation::cumulative).collect();
        assert_eq!(counts, vec![Some(0), Some(2), Some(1), Some(3)]);
    }

    #[test]
    fn shifted_header_is_rejected() {
        let text = "UID,iso2,iso3,code3,FIPS,Province_State,Admin2,Country_Region,Lat,Long_,Combined_Key,1/22/20\n";
        let err = WideFeed::new(text.as_bytes(), WideLayout::default()).err().unwrap();
        assert_eq!(
            err,
            FeedError::LayoutMismatch {
                column: 6,
                expected: "Province_State".to_string(),
                found: "Admin2".to_string()
            }
        );
    }

    #[test]
    fn unparseable_cells_are_forwarded_with_their_position() {
        let text = format!(
            "{HEADER}\n1,US,USA,16,66,,Guam,US,13.4,144.8,\"Guam, US\",3,unknown\n"
        );
        let mut feed = WideFeed::new(text.as_bytes(), WideLayout::default()).unwrap();

        let obs = feed.observations().unwrap();

        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0].cumulative(), Some(3));
        assert_eq!(
            obs[1].count,
            RawCount::Invalid(FeedError::InvalidCount {
                line: 2,
                column: 12,
                value: "unknown".to_string()
            })
        );
    }

    #[test]
    fn truncated_rows_are_fatal() {
        let text = format!("{HEADER}\n1,US,USA,840,1001,Autauga,Alabama,US,32.5,-86.6,x,0\n");
        let mut feed = WideFeed::new(text.as_bytes(), WideLayout::default()).unwrap();
        assert!(matches!(
            feed.observations(),
            Err(FeedError::RowTooShort { line: 2, width: 12, expected: 13 })
        ));
    }
}
