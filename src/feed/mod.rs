//! feed — raw cumulative-case feeds and their layout checks.
//!
//! Purpose
//! -------
//! Read a case-count CSV into a flat list of [`RawObservation`]s. Two shapes
//! are supported: a long table with one row per (date, region) and a wide
//! table with one row per sub-region and one column per date.
//!
//! Key behaviors
//! -------------
//! - [`RawCaseFeed`] is the single seam the series builder consumes.
//! - The header is validated once, when the feed is opened. A layout that does
//!   not match is fatal; nothing is read past it.
//! - [`FeedFormat::detect`] picks the shape from the header row when the
//!   caller does not force one.
//!
//! Conventions
//! -----------
//! - Feeds do no aggregation: repeated (date, region) rows are passed through
//!   and summed by the builder.
//! - Region names are trimmed by the CSV reader; no other normalization.
pub mod errors;
pub mod layout;
pub mod long;
pub mod wide;

use crate::series::RawObservation;
use csv::{ReaderBuilder, Trim};
use std::{fs::File, path::Path};

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{FeedError, FeedResult};
pub use self::layout::{LongLayout, WideLayout};
pub use self::long::LongFeed;
pub use self::wide::WideFeed;

/// Source of (date, region, cumulative count) observations.
pub trait RawCaseFeed {
    /// Read every remaining data row.
    ///
    /// A count cell that is not an integer does not fail the read; it is
    /// forwarded as [`RawCount::Invalid`](crate::series::RawCount::Invalid).
    ///
    /// # Errors
    /// Any other row that does not parse under the feed's layout is fatal.
    fn observations(&mut self) -> FeedResult<Vec<RawObservation>>;
}

/// Column layouts to try for each feed shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedLayouts {
    pub long: LongLayout,
    pub wide: WideLayout,
}

/// Shape of a case feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    Long,
    Wide,
}

impl FeedFormat {
    /// Pick the feed shape whose layout accepts `header`.
    ///
    /// The wide layout is tried first since its sentinel sits further right
    /// and cannot match a long header by accident.
    ///
    /// # Errors
    /// - [`FeedError::UnrecognizedLayout`] if neither layout accepts the header.
    pub fn detect(header: &csv::StringRecord, layouts: &FeedLayouts) -> FeedResult<FeedFormat> {
        if layouts.wide.validate(header).is_ok() {
            return Ok(FeedFormat::Wide);
        }
        if layouts.long.validate(header).is_ok() {
            return Ok(FeedFormat::Long);
        }
        Err(FeedError::UnrecognizedLayout { header: header.iter().collect::<Vec<_>>().join(",") })
    }
}

/// Open the feed at `path`, detecting its shape unless `format` forces one.
///
/// Parameters
/// ----------
/// - `path`: CSV file to read.
/// - `format`: `Some` to force a shape, `None` to sniff the header.
/// - `layouts`: column layouts for both shapes.
///
/// Returns
/// -------
/// A boxed feed whose header has already been validated.
///
/// Errors
/// ------
/// - [`FeedError::Io`] if the file cannot be opened.
/// - [`FeedError::UnrecognizedLayout`] when sniffing fails.
/// - Layout errors from the forced shape.
pub fn open_feed(
    path: &Path, format: Option<FeedFormat>, layouts: &FeedLayouts,
) -> FeedResult<Box<dyn RawCaseFeed>> {
    let format = match format {
        Some(format) => format,
        None => {
            let mut reader = ReaderBuilder::new()
                .has_headers(true)
                .flexible(true)
                .trim(Trim::All)
                .from_reader(File::open(path)?);
            let header = reader.headers()?.clone();
            if header.is_empty() {
                return Err(FeedError::MissingHeader);
            }
            FeedFormat::detect(&header, layouts)?
        }
    };

    let file = File::open(path)?;
    Ok(match format {
        FeedFormat::Long => Box::new(LongFeed::new(file, layouts.long.clone())?),
        FeedFormat::Wide => Box::new(WideFeed::new(file, layouts.wide.clone())?),
    })
}
