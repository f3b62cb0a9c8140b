//! results::persist — write result series as wide tables and read them back.
//!
//! Each [`SeriesKind`] becomes one table with header
//! `date, <base regions...>, <aggregate>` and one row per date. Integer
//! series are written for every date. The R table starts at the result's
//! estimation start; earlier rows could only ever hold `nan`. Undefined R
//! cells are written as `nan`, defined ones with full `f64` precision.
use crate::{
    estimation::REstimate,
    results::{
        assembler::{RegionResult, ResultTable},
        errors::{ResultsError, ResultsResult},
    },
    table::{MISSING_MARKER, Table, TableStore},
};
use chrono::NaiveDate;
use log::debug;
use std::path::Path;

/// Date format of the key column.
pub const ROW_DATE_FORMAT: &str = "%Y-%m-%d";

/// Which per-region series a table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    Cumulative,
    Incidence,
    InfectiousPool,
    Reproduction,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 4] = [
        SeriesKind::Cumulative,
        SeriesKind::Incidence,
        SeriesKind::InfectiousPool,
        SeriesKind::Reproduction,
    ];

    /// Suffix appended to the output stem for the companion tables.
    pub fn file_suffix(self) -> &'static str {
        match self {
            SeriesKind::Cumulative => "_cases",
            SeriesKind::Incidence => "_new_cases",
            SeriesKind::InfectiousPool => "_infectious",
            SeriesKind::Reproduction => "",
        }
    }

    fn cell(self, region: &RegionResult, index: usize) -> String {
        match self {
            SeriesKind::Cumulative => region.cumulative[index].to_string(),
            SeriesKind::Incidence => region.incidence[index].to_string(),
            SeriesKind::InfectiousPool => region.infectious_pool[index].to_string(),
            SeriesKind::Reproduction => match region.r_estimate[index] {
                REstimate::Defined(r) => r.to_string(),
                REstimate::Undefined(_) => MISSING_MARKER.to_string(),
            },
        }
    }
}

/// Header row: `date` followed by every region, aggregate last.
pub fn series_headers(table: &ResultTable) -> Vec<String> {
    std::iter::once("date".to_string())
        .chain(table.regions().iter().map(|r| r.name.clone()))
        .collect()
}

/// Data rows for `kind`, one per date written.
pub fn series_rows(table: &ResultTable, kind: SeriesKind) -> Vec<Vec<String>> {
    let start = match kind {
        SeriesKind::Reproduction => table.estimation_start().min(table.axis().len()),
        _ => 0,
    };
    (start..table.axis().len())
        .map(|i| {
            std::iter::once(table.axis().date(i).format(ROW_DATE_FORMAT).to_string())
                .chain(table.regions().iter().map(|r| kind.cell(r, i)))
                .collect()
        })
        .collect()
}

/// Write one series table to `path`.
///
/// Returns
/// -------
/// - `Ok(true)` when the table was written.
/// - `Ok(false)` when `path` exists and `overwrite` is false.
///
/// Errors
/// ------
/// - [`ResultsError::Table`] on I/O failures.
pub fn write_series(
    table: &ResultTable, kind: SeriesKind, path: &Path, overwrite: bool,
) -> ResultsResult<bool> {
    let store = TableStore::new(path, series_headers(table));
    if !store.write_metadata(overwrite)? {
        return Ok(false);
    }
    let rows = series_rows(table, kind);
    debug!("writing {} rows of {:?} to {}", rows.len(), kind, path.display());
    Ok(store.append(&rows)?)
}

/// A series table read back from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedSeries {
    pub dates: Vec<NaiveDate>,
    pub regions: Vec<String>,
    pub created: Option<String>,
    values: Vec<Vec<Option<f64>>>,
}

impl PersistedSeries {
    /// Values of `region`, `None` where the cell was `nan`.
    pub fn column(&self, region: &str) -> Option<&[Option<f64>]> {
        self.regions.iter().position(|r| r == region).map(|c| self.values[c].as_slice())
    }
}

/// Read a table written by [`write_series`].
///
/// # Errors
/// - [`ResultsError::Table`] for unreadable files or non-numeric cells.
/// - [`ResultsError::NoDateColumn`] / [`ResultsError::InvalidDate`] for a
///   bad key column.
pub fn read_series(path: &Path) -> ResultsResult<PersistedSeries> {
    let table = Table::read(path)?;
    let (key, regions) = table.headers().split_first().ok_or(ResultsError::NoDateColumn)?;

    let dates = table
        .select(key)?
        .iter()
        .enumerate()
        .map(|(row, cell)| {
            NaiveDate::parse_from_str(cell, ROW_DATE_FORMAT)
                .map_err(|_| ResultsError::InvalidDate { row, value: cell.clone() })
        })
        .collect::<ResultsResult<Vec<_>>>()?;
    let values = regions.iter().map(|name| table.select_f64(name)).collect::<Result<Vec<_>, _>>()?;

    Ok(PersistedSeries {
        dates,
        regions: regions.to_vec(),
        created: table.metadata_value(crate::table::DATE_KEY).map(str::to_string),
        values,
    })
}
