//! table::store — CSV tables with `# key = value` metadata rows.
//!
//! Purpose
//! -------
//! Persist result series in a plain CSV layout that stays readable by
//! spreadsheets: a few single-field metadata rows, one header row, then data
//! rows in header order. [`TableStore`] writes, [`Table`] reads.
//!
//! Key behaviors
//! -------------
//! - [`TableStore::write_metadata`] creates the file with metadata and header
//!   and refuses (returns `Ok(false)`) to replace an existing file unless told
//!   to overwrite.
//! - [`TableStore::append`] adds data rows to an existing file and returns
//!   `Ok(false)` if the file does not exist yet.
//! - [`Table::read`] recognizes metadata rows anywhere in the file (a first
//!   field containing both `#` and `=`), takes the first other row as the
//!   header, and stores the data column-major.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every data row has exactly as many fields as the header, on write and
//!   on read.
//! - When a metadata key repeats, the first value wins.
//!
//! Conventions
//! -----------
//! - The `date` metadata key holds the creation date as `%Y %b %d`, e.g.
//!   `2020 Apr 02`.
//! - Missing numeric cells are written as `nan`; [`Table::select_f64`] maps
//!   `nan` and empty cells to `None`.
use crate::table::errors::{TableError, TableResult};
use chrono::Local;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::{
    fs::{File, OpenOptions},
    io::Read,
    path::{Path, PathBuf},
};

/// Metadata key holding the table's creation date.
pub const DATE_KEY: &str = "date";

/// `strftime` pattern of the `date` metadata value.
pub const METADATA_DATE_FORMAT: &str = "%Y %b %d";

/// Marker written for a missing numeric value.
pub const MISSING_MARKER: &str = "nan";

/// TableStore — writer for one table file.
///
/// Fields
/// ------
/// - `path`: target file.
/// - `headers`: column names; the first is the date/key column.
/// - `metadata`: `(key, value)` pairs written as `# key = value` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStore {
    path: PathBuf,
    headers: Vec<String>,
    metadata: Vec<(String, String)>,
}

impl TableStore {
    /// Store whose only metadata is today's `date`.
    pub fn new(path: impl Into<PathBuf>, headers: Vec<String>) -> Self {
        let today = Local::now().format(METADATA_DATE_FORMAT).to_string();
        Self::with_metadata(path, headers, vec![(DATE_KEY.to_string(), today)])
    }

    pub fn with_metadata(
        path: impl Into<PathBuf>, headers: Vec<String>, metadata: Vec<(String, String)>,
    ) -> Self {
        TableStore { path: path.into(), headers, metadata }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn metadata(&self) -> &[(String, String)] {
        &self.metadata
    }

    /// Create the file with metadata rows and the header row.
    ///
    /// Returns
    /// -------
    /// - `Ok(true)` when the file was written.
    /// - `Ok(false)` when the file exists and `overwrite` is false; the file
    ///   is left untouched.
    ///
    /// Errors
    /// ------
    /// - [`TableError::Io`] / [`TableError::Csv`] on write failures.
    pub fn write_metadata(&self, overwrite: bool) -> TableResult<bool> {
        if self.path.is_file() && !overwrite {
            return Ok(false);
        }
        let mut writer = WriterBuilder::new().flexible(true).from_path(&self.path)?;
        for (key, value) in &self.metadata {
            writer.write_record([format!("# {key} = {value}")])?;
        }
        writer.write_record(&self.headers)?;
        writer.flush()?;
        Ok(true)
    }

    /// Append data rows to an existing file.
    ///
    /// All rows are checked against the header width before anything is
    /// written.
    ///
    /// Returns
    /// -------
    /// - `Ok(true)` when the rows were appended.
    /// - `Ok(false)` when the file does not exist.
    ///
    /// Errors
    /// ------
    /// - [`TableError::RaggedRow`] for a row whose width differs from the
    ///   header.
    /// - [`TableError::Io`] / [`TableError::Csv`] on write failures.
    pub fn append<S: AsRef<str>>(&self, rows: &[Vec<S>]) -> TableResult<bool> {
        if !self.path.is_file() {
            return Ok(false);
        }
        let expected = self.headers.len();
        if let Some((row, fields)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(TableError::RaggedRow { row, width: fields.len(), expected });
        }

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = WriterBuilder::new().from_writer(file);
        for row in rows {
            writer.write_record(row.iter().map(|cell| -> &str { cell.as_ref() }))?;
        }
        writer.flush()?;
        Ok(true)
    }
}

/// Table — a table file read back into memory.
///
/// Data is held column-major: `columns[c][r]` is row `r` of header `c`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    metadata: Vec<(String, String)>,
    headers: Vec<String>,
    columns: Vec<Vec<String>>,
}

impl Table {
    /// Read the table at `path`.
    ///
    /// # Errors
    /// - [`TableError::Io`] if the file cannot be opened.
    /// - See [`Table::from_reader`].
    pub fn read(path: &Path) -> TableResult<Table> {
        Self::from_reader(File::open(path)?)
    }

    /// Parse a table from any reader.
    ///
    /// # Errors
    /// - [`TableError::MissingHeader`] if there is no non-metadata row.
    /// - [`TableError::RaggedRow`] if a data row's width differs from the
    ///   header.
    pub fn from_reader<R: Read>(source: R) -> TableResult<Table> {
        let mut reader = ReaderBuilder::new().has_headers(false).flexible(true).from_reader(source);
        let mut metadata: Vec<(String, String)> = Vec::new();
        let mut headers: Option<Vec<String>> = None;
        let mut columns: Vec<Vec<String>> = Vec::new();
        let mut row = 0;

        let mut record = StringRecord::new();
        while reader.read_record(&mut record)? {
            let first = record.get(0).unwrap_or("");
            if let Some((key, value)) = parse_metadata(first) {
                if !metadata.iter().any(|(k, _)| *k == key) {
                    metadata.push((key, value));
                }
                continue;
            }
            match &headers {
                None => {
                    let names: Vec<String> = record.iter().map(str::to_string).collect();
                    columns = vec![Vec::new(); names.len()];
                    headers = Some(names);
                }
                Some(names) => {
                    if record.len() != names.len() {
                        return Err(TableError::RaggedRow {
                            row,
                            width: record.len(),
                            expected: names.len(),
                        });
                    }
                    for (column, cell) in columns.iter_mut().zip(record.iter()) {
                        column.push(cell.to_string());
                    }
                    row += 1;
                }
            }
        }

        let headers = headers.ok_or(TableError::MissingHeader)?;
        Ok(Table { metadata, headers, columns })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn metadata(&self) -> &[(String, String)] {
        &self.metadata
    }

    /// Value of metadata `key`, if present.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Number of data rows.
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Cells of the column named `name`, top to bottom.
    ///
    /// # Errors
    /// [`TableError::UnknownColumn`] if no header matches.
    pub fn select(&self, name: &str) -> TableResult<&[String]> {
        self.headers
            .iter()
            .position(|h| h == name)
            .map(|c| self.columns[c].as_slice())
            .ok_or_else(|| TableError::UnknownColumn { name: name.to_string() })
    }

    /// Last cell of the column named `name`.
    ///
    /// # Errors
    /// - [`TableError::UnknownColumn`] if no header matches.
    /// - [`TableError::EmptyColumn`] if the table has no data rows.
    pub fn select_endpoint(&self, name: &str) -> TableResult<&str> {
        self.select(name)?
            .last()
            .map(String::as_str)
            .ok_or_else(|| TableError::EmptyColumn { name: name.to_string() })
    }

    /// Column `name` parsed as numbers; `nan` and empty cells are `None`.
    ///
    /// # Errors
    /// - [`TableError::UnknownColumn`] if no header matches.
    /// - [`TableError::InvalidNumber`] for any other non-numeric cell.
    pub fn select_f64(&self, name: &str) -> TableResult<Vec<Option<f64>>> {
        self.select(name)?
            .iter()
            .enumerate()
            .map(|(row, cell)| {
                let cell = cell.trim();
                if cell.is_empty() || cell.eq_ignore_ascii_case(MISSING_MARKER) {
                    return Ok(None);
                }
                cell.parse::<f64>().map(Some).map_err(|_| TableError::InvalidNumber {
                    column: name.to_string(),
                    row,
                    value: cell.to_string(),
                })
            })
            .collect()
    }

    /// Human-readable listing of the metadata.
    pub fn describe_metadata(&self) -> String {
        let mut out = String::from("Table metadata:\n");
        for (key, value) in &self.metadata {
            out.push_str(&format!("   {key} = {value}\n"));
        }
        out
    }
}

fn parse_metadata(field: &str) -> Option<(String, String)> {
    if !field.contains('#') || !field.contains('=') {
        return None;
    }
    let body = field.replace('#', "");
    let (key, value) = body.split_once('=')?;
    Some((key.trim().to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn headers() -> Vec<String> {
        vec!["date".to_string(), "A".to_string(), "All Regions".to_string()]
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - Write, append and read back, including metadata and column order.
    // - The two refusal cases.
    // - Parsing rules: metadata anywhere, ragged rows, numeric selection.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A written table reads back with its metadata, header order and
    // cells, exposed column-major.
    //
    // Given
    // -----
    // - A store with a fixed date, two data rows.
    //
    // Expect
    // ------
    // - `date` metadata preserved, headers in order, `select("A")` gives
    //   the first data column, the endpoint is the last cell.
    fn write_append_read_round_trip() {
        // Arrange
        let dir = tempdir().unwrap();
        let path = dir.path().join("r.csv");
        let store = TableStore::with_metadata(
            &path,
            headers(),
            vec![(DATE_KEY.to_string(), "2020 Apr 02".to_string())],
        );

        // Act
        assert!(store.write_metadata(false).unwrap());
        let rows = vec![vec!["2020-04-01", "1.25", "nan"], vec!["2020-04-02", "1.5", "0.9"]];
        assert!(store.append(&rows).unwrap());
        let table = Table::read(&path).unwrap();

        // Assert
        assert_eq!(table.metadata_value(DATE_KEY), Some("2020 Apr 02"));
        assert_eq!(table.headers(), headers().as_slice());
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.select("A").unwrap(), &["1.25".to_string(), "1.5".to_string()]);
        assert_eq!(table.select_endpoint("date").unwrap(), "2020-04-02");
        assert_eq!(table.select_f64("All Regions").unwrap(), vec![None, Some(0.9)]);
    }

    #[test]
    fn default_store_stamps_todays_date() {
        let store = TableStore::new("unused.csv", headers());
        let (key, value) = &store.metadata()[0];
        assert_eq!(key, DATE_KEY);
        assert!(chrono::NaiveDate::parse_from_str(value, METADATA_DATE_FORMAT).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Refusals come back as `Ok(false)` and leave the filesystem as is.
    //
    // Given
    // -----
    // - A store pointing at a missing file, then at an existing one.
    //
    // Expect
    // ------
    // - append on the missing file: false, file still missing.
    // - write_metadata without overwrite on the existing file: false, the
    //   original contents intact; with overwrite: true.
    fn refusals_are_false_not_errors() {
        // Arrange
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        let store = TableStore::new(&path, headers());

        // Act & Assert
        assert!(!store.append(&[vec!["2020-04-01", "1", "1"]]).unwrap());
        assert!(!path.exists());

        std::fs::write(&path, "keep me\n").unwrap();
        assert!(!store.write_metadata(false).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me\n");
        assert!(store.write_metadata(true).unwrap());
        assert_ne!(std::fs::read_to_string(&path).unwrap(), "keep me\n");
    }

    #[test]
    fn append_rejects_wrong_width_before_writing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        let store = TableStore::new(&path, headers());
        store.write_metadata(false).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let rows = vec![vec!["2020-04-01", "1", "1"], vec!["2020-04-02", "1"]];
        let err = store.append(&rows).unwrap_err();

        assert_eq!(err, TableError::RaggedRow { row: 1, width: 2, expected: 3 });
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn reader_handles_metadata_anywhere_and_first_key_wins() {
        let text = "# date = 2020 Apr 02\ndate,A\n2020-04-01,3\n# date = 1999 Jan 01\n# note = x=y\n";
        let table = Table::from_reader(text.as_bytes()).unwrap();
        assert_eq!(table.metadata_value("date"), Some("2020 Apr 02"));
        assert_eq!(table.metadata_value("note"), Some("x=y"));
        assert_eq!(table.n_rows(), 1);
        assert_eq!(
            table.describe_metadata(),
            "Table metadata:\n   date = 2020 Apr 02\n   note = x=y\n"
        );
    }

    #[test]
    fn reader_errors() {
        assert_eq!(
            Table::from_reader("# date = 2020 Apr 02\n".as_bytes()).unwrap_err(),
            TableError::MissingHeader
        );
        assert_eq!(
            Table::from_reader("date,A\n2020-04-01\n".as_bytes()).unwrap_err(),
            TableError::RaggedRow { row: 0, width: 1, expected: 2 }
        );

        let table = Table::from_reader("date,A\n2020-04-01,abc\n".as_bytes()).unwrap();
        assert!(matches!(table.select("B"), Err(TableError::UnknownColumn { .. })));
        assert!(matches!(table.select_f64("A"), Err(TableError::InvalidNumber { row: 0, .. })));

        let empty = Table::from_reader("date,A\n".as_bytes()).unwrap();
        assert!(matches!(empty.select_endpoint("A"), Err(TableError::EmptyColumn { .. })));
    }
}
