//! Errors for the CSV table store.
//!
//! Refusals that the caller may reasonably ignore (writing over an existing
//! file without `overwrite`, appending to a missing file) are not errors;
//! they come back as `Ok(false)`.

pub type TableResult<T> = Result<T, TableError>;

#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    // ---- I/O ----
    Io(String),
    Csv(String),

    // ---- Layout ----
    /// File holds metadata rows only.
    MissingHeader,

    /// Data row whose width differs from the header.
    RaggedRow { row: usize, width: usize, expected: usize },

    // ---- Access ----
    UnknownColumn { name: String },

    /// `select_endpoint` on a table without data rows.
    EmptyColumn { name: String },

    /// Cell that is neither a number nor a missing-value marker.
    InvalidNumber { column: String, row: usize, value: String },
}

impl std::error::Error for TableError {}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- I/O ----
            TableError::Io(msg) => write!(f, "Table Error: I/O failure: {msg}"),
            TableError::Csv(msg) => write!(f, "Table Error: CSV failure: {msg}"),

            // ---- Layout ----
            TableError::MissingHeader => write!(f, "Table Error: no header row"),
            TableError::RaggedRow { row, width, expected } => write!(
                f,
                "Table Error: data row {row} has {width} fields, header has {expected}"
            ),

            // ---- Access ----
            TableError::UnknownColumn { name } => write!(f, "Table Error: no column named {name:?}"),
            TableError::EmptyColumn { name } => write!(f, "Table Error: column {name:?} is empty"),
            TableError::InvalidNumber { column, row, value } => write!(
                f,
                "Table Error: column {column:?}, row {row}: {value:?} is not a number"
            ),
        }
    }
}

impl From<std::io::Error> for TableError {
    fn from(err: std::io::Error) -> TableError {
        TableError::Io(err.to_string())
    }
}

impl From<csv::Error> for TableError {
    fn from(err: csv::Error) -> TableError {
        TableError::Csv(err.to_string())
    }
}
