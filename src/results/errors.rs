//! Errors for result assembly and result persistence.
use crate::table::TableError;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsError {
    // ---- Assembly ----
    /// A region's series does not have one entry per axis date. Indicates an
    /// upstream defect, never bad input data.
    InconsistentSeriesLength { region: String, series: &'static str, expected: usize, actual: usize },

    /// The same region was pushed twice.
    DuplicateRegion { name: String },

    /// No region carries the aggregate label.
    MissingAggregate { label: String },

    // ---- Persistence ----
    Table(TableError),

    /// A persisted table has no header cells.
    NoDateColumn,

    /// Date cell in a persisted table that is not `YYYY-MM-DD`.
    InvalidDate { row: usize, value: String },
}

impl std::error::Error for ResultsError {}

impl std::fmt::Display for ResultsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Assembly ----
            ResultsError::InconsistentSeriesLength { region, series, expected, actual } => write!(
                f,
                "Results Error: {series} series for {region:?} has {actual} entries, \
                 date axis has {expected}"
            ),
            ResultsError::DuplicateRegion { name } => {
                write!(f, "Results Error: region {name:?} assembled twice")
            }
            ResultsError::MissingAggregate { label } => {
                write!(f, "Results Error: no aggregate row labelled {label:?}")
            }

            // ---- Persistence ----
            ResultsError::Table(err) => write!(f, "Results Error: {err}"),
            ResultsError::NoDateColumn => write!(f, "Results Error: table has no date column"),
            ResultsError::InvalidDate { row, value } => {
                write!(f, "Results Error: row {row}: cannot parse date {value:?}")
            }
        }
    }
}

impl From<TableError> for ResultsError {
    fn from(err: TableError) -> Self {
        ResultsError::Table(err)
    }
}
