//! Errors raised while reading a raw case feed.
//!
//! Every variant is fatal: a feed that cannot be read exactly as laid out
//! would silently corrupt every downstream number. The builder wraps these in
//! `SeriesError::MalformedFeed`.

/// Result alias for feed readers.
pub type FeedResult<T> = Result<T, FeedError>;

#[derive(Debug, Clone, PartialEq)]
pub enum FeedError {
    /// Underlying I/O failure (message only, so the error stays `Clone`).
    Io(String),

    /// CSV tokenizer failure.
    Csv(String),

    /// The file has no header row.
    MissingHeader,

    /// A sentinel column holds an unexpected header.
    LayoutMismatch { column: usize, expected: String, found: String },

    /// The header is too short to contain a sentinel column.
    MissingColumn { column: usize, width: usize },

    /// Neither the long nor the wide layout matches the header.
    UnrecognizedLayout { header: String },

    /// A wide feed has no date columns after the first date position.
    NoDateColumns,

    /// A date cell or date header does not parse.
    InvalidDate { line: u64, value: String },

    /// A count cell does not parse as an integer.
    InvalidCount { line: u64, column: usize, value: String },

    /// A data row is shorter than the header requires.
    RowTooShort { line: u64, width: usize, expected: usize },
}

impl std::error::Error for FeedError {}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::Io(msg) => write!(f, "I/O error while reading feed: {msg}"),
            FeedError::Csv(msg) => write!(f, "CSV error while reading feed: {msg}"),
            FeedError::MissingHeader => write!(f, "feed has no header row"),
            FeedError::LayoutMismatch { column, expected, found } => {
                write!(f, "column {column} should be {expected:?} but is {found:?}")
            }
            FeedError::MissingColumn { column, width } => {
                write!(f, "expected a column at position {column}, header has only {width}")
            }
            FeedError::UnrecognizedLayout { header } => {
                write!(f, "header does not match any known feed layout: {header}")
            }
            FeedError::NoDateColumns => write!(f, "wide feed has no date columns"),
            FeedError::InvalidDate { line, value } => {
                write!(f, "line {line}: cannot parse date {value:?}")
            }
            FeedError::InvalidCount { line, column, value } => {
                write!(f, "line {line}, column {column}: cannot parse case count {value:?}")
            }
            FeedError::RowTooShort { line, width, expected } => {
                write!(f, "line {line}: row has {width} fields, expected at least {expected}")
            }
        }
    }
}

impl From<std::io::Error> for FeedError {
    fn from(err: std::io::Error) -> FeedError {
        FeedError::Io(err.to_string())
    }
}

impl From<csv::Error> for FeedError {
    fn from(err: csv::Error) -> FeedError {
        FeedError::Csv(err.to_string())
    }
}
