//! Errors surfaced by a full estimation run.
//!
//! Every stage error converts into [`PipelineError`] with `?`, so the binary
//! only ever sees one type. Feed errors are reported as malformed-feed series
//! errors, since a feed that cannot be read is an ingestion failure.
use crate::{
    estimation::EstimationError,
    feed::FeedError,
    results::ResultsError,
    series::SeriesError,
};
use std::path::PathBuf;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// The input path does not name a file.
    InputNotFound { path: PathBuf },

    // ---- Stage errors ----
    Series(SeriesError),
    Estimation(EstimationError),
    Results(ResultsError),
}

impl std::error::Error for PipelineError {}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::InputNotFound { path } => {
                write!(f, "input file {} not found", path.display())
            }

            // ---- Stage errors ----
            PipelineError::Series(err) => write!(f, "{err}"),
            PipelineError::Estimation(err) => write!(f, "{err}"),
            PipelineError::Results(err) => write!(f, "{err}"),
        }
    }
}

impl From<FeedError> for PipelineError {
    fn from(err: FeedError) -> Self {
        PipelineError::Series(SeriesError::MalformedFeed(err))
    }
}

impl From<SeriesError> for PipelineError {
    fn from(err: SeriesError) -> Self {
        PipelineError::Series(err)
    }
}

impl From<EstimationError> for PipelineError {
    fn from(err: EstimationError) -> Self {
        PipelineError::Estimation(err)
    }
}

impl From<ResultsError> for PipelineError {
    fn from(err: ResultsError) -> Self {
        PipelineError::Results(err)
    }
}
