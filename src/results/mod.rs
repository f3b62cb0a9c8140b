//! results — assembled per-region results, persistence and console summary.
//!
//! Purpose
//! -------
//! Hold the final, structurally checked output of a run and hand it to the
//! two consumers: CSV tables on disk and the fixed-width console report.
//!
//! Key behaviors
//! -------------
//! - [`ResultAssembler`] is the consistency gate; [`ResultTable`] is frozen.
//! - [`persist`] writes one wide table per [`SeriesKind`] and reads them back.
//! - [`summary`] renders the latest values per region.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every series in a [`ResultTable`] has one entry per axis date.
//! - Regions keep their configured order; the aggregate is last.

pub mod assembler;
pub mod errors;
pub mod persist;
pub mod summary;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::assembler::{LatestRow, RegionResult, ResultAssembler, ResultTable};
pub use self::errors::{ResultsError, ResultsResult};
pub use self::persist::{PersistedSeries, SeriesKind, read_series, write_series};
pub use self::summary::{SummaryScope, format_thousands, render_summary};
