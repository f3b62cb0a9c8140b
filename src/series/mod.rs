//! series — canonical case matrix and its derived daily quantities.
//!
//! Purpose
//! -------
//! Turn raw feed observations into the dense, aligned series every later
//! stage relies on: a contiguous [`DateAxis`], an injected [`RegionSet`], the
//! cumulative matrix built by [`CanonicalSeriesBuilder`], and the incidence /
//! infectious-pool derivations in [`incidence`].
//!
//! Key behaviors
//! -------------
//! - Fix the region list and date axis once, before any numeric work.
//! - Zero-fill (default) or carry forward unreported region-days.
//! - Derive the aggregate row from finished base rows only.
//! - Report every structural problem as a fatal [`SeriesError`].
//!
//! Invariants & assumptions
//! ------------------------
//! - All per-region arrays produced here have exactly `axis.len()` entries.
//! - The aggregate label is never part of the configured base list.
//!
//! Conventions
//! -----------
//! - Counts are `i64`; conversion to `f64` happens at the estimation
//!   boundary.
//! - Index 0 is the earliest day.

pub mod axis;
pub mod builder;
pub mod errors;
pub mod incidence;
pub mod regions;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::axis::DateAxis;
pub use self::builder::{CanonicalSeries, CanonicalSeriesBuilder, FillPolicy, RawCount, RawObservation};
pub use self::errors::{SeriesError, SeriesResult};
pub use self::incidence::{derive_incidence, derive_infectious_pool};
pub use self::regions::{DEFAULT_AGGREGATE_LABEL, RegionSet};
