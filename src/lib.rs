//! rt_estimate — effective reproduction number from daily cumulative cases.
//!
//! Purpose
//! -------
//! Estimate the time-varying reproduction number R per region by sliding-window
//! log-linear regression on daily cumulative case counts, and hand the result
//! to CSV tables and a console report. The crate root only declares modules;
//! all behavior lives in the stages below.
//!
//! Key behaviors
//! -------------
//! - [`feed`]: read long (row per date/region) or wide (column per date)
//!   case CSVs, validating the column layout once.
//! - [`series`]: build the canonical region × date cumulative matrix with a
//!   derived aggregate row; derive incidence and the infectious pool.
//! - [`estimation`]: per-day R estimates with explicit undefined reasons.
//! - [`results`]: consistency-checked assembly, table persistence, summary.
//! - [`table`]: CSV tables with `# key = value` metadata rows.
//! - [`pipeline`]: the stages wired into one run.
//!
//! Invariants & assumptions
//! ------------------------
//! - One complete, closed historical series per run; no streaming.
//! - Every per-region series has exactly one entry per date of the axis.
//! - The library never terminates the process; every structural failure is a
//!   returned error that the `estimate` binary turns into a one-line message.
//!
//! Conventions
//! -----------
//! - Index 0 is the earliest date. Counts are `i64` until the estimation
//!   boundary, `f64` after.
//! - Logging goes through the `log` facade; the binary installs `env_logger`.
//!
//! Testing notes
//! -------------
//! - Each module carries unit tests next to the code.
//! - `tests/` drives the full pipeline from CSV text to persisted tables.

pub mod estimation;
pub mod feed;
pub mod pipeline;
pub mod results;
pub mod series;
pub mod table;
