//! estimation — sliding-window log-linear growth and R estimates.
//!
//! Purpose
//! -------
//! Turn one region's aligned cumulative and infectious-pool series into a
//! per-day reproduction-number series, with explicit reasons for every day
//! that cannot be estimated.
//!
//! Key behaviors
//! -------------
//! - [`EstimatorOptions`] validates window, serial interval, generation
//!   interval, noise floor, target and solver once.
//! - [`RegressionTarget`] selects between the raw cumulative window and the
//!   generation-shifted window.
//! - [`regression`] fits `ln(value)` on day index with a centered closed form
//!   or an SVD-backed solver.
//! - [`GrowthEstimator`] applies the eligibility rules and scales the slope by
//!   the serial interval.
//!
//! Downstream usage
//! ----------------
//! - The pipeline builds one estimator from CLI options and calls
//!   [`GrowthEstimator::estimate`] per region in parallel.

pub mod errors;
pub mod estimator;
pub mod options;
pub mod regression;
pub mod target;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{EstimationError, EstimationResult};
pub use self::estimator::{EstimationInput, GrowthEstimator, REstimate, UndefinedReason};
pub use self::options::EstimatorOptions;
pub use self::regression::{LeastSquaresSolver, LogLinearFit, fit_log_linear};
pub use self::target::RegressionTarget;
