//! estimation::estimator — sliding-window R estimates for one region.
//!
//! Purpose
//! -------
//! Produce one [`REstimate`] per day of a region's series. Each eligible day
//! gets a log-linear fit over the trailing window of the configured target;
//! the fitted daily growth rate times the serial interval is the reported R.
//!
//! Key behaviors
//! -------------
//! - Per index `i`, in order:
//!   1. `i < first_eligible_index` → `Undefined(InsufficientHistory)`.
//!   2. `baseline <= noise_floor` → `Undefined(BelowNoiseFloor)`.
//!   3. any window value `<= 0` or non-finite → `Undefined(NonPositiveInput)`.
//!   4. otherwise `Defined(slope * S)`.
//! - Estimates are computed once per index and never revised.
//!
//! Invariants & assumptions
//! ------------------------
//! - The output has exactly as many entries as the input series.
//! - The estimator never reads another region's data, so regions can be
//!   estimated in parallel.
//!
//! Conventions
//! -----------
//! - Inputs are `f64` views. Integer case series are converted by the caller.
//! - The noise-floor comparison is strict: a baseline equal to the floor is
//!   suppressed.
//!
//! Testing notes
//! -------------
//! - Known exponential growth recovers `k * S`; the noise floor boundary;
//!   the sparse-start scenario that first becomes estimable at index 14;
//!   shifted-window eligibility.
use crate::estimation::{
    errors::{EstimationError, EstimationResult},
    options::EstimatorOptions,
    regression::fit_log_linear,
};
use ndarray::ArrayView1;

/// Why a day has no estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UndefinedReason {
    InsufficientHistory,
    BelowNoiseFloor,
    NonPositiveInput,
}

/// One day's reproduction-number estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum REstimate {
    Defined(f64),
    Undefined(UndefinedReason),
}

impl REstimate {
    /// The estimate, if defined.
    pub fn value(&self) -> Option<f64> {
        match *self {
            REstimate::Defined(r) => Some(r),
            REstimate::Undefined(_) => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, REstimate::Defined(_))
    }
}

/// EstimationInput — aligned per-region series fed to the estimator.
///
/// `infectious_pool` is only read by the shifted target, but both series are
/// always supplied so the length check is uniform.
#[derive(Debug, Clone, Copy)]
pub struct EstimationInput<'a> {
    pub cumulative: ArrayView1<'a, f64>,
    pub infectious_pool: ArrayView1<'a, f64>,
}

impl<'a> EstimationInput<'a> {
    /// # Errors
    /// [`EstimationError::InputLengthMismatch`] if the two views differ in
    /// length.
    pub fn new(
        cumulative: ArrayView1<'a, f64>, infectious_pool: ArrayView1<'a, f64>,
    ) -> EstimationResult<Self> {
        if cumulative.len() != infectious_pool.len() {
            return Err(EstimationError::InputLengthMismatch {
                cumulative: cumulative.len(),
                infectious_pool: infectious_pool.len(),
            });
        }
        Ok(EstimationInput { cumulative, infectious_pool })
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }
}

/// GrowthEstimator — applies [`EstimatorOptions`] to one region at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthEstimator {
    options: EstimatorOptions,
}

impl GrowthEstimator {
    pub fn new(options: EstimatorOptions) -> Self {
        GrowthEstimator { options }
    }

    pub fn options(&self) -> &EstimatorOptions {
        &self.options
    }

    /// Estimate R for every index of `input`.
    ///
    /// Returns
    /// -------
    /// `Vec<REstimate>` with `input.len()` entries.
    ///
    /// Errors
    /// ------
    /// - A regression failure on an eligible window. With `window >= 2` and
    ///   integer day offsets this does not happen for the centered solver.
    pub fn estimate(&self, input: &EstimationInput<'_>) -> EstimationResult<Vec<REstimate>> {
        let mut scratch = Vec::with_capacity(self.options.window());
        (0..input.len()).map(|index| self.estimate_at(input, index, &mut scratch)).collect()
    }

    /// Estimate R at a single index, reusing `scratch` for the window values.
    ///
    /// # Errors
    /// See [`estimate`](Self::estimate).
    pub fn estimate_at(
        &self, input: &EstimationInput<'_>, index: usize, scratch: &mut Vec<f64>,
    ) -> EstimationResult<REstimate> {
        let window = self.options.window();
        let target = self.options.target();

        if index < self.options.first_eligible_index() || index >= input.len() {
            return Ok(REstimate::Undefined(UndefinedReason::InsufficientHistory));
        }
        if target.baseline(input, index, window) <= self.options.noise_floor() {
            return Ok(REstimate::Undefined(UndefinedReason::BelowNoiseFloor));
        }

        target.extract_window(input, index, window, scratch);
        if scratch.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Ok(REstimate::Undefined(UndefinedReason::NonPositiveInput));
        }

        let fit = fit_log_linear(scratch, self.options.solver())?;
        Ok(REstimate::Defined(fit.slope * self.options.serial_interval()))
    }
}
