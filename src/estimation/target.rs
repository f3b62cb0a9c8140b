//! estimation::target — which quantity the log-linear fit is run on.
//!
//! Purpose
//! -------
//! Make the choice of regression target an explicit, configuration-time
//! variant. Both targets share one capability: given the inputs and an index,
//! produce the baseline that gates eligibility and the `W` trailing values to
//! regress.
//!
//! Key behaviors
//! -------------
//! - [`RegressionTarget::RawWindow`] regresses the trailing `W` cumulative
//!   counts; the baseline is the earliest of them.
//! - [`RegressionTarget::ShiftedWindow`] regresses the infectious pool at `i`
//!   plus the cases added since `i - W`; the baseline is the pool at `i`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Callers only ask for windows at `i >= first_eligible_index(W, G)`; below
//!   that, indexing would run off the front of the series.
//! - Values are returned as-is. Positivity is checked by the estimator.
use crate::estimation::estimator::EstimationInput;

/// RegressionTarget — quantity regressed on day index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegressionTarget {
    /// `cumulative[i-W+1 ..= i]`, baseline `cumulative[i-W+1]`.
    #[default]
    RawWindow,
    /// `pool[i] + (cumulative[j] - cumulative[i-W])` for `j` in
    /// `i-W+1 ..= i`, baseline `pool[i]`.
    ShiftedWindow,
}

impl RegressionTarget {
    /// Earliest index at which this target has enough history.
    ///
    /// - Raw: `W - 1` (a full window ending at `i`).
    /// - Shifted: `W + G` (a full window plus a full generation interval
    ///   behind the window start, so the pool is not truncated).
    pub fn first_eligible_index(self, window: usize, generation_interval: usize) -> usize {
        match self {
            RegressionTarget::RawWindow => window.saturating_sub(1),
            RegressionTarget::ShiftedWindow => window + generation_interval,
        }
    }

    /// Noise floor used when none is configured.
    pub fn default_noise_floor(self) -> f64 {
        match self {
            RegressionTarget::RawWindow => 35.0,
            RegressionTarget::ShiftedWindow => 20.0,
        }
    }

    /// Baseline compared against the noise floor at `index`.
    ///
    /// Panics
    /// ------
    /// - If `index` is below the first eligible index for `window`.
    pub fn baseline(self, input: &EstimationInput<'_>, index: usize, window: usize) -> f64 {
        match self {
            RegressionTarget::RawWindow => input.cumulative[index + 1 - window],
            RegressionTarget::ShiftedWindow => input.infectious_pool[index],
        }
    }

    /// Write the `window` regression values ending at `index` into `out`.
    ///
    /// `out` is cleared first, so one buffer can be reused across indices.
    ///
    /// Panics
    /// ------
    /// - If `index` is below the first eligible index for `window`.
    pub fn extract_window(
        self, input: &EstimationInput<'_>, index: usize, window: usize, out: &mut Vec<f64>,
    ) {
        out.clear();
        let start = index + 1 - window;
        match self {
            RegressionTarget::RawWindow => {
                out.extend(input.cumulative.iter().skip(start).take(window).copied());
            }
            RegressionTarget::ShiftedWindow => {
                let pool = input.infectious_pool[index];
                let anchor = input.cumulative[index - window];
                out.extend(
                    input.cumulative.iter().skip(start).take(window).map(|&c| pool + (c - anchor)),
                );
            }
        }
    }
}
