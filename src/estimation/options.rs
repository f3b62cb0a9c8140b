//! Estimator options — window, intervals, target, noise floor and solver.
//!
//! Purpose
//! -------
//! Collect every knob of the growth estimator in one validated value so the
//! estimator itself never re-checks configuration.
//!
//! Invariants & assumptions
//! ------------------------
//! - `window >= 2` (a line needs two points).
//! - `serial_interval` finite and `> 0`.
//! - `generation_interval >= 1`.
//! - `noise_floor` finite and `>= 0`.
//!
//! Conventions
//! -----------
//! - Defaults: W = 7, S = 7.0, G = 14, raw-window target with a floor of 35,
//!   centered least squares.
//! - A `None` noise floor resolves to the target's default at construction.
use crate::estimation::{
    errors::{EstimationError, EstimationResult},
    regression::LeastSquaresSolver,
    target::RegressionTarget,
};

pub const DEFAULT_WINDOW: usize = 7;
pub const DEFAULT_SERIAL_INTERVAL: f64 = 7.0;
pub const DEFAULT_GENERATION_INTERVAL: usize = 14;

/// EstimatorOptions — validated configuration for [`GrowthEstimator`].
///
/// Only [`EstimatorOptions::new`] and [`Default`] build one, so every value
/// the estimator sees has passed validation. Fields are read through the
/// accessors of the same name.
///
/// Fields
/// ------
/// - `window`: regression window width W in days.
/// - `serial_interval`: S, the factor turning a daily log-growth slope into R.
/// - `generation_interval`: G, the infectious-pool length in days; also the
///   extra history the shifted target needs.
/// - `target`: quantity being regressed.
/// - `noise_floor`: the baseline must be strictly above this for an estimate.
/// - `solver`: least-squares backend.
///
/// [`GrowthEstimator`]: crate::estimation::GrowthEstimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorOptions {
    window: usize,
    serial_interval: f64,
    generation_interval: usize,
    target: RegressionTarget,
    noise_floor: f64,
    solver: LeastSquaresSolver,
}

impl EstimatorOptions {
    /// Validate and bundle estimator settings.
    ///
    /// Parameters
    /// ----------
    /// - `window`: W, at least 2.
    /// - `serial_interval`: S, finite and positive.
    /// - `generation_interval`: G, at least 1.
    /// - `target`: raw or shifted window.
    /// - `noise_floor`: `Some(floor)` to override, `None` for the target's
    ///   default (35 raw, 20 shifted).
    /// - `solver`: least-squares backend.
    ///
    /// Errors
    /// ------
    /// - One `EstimationError::Invalid*` variant per violated constraint,
    ///   checked in parameter order.
    pub fn new(
        window: usize, serial_interval: f64, generation_interval: usize, target: RegressionTarget,
        noise_floor: Option<f64>, solver: LeastSquaresSolver,
    ) -> EstimationResult<Self> {
        if window < 2 {
            return Err(EstimationError::InvalidWindow { window });
        }
        if !serial_interval.is_finite() || serial_interval <= 0.0 {
            return Err(EstimationError::InvalidSerialInterval { value: serial_interval });
        }
        if generation_interval == 0 {
            return Err(EstimationError::InvalidGenerationInterval { value: generation_interval });
        }
        let noise_floor = noise_floor.unwrap_or_else(|| target.default_noise_floor());
        if !noise_floor.is_finite() || noise_floor < 0.0 {
            return Err(EstimationError::InvalidNoiseFloor { value: noise_floor });
        }
        Ok(EstimatorOptions { window, serial_interval, generation_interval, target, noise_floor, solver })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn serial_interval(&self) -> f64 {
        self.serial_interval
    }

    pub fn generation_interval(&self) -> usize {
        self.generation_interval
    }

    pub fn target(&self) -> RegressionTarget {
        self.target
    }

    /// Resolved noise floor (the target's default when none was given).
    pub fn noise_floor(&self) -> f64 {
        self.noise_floor
    }

    pub fn solver(&self) -> LeastSquaresSolver {
        self.solver
    }

    /// Earliest index that can carry an estimate under these options.
    pub fn first_eligible_index(&self) -> usize {
        self.target.first_eligible_index(self.window, self.generation_interval)
    }
}

impl Default for EstimatorOptions {
    fn default() -> Self {
        let target = RegressionTarget::default();
        EstimatorOptions {
            window: DEFAULT_WINDOW,
            serial_interval: DEFAULT_SERIAL_INTERVAL,
            generation_interval: DEFAULT_GENERATION_INTERVAL,
            target,
            noise_floor: target.default_noise_floor(),
            solver: LeastSquaresSolver::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_values() {
        let opts = EstimatorOptions::default();
        assert_eq!(opts.window, 7);
        assert_eq!(opts.serial_interval, 7.0);
        assert_eq!(opts.generation_interval, 14);
        assert_eq!(opts.target, RegressionTarget::RawWindow);
        assert_eq!(opts.noise_floor, 35.0);
        assert_eq!(opts.first_eligible_index(), 6);
    }

    #[test]
    // Purpose
    // -------
    // A missing noise floor follows the target; an explicit one wins.
    //
    // Given
    // -----
    // - Shifted target with `None`, then with `Some(5.0)`.
    //
    // Expect
    // ------
    // - 20.0, then 5.0; first eligible index W + G = 21.
    fn noise_floor_defaults_per_target() {
        // Arrange & Act
        let shifted = EstimatorOptions::new(
            7, 7.0, 14, RegressionTarget::ShiftedWindow, None, LeastSquaresSolver::Centered,
        )
        .unwrap();
        let explicit = EstimatorOptions::new(
            7, 7.0, 14, RegressionTarget::ShiftedWindow, Some(5.0), LeastSquaresSolver::Svd,
        )
        .unwrap();

        // Assert
        assert_eq!(shifted.noise_floor, 20.0);
        assert_eq!(shifted.first_eligible_index(), 21);
        assert_eq!(explicit.noise_floor, 5.0);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let raw = RegressionTarget::RawWindow;
        let ls = LeastSquaresSolver::Centered;
        assert_eq!(
            EstimatorOptions::new(1, 7.0, 14, raw, None, ls).unwrap_err(),
            EstimationError::InvalidWindow { window: 1 }
        );
        assert!(matches!(
            EstimatorOptions::new(7, f64::NAN, 14, raw, None, ls),
            Err(EstimationError::InvalidSerialInterval { .. })
        ));
        assert_eq!(
            EstimatorOptions::new(7, 7.0, 0, raw, None, ls).unwrap_err(),
            EstimationError::InvalidGenerationInterval { value: 0 }
        );
        assert_eq!(
            EstimatorOptions::new(7, 7.0, 14, raw, Some(-1.0), ls).unwrap_err(),
            EstimationError::InvalidNoiseFloor { value: -1.0 }
        );
    }
}
