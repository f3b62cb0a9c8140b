//! estimation::regression — ordinary least squares of log-values on day index.
//!
//! Purpose
//! -------
//! Fit `ln(y) = intercept + slope * x` over one window. The slope is the
//! continuous daily growth rate the estimator scales into R.
//!
//! Key behaviors
//! -------------
//! - [`LeastSquaresSolver::Centered`] uses the closed-form centered sums
//!   `Σ(x-x̄)(y-ȳ) / Σ(x-x̄)²`, with means from `statrs`.
//! - [`LeastSquaresSolver::Svd`] solves the `n × 2` design `[1, x]` with an
//!   `nalgebra` SVD. It serves as an independent check of the closed form.
//! - Both return a [`LogLinearFit`] carrying slope, intercept, Pearson r and
//!   the slope standard error.
//!
//! Invariants & assumptions
//! ------------------------
//! - At least two points with distinct x values.
//! - y values passed to [`fit_log_linear`] are strictly positive; the caller
//!   checks this first.
//!
//! Testing notes
//! -------------
//! - Exact lines are recovered by both solvers; the two solvers agree on
//!   noisy data to 1e-10.
use crate::estimation::errors::{EstimationError, EstimationResult};
use nalgebra::{DMatrix, DVector};
use statrs::statistics::Statistics;

/// Singular values below this are treated as zero by the SVD solver.
const SVD_EPS: f64 = 1e-12;

/// Least-squares backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeastSquaresSolver {
    #[default]
    Centered,
    Svd,
}

/// LogLinearFit — result of one straight-line fit.
///
/// Fields
/// ------
/// - `slope`, `intercept`: fitted line.
/// - `r`: Pearson correlation; 0 when either x or y has no spread.
/// - `std_err`: standard error of the slope, `None` with two points (no
///   residual degrees of freedom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogLinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r: f64,
    pub std_err: Option<f64>,
}

impl LeastSquaresSolver {
    /// Fit `y = intercept + slope * x`.
    ///
    /// Errors
    /// ------
    /// - [`EstimationError::RegressionLengthMismatch`] if `x` and `y` differ
    ///   in length.
    /// - [`EstimationError::DegenerateRegression`] for fewer than two points,
    ///   constant `x`, or an SVD that cannot solve the system.
    pub fn fit(self, x: &[f64], y: &[f64]) -> EstimationResult<LogLinearFit> {
        if x.len() != y.len() {
            return Err(EstimationError::RegressionLengthMismatch { x: x.len(), y: y.len() });
        }
        let n = x.len();
        if n < 2 {
            return Err(EstimationError::DegenerateRegression { points: n });
        }

        let sums = CenteredSums::new(x, y);
        if sums.sxx <= 0.0 {
            return Err(EstimationError::DegenerateRegression { points: 1 });
        }

        let (slope, intercept) = match self {
            LeastSquaresSolver::Centered => {
                let slope = sums.sxy / sums.sxx;
                (slope, sums.y_mean - slope * sums.x_mean)
            }
            LeastSquaresSolver::Svd => solve_svd(x, y)?,
        };

        let r = if sums.syy > 0.0 { sums.sxy / (sums.sxx * sums.syy).sqrt() } else { 0.0 };
        let r = r.clamp(-1.0, 1.0);
        let std_err = (n > 2).then(|| {
            let dof = (n - 2) as f64;
            ((1.0 - r * r).max(0.0) * sums.syy / sums.sxx / dof).sqrt()
        });

        Ok(LogLinearFit { slope, intercept, r, std_err })
    }
}

/// Regress `ln(values[k])` on `k = 0..values.len()`.
///
/// # Errors
/// Same as [`LeastSquaresSolver::fit`].
pub fn fit_log_linear(values: &[f64], solver: LeastSquaresSolver) -> EstimationResult<LogLinearFit> {
    let x: Vec<f64> = (0..values.len()).map(|k| k as f64).collect();
    let y: Vec<f64> = values.iter().map(|v| v.ln()).collect();
    solver.fit(&x, &y)
}

struct CenteredSums {
    x_mean: f64,
    y_mean: f64,
    sxx: f64,
    syy: f64,
    sxy: f64,
}

impl CenteredSums {
    fn new(x: &[f64], y: &[f64]) -> Self {
        let x_mean = x.iter().mean();
        let y_mean = y.iter().mean();
        let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
        for (&xi, &yi) in x.iter().zip(y) {
            let dx = xi - x_mean;
            let dy = yi - y_mean;
            sxx += dx * dx;
            syy += dy * dy;
            sxy += dx * dy;
        }
        CenteredSums { x_mean, y_mean, sxx, syy, sxy }
    }
}

fn solve_svd(x: &[f64], y: &[f64]) -> EstimationResult<(f64, f64)> {
    let n = x.len();
    let design = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { x[i] });
    let rhs = DVector::from_column_slice(y);
    let beta = design
        .svd(true, true)
        .solve(&rhs, SVD_EPS)
        .map_err(|_| EstimationError::DegenerateRegression { points: n })?;
    Ok((beta[1], beta[0]))
}
