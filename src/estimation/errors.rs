//! Errors for growth-rate estimation.
//!
//! `EstimationError` only covers configuration and input-shape problems. A
//! single date that cannot be estimated is not an error; it is reported as
//! `REstimate::Undefined` with a reason.

/// Error type for estimator configuration and estimator inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimationError {
    // ---- Options ----
    /// Regression window shorter than two points.
    InvalidWindow { window: usize },

    /// Serial interval not finite and strictly positive.
    InvalidSerialInterval { value: f64 },

    /// Generation interval of zero days.
    InvalidGenerationInterval { value: usize },

    /// Noise floor negative or not finite.
    InvalidNoiseFloor { value: f64 },

    // ---- Inputs ----
    /// Cumulative and infectious-pool series have different lengths.
    InputLengthMismatch { cumulative: usize, infectious_pool: usize },

    // ---- Regression ----
    /// Fewer than two points, or all x values equal.
    DegenerateRegression { points: usize },

    /// Regression inputs of different lengths.
    RegressionLengthMismatch { x: usize, y: usize },
}

pub type EstimationResult<T> = Result<T, EstimationError>;

impl std::error::Error for EstimationError {}

impl std::fmt::Display for EstimationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Options ----
            EstimationError::InvalidWindow { window } => {
                write!(f, "Estimation Error: window must be at least 2 days (got {window})")
            }
            EstimationError::InvalidSerialInterval { value } => write!(
                f,
                "Estimation Error: serial interval must be finite and positive (got {value})"
            ),
            EstimationError::InvalidGenerationInterval { value } => write!(
                f,
                "Estimation Error: generation interval must be at least 1 day (got {value})"
            ),
            EstimationError::InvalidNoiseFloor { value } => write!(
                f,
                "Estimation Error: noise floor must be finite and non-negative (got {value})"
            ),

            // ---- Inputs ----
            EstimationError::InputLengthMismatch { cumulative, infectious_pool } => write!(
                f,
                "Estimation Error: cumulative series has {cumulative} points but infectious \
                 pool has {infectious_pool}"
            ),

            // ---- Regression ----
            EstimationError::DegenerateRegression { points } => {
                write!(f, "Estimation Error: cannot fit a line through {points} distinct x values")
            }
            EstimationError::RegressionLengthMismatch { x, y } => {
                write!(f, "Estimation Error: regression got {x} x values and {y} y values")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_offending_values() {
        let err = EstimationError::InvalidWindow { window: 1 };
        assert!(err.to_string().contains("got 1"));

        let err = EstimationError::InputLengthMismatch { cumulative: 10, infectious_pool: 9 };
        let msg = err.to_string();
        assert!(msg.contains("10") && msg.contains("9"));
    }
}
