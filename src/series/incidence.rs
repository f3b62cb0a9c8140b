//! series::incidence — new cases per day and the trailing infectious pool.
//!
//! Purpose
//! -------
//! Derive the two quantities the growth estimator needs besides the raw
//! cumulative counts: daily incidence (first differences) and the number of
//! cases still presumed infectious, summed over a trailing
//! generation-interval window.
//!
//! Key behaviors
//! -------------
//! - [`derive_incidence`]: `incidence[0] = cumulative[0]` and
//!   `incidence[i] = cumulative[i] - cumulative[i-1]` for `i ≥ 1`.
//! - [`derive_infectious_pool`]: `pool[i] = Σ incidence[max(0, i-G) .. i]`,
//!   i.e. the `G` days ending the day *before* `i`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Output length always equals input length.
//! - Negative incidence (data revisions) is passed through unclamped; so is
//!   any negative pool value it induces.
//! - For `i < G` the pool sums over the `i` available prior days only, so
//!   early values are biased low. This boundary limitation is not corrected.
//!
//! Performance
//! -----------
//! - Both routines are O(n); the pool uses a running sum rather than
//!   re-summing each window.
use ndarray::{Array1, ArrayView1};

/// First differences of a cumulative series, keeping day 0 as-is.
///
/// # Examples
/// ```rust
/// # use ndarray::array;
/// # use rt_estimate::series::incidence::derive_incidence;
/// let cumulative = array![3_i64, 5, 5, 4, 10];
/// let incidence = derive_incidence(cumulative.view());
/// assert_eq!(incidence, array![3, 2, 0, -1, 6]);
/// ```
pub fn derive_incidence(cumulative: ArrayView1<'_, i64>) -> Array1<i64> {
    let mut incidence = Array1::<i64>::zeros(cumulative.len());
    let mut previous = 0_i64;
    for (out, &value) in incidence.iter_mut().zip(cumulative.iter()) {
        *out = value - previous;
        previous = value;
    }
    incidence
}

/// Trailing sum of `incidence` over the `generation_interval` days before
/// each index.
///
/// Parameters
/// ----------
/// - `incidence`: daily new cases, length n.
/// - `generation_interval`: window length `G` in days. `G = 0` yields an
///   all-zero pool.
///
/// Returns
/// -------
/// `Array1<i64>` of length n with `pool[0] = 0`.
pub fn derive_infectious_pool(
    incidence: ArrayView1<'_, i64>, generation_interval: usize,
) -> Array1<i64> {
    let n = incidence.len();
    let mut pool = Array1::<i64>::zeros(n);
    let mut running = 0_i64;
    if generation_interval == 0 {
        return pool;
    }
    for i in 0..n {
        pool[i] = running;
        running += incidence[i];
        // pool[i + 1] covers incidence[i + 1 - G ..= i]
        if i >= generation_interval {
            running -= incidence[i - generation_interval];
        }
    }
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// Direct evaluation of the pool definition, for cross-checking.
    fn naive_pool(incidence: &[i64], g: usize) -> Vec<i64> {
        (0..incidence.len()).map(|i| incidence[i.saturating_sub(g)..i].iter().sum()).collect()
    }

    #[test]
    // Purpose
    // -------
    // Incidence plus the previous cumulative value reconstructs the
    // cumulative series, including across a downward revision.
    //
    // Given
    // -----
    // - cumulative = [4, 6, 6, 5, 12, 30].
    //
    // Expect
    // ------
    // - incidence[0] == cumulative[0].
    // - incidence[i] + cumulative[i-1] == cumulative[i] for i ≥ 1.
    // - The revision day keeps its negative value.
    fn incidence_reconstructs_cumulative() {
        // Arrange
        let cumulative = array![4_i64, 6, 6, 5, 12, 30];

        // Act
        let incidence = derive_incidence(cumulative.view());

        // Assert
        assert_eq!(incidence.len(), cumulative.len());
        assert_eq!(incidence[0], cumulative[0]);
        for i in 1..cumulative.len() {
            assert_eq!(incidence[i] + cumulative[i - 1], cumulative[i]);
        }
        assert_eq!(incidence[3], -1);
    }

    #[test]
    // Purpose
    // -------
    // The running-sum pool matches the literal definition for several
    // generation intervals, including ones longer than the series.
    //
    // Given
    // -----
    // - A 20-day incidence series with a negative entry.
    // - G ∈ {1, 3, 14, 30}.
    //
    // Expect
    // ------
    // - derive_infectious_pool == naive_pool element-wise.
    fn pool_matches_trailing_window_definition() {
        // Arrange
        let incidence: Vec<i64> =
            vec![5, 3, 0, 8, -2, 7, 1, 1, 4, 9, 0, 0, 3, 6, 2, 5, 11, 4, 0, 1];
        let view = ndarray::ArrayView1::from(&incidence);

        for g in [1_usize, 3, 14, 30] {
            // Act
            let pool = derive_infectious_pool(view, g);

            // Assert
            assert_eq!(pool.to_vec(), naive_pool(&incidence, g), "G = {g}");
        }
    }

    #[test]
    fn pool_excludes_current_day_and_starts_at_zero() {
        let incidence = array![10_i64, 20, 30, 40];
        let pool = derive_infectious_pool(incidence.view(), 2);
        assert_eq!(pool, array![0, 10, 30, 50]);
    }

    #[test]
    fn zero_generation_interval_gives_empty_pool() {
        let incidence = array![10_i64, 20, 30];
        assert_eq!(derive_infectious_pool(incidence.view(), 0), array![0, 0, 0]);
    }

    #[test]
    fn empty_series_stays_empty() {
        let empty = Array1::<i64>::zeros(0);
        assert!(derive_incidence(empty.view()).is_empty());
        assert!(derive_infectious_pool(empty.view(), 14).is_empty());
    }
}
