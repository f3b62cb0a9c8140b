//! Contiguous calendar axis shared by every region series.
//!
//! A [`DateAxis`] is stored as a start date plus a length; day `i` is
//! `start + i days`. Gaps cannot be represented, which is the point.
use crate::series::errors::{SeriesError, SeriesResult};
use chrono::{Duration, NaiveDate};

/// DateAxis — ordered, strictly increasing, gap-free run of calendar days.
///
/// Invariants
/// ----------
/// - `len >= 1`.
/// - `date(i + 1) == date(i) + 1 day` for every valid `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateAxis {
    start: NaiveDate,
    len: usize,
}

impl DateAxis {
    /// Build the axis covering every day in `[first, last]` inclusive.
    ///
    /// # Errors
    /// - [`SeriesError::InvalidAxisRange`] if `first > last`.
    pub fn from_range(first: NaiveDate, last: NaiveDate) -> SeriesResult<Self> {
        if first > last {
            return Err(SeriesError::InvalidAxisRange { first, last });
        }
        let len = (last - first).num_days() as usize + 1;
        Ok(DateAxis { start: first, len })
    }

    /// Build the smallest axis spanning all `dates`, or `None` if empty.
    pub fn spanning<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Option<Self> {
        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
        for date in dates {
            bounds = Some(match bounds {
                None => (date, date),
                Some((lo, hi)) => (lo.min(date), hi.max(date)),
            });
        }
        bounds.map(|(first, last)| DateAxis { start: first, len: (last - first).num_days() as usize + 1 })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; kept for the `len`/`is_empty` convention.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn first(&self) -> NaiveDate {
        self.start
    }

    pub fn last(&self) -> NaiveDate {
        self.date(self.len - 1)
    }

    /// Date at position `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn date(&self, index: usize) -> NaiveDate {
        assert!(index < self.len, "date index {index} out of range for axis of length {}", self.len);
        self.start + Duration::days(index as i64)
    }

    /// Position of `date` on the axis, if it falls inside it.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        if date < self.start {
            return None;
        }
        let offset = (date - self.start).num_days() as usize;
        (offset < self.len).then_some(offset)
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.len).map(move |i| self.date(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify that a range axis is inclusive, gap-free, and indexable in
    // both directions across a month boundary.
    //
    // Given
    // -----
    // - first = 2020-02-27, last = 2020-03-02 (leap year).
    //
    // Expect
    // ------
    // - len = 5, date(2) = 2020-02-29, index_of(2020-03-01) = Some(3).
    fn from_range_is_inclusive_and_contiguous() {
        // Arrange
        let axis = DateAxis::from_range(ymd(2020, 2, 27), ymd(2020, 3, 2)).unwrap();

        // Act
        let dates: Vec<NaiveDate> = axis.iter().collect();

        // Assert
        assert_eq!(axis.len(), 5);
        assert_eq!(axis.date(2), ymd(2020, 2, 29));
        assert_eq!(axis.index_of(ymd(2020, 3, 1)), Some(3));
        assert_eq!(axis.last(), ymd(2020, 3, 2));
        for pair in dates.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
    }

    #[test]
    fn index_of_outside_axis_is_none() {
        let axis = DateAxis::from_range(ymd(2020, 3, 1), ymd(2020, 3, 3)).unwrap();
        assert_eq!(axis.index_of(ymd(2020, 2, 29)), None);
        assert_eq!(axis.index_of(ymd(2020, 3, 4)), None);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = DateAxis::from_range(ymd(2020, 3, 3), ymd(2020, 3, 1)).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidAxisRange { .. }));
    }

    #[test]
    fn spanning_ignores_order_and_covers_gaps() {
        let axis =
            DateAxis::spanning(vec![ymd(2020, 3, 5), ymd(2020, 3, 1), ymd(2020, 3, 3)]).unwrap();
        assert_eq!(axis.first(), ymd(2020, 3, 1));
        assert_eq!(axis.len(), 5);
        assert!(DateAxis::spanning(Vec::<NaiveDate>::new()).is_none());
    }
}
