//! Injected region list plus the derived aggregate label.
//!
//! The engine never hard-codes region names. Callers supply an ordered list of
//! base regions at configuration time; the aggregate row is always derived and
//! is never a member of that list.
use crate::series::errors::{SeriesError, SeriesResult};
use std::collections::HashMap;

/// Label used for the derived aggregate row when none is configured.
pub const DEFAULT_AGGREGATE_LABEL: &str = "All Regions";

/// RegionSet — validated, ordered base regions and the aggregate label.
///
/// Invariants
/// ----------
/// - At least one base region.
/// - Names are trimmed, non-blank and unique.
/// - No base region is named like the aggregate label.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSet {
    base: Vec<String>,
    aggregate_label: String,
    index: HashMap<String, usize>,
}

impl RegionSet {
    /// Validate `names` and attach `aggregate_label`.
    ///
    /// # Errors
    /// - [`SeriesError::EmptyRegionList`] if `names` is empty.
    /// - [`SeriesError::BlankRegionName`] for a blank entry.
    /// - [`SeriesError::DuplicateRegion`] for a repeated entry.
    /// - [`SeriesError::AggregateLabelCollision`] if an entry equals the label.
    pub fn new<I, S>(names: I, aggregate_label: impl Into<String>) -> SeriesResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let aggregate_label = aggregate_label.into().trim().to_string();
        let mut base = Vec::new();
        let mut index = HashMap::new();

        for (position, raw) in names.into_iter().enumerate() {
            let name = raw.as_ref().trim();
            if name.is_empty() {
                return Err(SeriesError::BlankRegionName { index: position });
            }
            if name == aggregate_label {
                return Err(SeriesError::AggregateLabelCollision { name: name.to_string() });
            }
            if index.insert(name.to_string(), base.len()).is_some() {
                return Err(SeriesError::DuplicateRegion { name: name.to_string() });
            }
            base.push(name.to_string());
        }

        if base.is_empty() {
            return Err(SeriesError::EmptyRegionList);
        }
        Ok(RegionSet { base, aggregate_label, index })
    }

    /// Same as [`RegionSet::new`] with [`DEFAULT_AGGREGATE_LABEL`].
    pub fn with_default_aggregate<I, S>(names: I) -> SeriesResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(names, DEFAULT_AGGREGATE_LABEL)
    }

    /// Base regions in configured order.
    pub fn base(&self) -> &[String] {
        &self.base
    }

    pub fn aggregate_label(&self) -> &str {
        &self.aggregate_label
    }

    /// Row index of a base region, if configured.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Number of base regions (the aggregate is not counted).
    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Base regions followed by the aggregate label.
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        self.base.iter().map(String::as_str).chain(std::iter::once(self.aggregate_label.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // A valid list keeps its order, trims names, and appends the
    // aggregate only in `all_names`.
    //
    // Given
    // -----
    // - names = [" Ohio", "Utah "], default aggregate label.
    //
    // Expect
    // ------
    // - base = ["Ohio", "Utah"], index_of("Utah") = Some(1),
    //   all_names ends with "All Regions".
    fn new_preserves_order_and_trims() {
        // Arrange & Act
        let set = RegionSet::with_default_aggregate([" Ohio", "Utah "]).unwrap();

        // Assert
        assert_eq!(set.base(), &["Ohio".to_string(), "Utah".to_string()]);
        assert_eq!(set.index_of("Utah"), Some(1));
        assert_eq!(set.index_of("Texas"), None);
        let all: Vec<&str> = set.all_names().collect();
        assert_eq!(all, vec!["Ohio", "Utah", DEFAULT_AGGREGATE_LABEL]);
    }

    #[test]
    fn duplicates_blanks_and_collisions_are_rejected() {
        assert_eq!(
            RegionSet::with_default_aggregate(["Ohio", "Ohio"]).unwrap_err(),
            SeriesError::DuplicateRegion { name: "Ohio".to_string() }
        );
        assert_eq!(
            RegionSet::with_default_aggregate(["Ohio", "  "]).unwrap_err(),
            SeriesError::BlankRegionName { index: 1 }
        );
        assert_eq!(
            RegionSet::new(["Ohio", "United States"], "United States").unwrap_err(),
            SeriesError::AggregateLabelCollision { name: "United States".to_string() }
        );
        assert_eq!(
            RegionSet::with_default_aggregate(Vec::<String>::new()).unwrap_err(),
            SeriesError::EmptyRegionList
        );
    }
}
