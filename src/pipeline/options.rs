//! Run-level configuration: regions, feed handling, fill policy, estimator.
use crate::{
    estimation::EstimatorOptions,
    feed::{FeedFormat, FeedLayouts},
    series::{FillPolicy, RegionSet},
};

/// Everything one run needs besides its file paths.
///
/// Fields
/// ------
/// - `regions`: validated base regions and aggregate label.
/// - `format`: forced feed shape, or `None` to detect it from the header.
/// - `layouts`: column layouts for both feed shapes.
/// - `fill_policy`: treatment of unreported region-days.
/// - `estimator`: validated estimator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    pub regions: RegionSet,
    pub format: Option<FeedFormat>,
    pub layouts: FeedLayouts,
    pub fill_policy: FillPolicy,
    pub estimator: EstimatorOptions,
}

impl PipelineOptions {
    /// Options with format detection, default layouts and zero-fill.
    pub fn new(regions: RegionSet, estimator: EstimatorOptions) -> Self {
        PipelineOptions {
            regions,
            format: None,
            layouts: FeedLayouts::default(),
            fill_policy: FillPolicy::default(),
            estimator,
        }
    }

    pub fn with_format(mut self, format: Option<FeedFormat>) -> Self {
        self.format = format;
        self
    }

    pub fn with_fill_policy(mut self, fill_policy: FillPolicy) -> Self {
        self.fill_policy = fill_policy;
        self
    }

    pub fn with_layouts(mut self, layouts: FeedLayouts) -> Self {
        self.layouts = layouts;
        self
    }
}
