//! Bounding-box feature filter.
//!
//! Keeps the features that have at least one vertex inside a [`Region`](crate::models::Region).

mod membership;
mod pass;

pub use membership::{
    classify, geometry_intersects_region, vertex_in_region, ExclusionReason, Verdict,
};
pub use pass::{
    filter_collection, FeaturePass, FilterOptions, FilterStats, DEFAULT_OUTPUT_NAME,
    DEFAULT_PROGRESS_INTERVAL,
};
