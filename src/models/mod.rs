//! Core data models for the bounding-box filter.

pub mod feature;
pub mod geometry;
pub mod region;

pub use feature::{Feature, FeatureCollection, FEATURE_COLLECTION};
pub use geometry::FeatureGeometry;
pub use region::{Region, RegionError};
