//! flood-bbox - clip a flood-risk feature collection to a bounding box
//!
//! This library provides the data models, the filter pass and collection I/O
//! used by the `flood-bbox` binary.

pub mod error;
pub mod filter;
pub mod io;
pub mod models;

pub use error::FloodBboxError;
pub use filter::{filter_collection, FilterOptions, FilterStats};
pub use models::{Feature, FeatureCollection, FeatureGeometry, Region};
