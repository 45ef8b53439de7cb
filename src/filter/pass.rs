//! Single in-memory filtering pass over a feature collection.

use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use super::membership::{classify, ExclusionReason, Verdict};
use crate::models::{FeatureCollection, Region};

pub const DEFAULT_OUTPUT_NAME: &str = "flood-risk-kent";
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1000;

#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// `name` of the produced collection
    pub output_name: String,
    /// Log a progress line every N features; 0 disables it
    pub progress_interval: usize,
    /// Report unsupported, absent and malformed geometries at `warn` instead of `debug`
    pub log_exclusions: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            log_exclusions: false,
        }
    }
}

/// Counters for one pass. Exclusion counters add up to `processed - retained`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub processed: usize,
    pub retained: usize,
    pub no_vertex_in_region: usize,
    pub missing_geometry: usize,
    pub unsupported_type: usize,
    pub malformed: usize,
}

impl FilterStats {
    fn record(&mut self, verdict: &Verdict) {
        self.processed += 1;
        match verdict {
            Verdict::Retained => self.retained += 1,
            Verdict::Excluded(ExclusionReason::NoVertexInRegion) => self.no_vertex_in_region += 1,
            Verdict::Excluded(ExclusionReason::MissingGeometry) => self.missing_geometry += 1,
            Verdict::Excluded(ExclusionReason::UnsupportedType(_)) => self.unsupported_type += 1,
            Verdict::Excluded(ExclusionReason::Malformed(_)) => self.malformed += 1,
        }
    }

    pub fn excluded(&self) -> usize {
        self.processed - self.retained
    }
}

/// Filter pass over one region, optionally driving a progress bar.
pub struct FeaturePass<'a> {
    region: &'a Region,
    options: &'a FilterOptions,
    progress_bar: Option<ProgressBar>,
}

impl<'a> FeaturePass<'a> {
    pub fn new(region: &'a Region, options: &'a FilterOptions) -> Self {
        Self {
            region,
            options,
            progress_bar: None,
        }
    }

    /// Advance `pb` once per feature. Its length is set to the collection size.
    pub fn with_progress_bar(mut self, pb: ProgressBar) -> Self {
        self.progress_bar = Some(pb);
        self
    }

    /// Build a new collection holding, in input order, the features with a vertex in the region.
    pub fn run(&self, collection: &FeatureCollection) -> (FeatureCollection, FilterStats) {
        info!("Filtering features in bounding box {}...", self.region);

        if let Some(pb) = &self.progress_bar {
            pb.set_length(collection.len() as u64);
        }

        let mut stats = FilterStats::default();
        let mut retained = Vec::new();

        for (i, feature) in collection.features.iter().enumerate() {
            let verdict = classify(feature.geometry(), self.region);
            stats.record(&verdict);

            match &verdict {
                Verdict::Retained => retained.push(feature.clone()),
                Verdict::Excluded(ExclusionReason::NoVertexInRegion) => {}
                Verdict::Excluded(reason) => {
                    if self.options.log_exclusions {
                        warn!("Feature {} excluded: {}", i, reason);
                    } else {
                        debug!("Feature {} excluded: {}", i, reason);
                    }
                }
            }

            if self.options.progress_interval > 0 && i % self.options.progress_interval == 0 {
                info!("Processed {} features...", i);
            }

            if let Some(pb) = &self.progress_bar {
                pb.inc(1);
            }
        }

        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("Filtering complete");
        }

        info!(
            "Total features retained: {} of {}",
            stats.retained, stats.processed
        );
        if stats.missing_geometry + stats.unsupported_type + stats.malformed > 0 {
            info!(
                "Skipped {} without geometry, {} unsupported, {} malformed",
                stats.missing_geometry, stats.unsupported_type, stats.malformed
            );
        }

        (
            FeatureCollection::new(self.options.output_name.clone(), retained),
            stats,
        )
    }
}

/// Run one pass without a progress bar.
pub fn filter_collection(
    collection: &FeatureCollection,
    region: &Region,
    options: &FilterOptions,
) -> (FeatureCollection, FilterStats) {
    FeaturePass::new(region, options).run(collection)
}
