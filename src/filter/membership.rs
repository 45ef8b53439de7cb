//! Vertex-presence test of a geometry against a region.
//!
//! A geometry matches when at least one of its vertices lies inside the
//! region. A polygon that encloses the whole region without having a vertex
//! inside it does not match.

use geo::CoordsIter;

use crate::models::{FeatureGeometry, Region};

/// Why a feature was left out of the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason {
    /// Well-formed polygonal geometry with no vertex inside the region
    NoVertexInRegion,
    MissingGeometry,
    UnsupportedType(String),
    Malformed(String),
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExclusionReason::NoVertexInRegion => write!(f, "no vertex inside region"),
            ExclusionReason::MissingGeometry => write!(f, "missing geometry"),
            ExclusionReason::UnsupportedType(t) if t.is_empty() => {
                write!(f, "geometry has no type")
            }
            ExclusionReason::UnsupportedType(t) => write!(f, "unsupported geometry type {}", t),
            ExclusionReason::Malformed(reason) => write!(f, "malformed geometry: {}", reason),
        }
    }
}

/// Outcome of testing one feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Retained,
    Excluded(ExclusionReason),
}

impl Verdict {
    pub fn is_retained(&self) -> bool {
        matches!(self, Verdict::Retained)
    }
}

pub fn vertex_in_region(region: &Region, lon: f64, lat: f64) -> bool {
    region.contains_vertex(lon, lat)
}

/// Classify a geometry, stopping at the first vertex found inside the region.
pub fn classify(geometry: &FeatureGeometry, region: &Region) -> Verdict {
    let found = match geometry {
        FeatureGeometry::Polygon(polygon) => polygon
            .coords_iter()
            .any(|c| vertex_in_region(region, c.x, c.y)),
        FeatureGeometry::MultiPolygon(multi) => multi
            .coords_iter()
            .any(|c| vertex_in_region(region, c.x, c.y)),
        FeatureGeometry::Absent => {
            return Verdict::Excluded(ExclusionReason::MissingGeometry);
        }
        FeatureGeometry::Unsupported(t) => {
            return Verdict::Excluded(ExclusionReason::UnsupportedType(t.clone()));
        }
        // Vertices before the problem still count, the scan stops at the first match
        FeatureGeometry::Malformed {
            reason,
            leading_vertices,
        } => {
            if leading_vertices
                .iter()
                .any(|c| vertex_in_region(region, c.x, c.y))
            {
                return Verdict::Retained;
            }
            return Verdict::Excluded(ExclusionReason::Malformed(reason.clone()));
        }
    };

    if found {
        Verdict::Retained
    } else {
        Verdict::Excluded(ExclusionReason::NoVertexInRegion)
    }
}

/// Whether any vertex of the geometry lies inside the region.
///
/// Unsupported and absent geometries never match; a malformed one matches only
/// on the vertices that precede its first problem.
pub fn geometry_intersects_region(geometry: &FeatureGeometry, region: &Region) -> bool {
    classify(geometry, region).is_retained()
}
