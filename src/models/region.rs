//! Axis-aligned lon/lat bounding box used as the inclusion test.

use thiserror::Error;

/// Reasons a set of bounds cannot form a [`Region`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegionError {
    #[error("region bound {name} is not a finite number ({value})")]
    NonFinite { name: &'static str, value: f64 },

    #[error("min_lon ({min}) is greater than max_lon ({max})")]
    InvertedLongitude { min: f64, max: f64 },

    #[error("min_lat ({min}) is greater than max_lat ({max})")]
    InvertedLatitude { min: f64, max: f64 },
}

/// Rectangular region in geographic coordinates, bounds inclusive on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl Region {
    pub fn new(
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    ) -> Result<Self, RegionError> {
        for (name, value) in [
            ("min_lon", min_lon),
            ("min_lat", min_lat),
            ("max_lon", max_lon),
            ("max_lat", max_lat),
        ] {
            if !value.is_finite() {
                return Err(RegionError::NonFinite { name, value });
            }
        }

        if min_lon > max_lon {
            return Err(RegionError::InvertedLongitude {
                min: min_lon,
                max: max_lon,
            });
        }
        if min_lat > max_lat {
            return Err(RegionError::InvertedLatitude {
                min: min_lat,
                max: max_lat,
            });
        }

        Ok(Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    /// Box covering all of Kent, Canterbury included.
    pub fn kent() -> Self {
        Self {
            min_lon: 0.5,
            min_lat: 51.0,
            max_lon: 1.7,
            max_lat: 51.6,
        }
    }

    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    /// True iff the vertex lies inside the box or on its edge
    pub fn contains_vertex(&self, lon: f64, lat: f64) -> bool {
        self.min_lon <= lon && lon <= self.max_lon && self.min_lat <= lat && lat <= self.max_lat
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::kent()
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.min_lon, self.max_lon, self.min_lat, self.max_lat
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_and_boundaries_inclusive() {
        let region = Region::kent();
        assert!(region.contains_vertex(0.9, 51.2));
        assert!(region.contains_vertex(0.5, 51.0));
        assert!(region.contains_vertex(1.7, 51.6));
        assert!(region.contains_vertex(0.5, 51.6));
        assert!(region.contains_vertex(1.7, 51.3));
    }

    #[test]
    fn test_outside_either_axis() {
        let region = Region::kent();
        assert!(!region.contains_vertex(0.4999, 51.2));
        assert!(!region.contains_vertex(1.7001, 51.2));
        assert!(!region.contains_vertex(1.0, 50.9999));
        assert!(!region.contains_vertex(1.0, 51.6001));
        assert!(!region.contains_vertex(10.0, 10.0));
        assert!(!region.contains_vertex(f64::NAN, 51.2));
    }

    #[test]
    fn test_degenerate_box_allowed() {
        let region = Region::new(1.0, 51.0, 1.0, 51.0).unwrap();
        assert!(region.contains_vertex(1.0, 51.0));
        assert!(!region.contains_vertex(1.0, 51.1));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        assert_eq!(
            Region::new(2.0, 51.0, 1.0, 52.0),
            Err(RegionError::InvertedLongitude { min: 2.0, max: 1.0 })
        );
        assert_eq!(
            Region::new(0.0, 52.0, 1.0, 51.0),
            Err(RegionError::InvertedLatitude {
                min: 52.0,
                max: 51.0
            })
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            Region::new(f64::NAN, 0.0, 1.0, 1.0),
            Err(RegionError::NonFinite { name: "min_lon", .. })
        ));
        assert!(matches!(
            Region::new(0.0, 0.0, 1.0, f64::INFINITY),
            Err(RegionError::NonFinite { name: "max_lat", .. })
        ));
    }
}
