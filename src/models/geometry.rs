//! Tagged geometry decoded from a feature's `geometry` member.
//!
//! Decoding happens once, when the collection is parsed. Anything the filter
//! cannot traverse ends up in one of the non-polygonal variants instead of
//! failing the whole document.

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;

/// Geometry of a single feature
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
    /// No `geometry` member, or an explicit `null`
    Absent,
    /// A `type` discriminator other than `Polygon`/`MultiPolygon`
    Unsupported(String),
    /// A polygonal type whose coordinates could not be read all the way through
    Malformed {
        /// First problem found
        reason: String,
        /// Vertices read before the problem, in document order
        leading_vertices: Vec<Coord<f64>>,
    },
}

impl FeatureGeometry {
    /// Decode the `geometry` member of a feature record.
    pub fn from_json(geometry: Option<&Value>) -> Self {
        let object = match geometry {
            None | Some(Value::Null) => return FeatureGeometry::Absent,
            Some(Value::Object(object)) => object,
            Some(other) => {
                return FeatureGeometry::Malformed {
                    reason: format!("geometry is {}, expected an object", json_kind(other)),
                    leading_vertices: vec![],
                }
            }
        };

        let geom_type = match object.get("type") {
            Some(Value::String(s)) => s.as_str(),
            Some(other) => return FeatureGeometry::Unsupported(other.to_string()),
            None => return FeatureGeometry::Unsupported(String::new()),
        };

        // A polygonal geometry without coordinates simply has no vertices
        let coordinates = object.get("coordinates");

        match geom_type {
            "Polygon" => {
                let mut rings = Vec::new();
                let decoded = match coordinates {
                    None => Ok(()),
                    Some(value) => decode_polygon(value, &mut rings),
                };
                match decoded {
                    Ok(()) => FeatureGeometry::Polygon(polygon_from_rings(rings)),
                    Err(reason) => FeatureGeometry::Malformed {
                        reason,
                        leading_vertices: rings.into_iter().flat_map(|r| r.0).collect(),
                    },
                }
            }
            "MultiPolygon" => {
                let mut polygons = Vec::new();
                let decoded = match coordinates {
                    None => Ok(()),
                    Some(value) => decode_multi_polygon(value, &mut polygons),
                };
                match decoded {
                    Ok(()) => FeatureGeometry::MultiPolygon(MultiPolygon::new(
                        polygons.into_iter().map(polygon_from_rings).collect(),
                    )),
                    Err(reason) => FeatureGeometry::Malformed {
                        reason,
                        leading_vertices: polygons
                            .into_iter()
                            .flatten()
                            .flat_map(|r| r.0)
                            .collect(),
                    },
                }
            }
            other => FeatureGeometry::Unsupported(other.to_string()),
        }
    }
}

/// First ring is the exterior, the rest are holes.
fn polygon_from_rings(mut rings: Vec<LineString<f64>>) -> Polygon<f64> {
    if rings.is_empty() {
        return Polygon::new(LineString::new(vec![]), vec![]);
    }
    let exterior = rings.remove(0);
    Polygon::new(exterior, rings)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn as_array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>, String> {
    value
        .as_array()
        .ok_or_else(|| format!("{} is {}, expected an array", what, json_kind(value)))
}

fn decode_vertex(value: &Value) -> Result<Coord<f64>, String> {
    let pair = as_array(value, "vertex")?;
    if pair.len() != 2 {
        return Err(format!("vertex has {} coordinates, expected 2", pair.len()));
    }

    let number = |v: &Value, axis: &str| {
        v.as_f64()
            .ok_or_else(|| format!("{} is {}, expected a number", axis, json_kind(v)))
    };

    Ok(Coord {
        x: number(&pair[0], "longitude")?,
        y: number(&pair[1], "latitude")?,
    })
}

// The decoders below push what they have read into `out` as they go, so on
// error `out` holds everything before the anomaly.

fn decode_ring(value: &Value, out: &mut Vec<Coord<f64>>) -> Result<(), String> {
    for (i, v) in as_array(value, "ring")?.iter().enumerate() {
        out.push(decode_vertex(v).map_err(|e| format!("vertex {}: {}", i, e))?);
    }
    Ok(())
}

fn decode_polygon(value: &Value, out: &mut Vec<LineString<f64>>) -> Result<(), String> {
    for (i, v) in as_array(value, "polygon")?.iter().enumerate() {
        let mut coords = Vec::new();
        let decoded = decode_ring(v, &mut coords);
        out.push(LineString::new(coords));
        decoded.map_err(|e| format!("ring {}: {}", i, e))?;
    }
    Ok(())
}

fn decode_multi_polygon(
    value: &Value,
    out: &mut Vec<Vec<LineString<f64>>>,
) -> Result<(), String> {
    for (i, v) in as_array(value, "multipolygon")?.iter().enumerate() {
        let mut rings = Vec::new();
        let decoded = decode_polygon(v, &mut rings);
        out.push(rings);
        decoded.map_err(|e| format!("polygon {}: {}", i, e))?;
    }
    Ok(())
}
