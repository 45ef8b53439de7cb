//! Feature and feature collection documents.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::FeatureGeometry;

pub const FEATURE_COLLECTION: &str = "FeatureCollection";

/// One record of the collection.
///
/// The record is kept exactly as parsed so that a retained feature is written
/// back untouched; the geometry is decoded alongside it for the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    record: Value,
    geometry: FeatureGeometry,
}

impl Feature {
    pub fn from_record(record: Value) -> Self {
        let geometry = FeatureGeometry::from_json(record.get("geometry"));
        Self { record, geometry }
    }

    pub fn geometry(&self) -> &FeatureGeometry {
        &self.geometry
    }

    /// The original record, including `geometry`, `properties` and any foreign members
    pub fn record(&self) -> &Value {
        &self.record
    }
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Feature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Feature::from_record)
    }
}

fn default_collection_type() -> String {
    FEATURE_COLLECTION.to_string()
}

/// Named, ordered set of features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "InputCollection")]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub collection_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub features: Vec<Feature>,
}

/// Input side of a collection: only `features` is required, and `type`/`name`
/// are taken when they are strings and ignored otherwise.
#[derive(Deserialize)]
struct InputCollection {
    #[serde(rename = "type", default)]
    collection_type: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    features: Vec<Feature>,
}

impl From<InputCollection> for FeatureCollection {
    fn from(input: InputCollection) -> Self {
        let as_string = |v: Option<Value>| match v {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };
        Self {
            collection_type: as_string(input.collection_type)
                .unwrap_or_else(default_collection_type),
            name: as_string(input.name),
            features: input.features,
        }
    }
}

impl FeatureCollection {
    pub fn new(name: impl Into<String>, features: Vec<Feature>) -> Self {
        Self {
            collection_type: default_collection_type(),
            name: Some(name.into()),
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
