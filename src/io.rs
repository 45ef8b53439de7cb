//! Reading and writing feature collection documents.
//!
//! Paths ending in `.gz` are gunzipped on load and gzipped on save.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::info;

use crate::error::{FloodBboxError, Result};
use crate::models::FeatureCollection;

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "gz")
}

/// Load a whole collection into memory.
pub fn load_collection(path: &Path) -> Result<FeatureCollection> {
    info!("Loading GeoJSON from {}...", path.display());

    let file = File::open(path).map_err(|source| FloodBboxError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let reader: Box<dyn Read> = if is_gzip(path) {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let collection: FeatureCollection =
        serde_json::from_reader(BufReader::new(reader)).map_err(|e| {
            if e.is_io() {
                FloodBboxError::Read {
                    path: path.to_path_buf(),
                    source: e.into(),
                }
            } else {
                FloodBboxError::Parse {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

    info!("Loaded {} features", collection.len());
    Ok(collection)
}

fn encode<W: Write>(
    writer: &mut W,
    collection: &FeatureCollection,
    pretty: bool,
    path: &Path,
) -> Result<()> {
    let written = if pretty {
        serde_json::to_writer_pretty(writer, collection)
    } else {
        serde_json::to_writer(writer, collection)
    };

    written.map_err(|e| {
        if e.is_io() {
            FloodBboxError::Write {
                path: path.to_path_buf(),
                source: e.into(),
            }
        } else {
            FloodBboxError::Encode {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Write a collection, replacing any existing file. Parent directories must exist.
pub fn save_collection(path: &Path, collection: &FeatureCollection, pretty: bool) -> Result<()> {
    info!("Saving {} features...", collection.len());

    let write_err = |source| FloodBboxError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);

    if is_gzip(path) {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        encode(&mut encoder, collection, pretty, path)?;
        writer = encoder.finish().map_err(write_err)?;
    } else {
        encode(&mut writer, collection, pretty, path)?;
    }
    writer.flush().map_err(write_err)?;

    info!("File saved at: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter_collection, FilterOptions};
    use crate::models::{FeatureGeometry, Region};
    use std::fs;

    const INPUT: &str = r#"{
        "type": "FeatureCollection",
        "name": "flood-risk-zone",
        "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:OGC:1.3:CRS84" } },
        "features": [
            { "type": "Feature", "properties": { "flood-risk-level": "High", "zone": 3 },
              "geometry": { "type": "Polygon", "coordinates": [[[0.9, 51.2], [0.91, 51.2], [0.9, 51.21], [0.9, 51.2]]] } },
            { "type": "Feature", "properties": { "flood-risk-level": "Low" },
              "geometry": { "type": "Polygon", "coordinates": [[[-2.5, 53.4], [-2.4, 53.4], [-2.5, 53.5], [-2.5, 53.4]]] } }
        ]
    }"#;

    #[test]
    fn test_load_filter_save() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("flood-risk-zone.geojson");
        let output_path = dir.path().join("flood_risk_kent_filtered.geojson");
        fs::write(&input_path, INPUT).unwrap();

        let collection = load_collection(&input_path).unwrap();
        assert_eq!(collection.len(), 2);

        let (filtered, stats) =
            filter_collection(&collection, &Region::kent(), &FilterOptions::default());
        assert_eq!(stats.retained, 1);
        save_collection(&output_path, &filtered, false).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
        let keys: Vec<&String> = written.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["type", "name", "features"]);
        assert_eq!(written["type"], "FeatureCollection");
        assert_eq!(written["name"], "flood-risk-kent");
        assert_eq!(written["features"].as_array().unwrap().len(), 1);
        assert_eq!(written["features"][0]["properties"]["flood-risk-level"], "High");
        assert_eq!(written["features"][0]["properties"]["zone"], 3);
    }

    #[test]
    fn test_gzip_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("in.geojson");
        let packed = dir.path().join("out.geojson.gz");
        fs::write(&plain, INPUT).unwrap();

        let collection = load_collection(&plain).unwrap();
        save_collection(&packed, &collection, true).unwrap();

        // Gzip magic bytes
        let bytes = fs::read(&packed).unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);

        let reloaded = load_collection(&packed).unwrap();
        assert_eq!(reloaded.features, collection.features);
        assert!(matches!(
            reloaded.features[0].geometry(),
            FeatureGeometry::Polygon(_)
        ));
    }

    #[test]
    fn test_missing_input_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_collection(&dir.path().join("nope.geojson")).unwrap_err();
        assert!(matches!(err, FloodBboxError::Read { .. }));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.geojson");
        fs::write(&path, "{ \"features\": [ ").unwrap();
        assert!(matches!(
            load_collection(&path).unwrap_err(),
            FloodBboxError::Parse { .. }
        ));

        fs::write(&path, "{ \"type\": \"FeatureCollection\" }").unwrap();
        assert!(matches!(
            load_collection(&path).unwrap_err(),
            FloodBboxError::Parse { .. }
        ));
    }

    #[test]
    fn test_unwritable_output_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.geojson");
        let collection = FeatureCollection::new("flood-risk-kent", vec![]);
        assert!(matches!(
            save_collection(&path, &collection, false).unwrap_err(),
            FloodBboxError::Write { .. }
        ));
    }
}
