//! Filter/transform: keep the records flagged ready and turn each one into a
//! GeoJSON point feature that carries the whole record as its properties.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value as GeoJsonValue};
use serde_json::Value;

use crate::error::RunError;

pub const READY_KEY: &str = "Ready";
pub const LONGITUDE_KEY: &str = "Longitude";
pub const LATITUDE_KEY: &str = "Latitude";

/// Coordinate used when a record has no `Longitude`/`Latitude` key.
pub const DEFAULT_COORDINATE: f64 = 0.0;

/// Ready records as a collection, plus counts for the run summary.
#[derive(Debug, Clone)]
pub struct ReadyFeatures {
    pub collection: FeatureCollection,
    /// Entries seen in the dataset, including skipped ones.
    pub total: usize,
    /// Entries that were not JSON objects.
    pub skipped: usize,
}

impl ReadyFeatures {
    pub fn ready(&self) -> usize {
        self.collection.features.len()
    }
}

/// True iff `Ready` is a string whose uppercase form is exactly `TRUE`.
pub fn is_ready(record: &JsonObject) -> bool {
    match record.get(READY_KEY) {
        Some(Value::String(s)) => s.to_uppercase() == "TRUE",
        _ => false,
    }
}

/// Missing key → [`DEFAULT_COORDINATE`]; a number → its value; anything else is an error.
fn coordinate(record: &JsonObject, index: usize, field: &'static str) -> Result<f64, RunError> {
    let invalid = |value: &Value| RunError::InvalidCoordinate {
        index,
        field,
        value: value.clone(),
    };
    match record.get(field) {
        None => Ok(DEFAULT_COORDINATE),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| invalid(&Value::Number(n.clone()))),
        Some(other) => Err(invalid(other)),
    }
}

/// Build the point feature for one record. `index` is the record's position
/// in the dataset and only appears in errors.
pub fn to_feature(index: usize, record: JsonObject) -> Result<Feature, RunError> {
    let lon = coordinate(&record, index, LONGITUDE_KEY)?;
    let lat = coordinate(&record, index, LATITUDE_KEY)?;
    Ok(Feature {
        bbox: None,
        geometry: Some(Geometry::new(GeoJsonValue::Point(vec![lon, lat]))),
        id: None,
        properties: Some(record),
        foreign_members: None,
    })
}

/// Select ready records in dataset order and convert them to features.
pub fn ready_features(records: Vec<Value>) -> Result<ReadyFeatures, RunError> {
    let total = records.len();
    let mut skipped = 0;
    let mut features = Vec::new();

    for (index, entry) in records.into_iter().enumerate() {
        let record = match entry {
            Value::Object(map) => map,
            other => {
                tracing::warn!("skipping record {}: not an object ({})", index, other);
                skipped += 1;
                continue;
            }
        };
        if is_ready(&record) {
            features.push(to_feature(index, record)?);
        }
    }

    tracing::debug!(
        "{} of {} records ready ({} skipped)",
        features.len(),
        total,
        skipped
    );

    Ok(ReadyFeatures {
        collection: FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        },
        total,
        skipped,
    })
}
