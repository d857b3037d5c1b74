//! Shop records as supplied by the directory backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shopmap_geo::Location;

/// A shop: stable id, location, and display metadata the planner never reads.
///
/// Deserializes from flat records such as
/// `{"id": 1, "latitude": -3.97, "longitude": 122.51, "name": "..."}`;
/// every field other than the id and coordinates is kept in `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: i64,
    #[serde(flatten)]
    pub location: Location,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Shop {
    pub fn new(id: i64, location: Location) -> Self {
        Self {
            id,
            location,
            metadata: Map::new(),
        }
    }

    /// Attach a metadata field.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The `name` metadata field, if present and a string.
    pub fn name(&self) -> Option<&str> {
        self.metadata.get("name").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_record_round_trip() {
        let record = json!({
            "id": 7,
            "latitude": -3.9778,
            "longitude": 122.5194,
            "name": "Toko Sembako",
            "address": "Jl. Ahmad Yani"
        });

        let shop: Shop = serde_json::from_value(record.clone()).unwrap();
        assert_eq!(shop.id, 7);
        assert_eq!(shop.location, Location::new(-3.9778, 122.5194));
        assert_eq!(shop.name(), Some("Toko Sembako"));
        assert_eq!(shop.metadata.len(), 2);
        assert!(!shop.metadata.contains_key("latitude"));

        assert_eq!(serde_json::to_value(&shop).unwrap(), record);
    }

    #[test]
    fn test_builder() {
        let shop = Shop::new(1, Location::new(0.0, 0.0)).with_metadata("name", "Kios");
        assert_eq!(shop.name(), Some("Kios"));
        assert_eq!(Shop::new(2, Location::new(0.0, 0.0)).name(), None);
    }

    #[test]
    fn test_missing_coordinates_rejected() {
        let record = json!({"id": 1, "latitude": 1.0});
        assert!(serde_json::from_value::<Shop>(record).is_err());
    }
}
