use crate::models::{Business, CategoryBucket, Coordinates, Location};
use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Lenient row shapes shared by every snapshot source
// ---------------------------------------------------------------------------

/// Location row before validation. `coordinates` is `[lon, lat]` or a GeoJSON
/// point object.
#[derive(Debug, Deserialize)]
pub(super) struct RawLocationRow {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, rename = "_id")]
    document_id: Option<Value>,
    name: String,
    #[serde(default)]
    coordinates: Option<Value>,
}

/// Business row before validation.
#[derive(Debug, Deserialize)]
pub(super) struct RawBusinessRow {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, rename = "_id")]
    document_id: Option<Value>,
    name: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    coordinates: Option<Value>,
    #[serde(default, alias = "averageRating")]
    rating: Option<Value>,
}

/// Stable identifier from `id`, then `_id` (plain or `{"$oid": ...}`).
fn identifier(id: Option<Value>, document_id: Option<Value>) -> Option<String> {
    [id, document_id].into_iter().flatten().find_map(|value| match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("$oid").and_then(Value::as_str).map(str::to_string),
        _ => None,
    })
}

/// `[lon, lat]` array or `{"type": "Point", "coordinates": [lon, lat]}`.
pub(super) fn parse_coordinates(value: &Value) -> Result<Coordinates, String> {
    let pair = match value {
        Value::Array(pair) => pair,
        Value::Object(point) => match point.get("coordinates") {
            Some(Value::Array(pair)) => pair,
            _ => return Err("point object has no coordinates array".to_string()),
        },
        Value::Null => return Err("coordinates are null".to_string()),
        other => return Err(format!("unsupported coordinates value: {}", other)),
    };

    let numbers: Vec<f64> = pair.iter().filter_map(Value::as_f64).collect();
    if numbers.len() != pair.len() {
        return Err("coordinates contain non-numeric values".to_string());
    }
    Coordinates::from_lon_lat(&numbers)
}

/// Numbers are taken as-is, numeric strings are parsed, anything else is 0.
fn parse_rating(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

impl RawLocationRow {
    /// `None` when the row has no usable coordinates; such a location can
    /// never be nearest to anything.
    pub fn into_location(self, position: usize) -> Option<Location> {
        let coordinates = match self.coordinates.as_ref().map(parse_coordinates) {
            Some(Ok(coordinates)) => coordinates,
            Some(Err(e)) => {
                tracing::warn!("Dropping location '{}': {}", self.name, e);
                return None;
            }
            None => {
                tracing::warn!("Dropping location '{}': no coordinates", self.name);
                return None;
            }
        };

        let id = identifier(self.id, self.document_id)
            .unwrap_or_else(|| format!("location-{}", position));

        Some(Location::new(id, self.name, coordinates))
    }
}

impl RawBusinessRow {
    pub fn into_business(self, position: usize, normalize_categories: bool) -> Business {
        let coordinates = match self.coordinates.as_ref().map(parse_coordinates) {
            Some(Ok(coordinates)) => Some(coordinates),
            Some(Err(e)) => {
                tracing::debug!(business = %self.name, "No usable coordinates: {}", e);
                None
            }
            None => None,
        };

        let raw_category = self.category.unwrap_or_default();
        let category = if normalize_categories {
            CategoryBucket::classify(&raw_category).as_str().to_string()
        } else {
            raw_category
        };

        let id = identifier(self.id, self.document_id)
            .unwrap_or_else(|| format!("business-{}", position));

        Business::new(
            id,
            self.name,
            self.address.unwrap_or_default(),
            category,
            coordinates,
            parse_rating(self.rating.as_ref()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn business(row: Value) -> Business {
        serde_json::from_value::<RawBusinessRow>(row)
            .unwrap()
            .into_business(7, false)
    }

    #[test]
    fn test_plain_and_geojson_coordinates() {
        let plain = parse_coordinates(&json!([74.35, 31.52])).unwrap();
        assert_eq!((plain.lat, plain.lng), (31.52, 74.35));

        let point = json!({"type": "Point", "coordinates": [74.35, 31.52]});
        assert_eq!(parse_coordinates(&point).unwrap(), plain);

        assert!(parse_coordinates(&json!([74.35])).is_err());
        assert!(parse_coordinates(&json!(["a", "b"])).is_err());
        assert!(parse_coordinates(&json!([0.0, 120.0])).is_err());
        assert!(parse_coordinates(&json!("31.5,74.3")).is_err());
    }

    #[test]
    fn test_business_row_document_shape() {
        let b = business(json!({
            "_id": {"$oid": "65f1c0ffee"},
            "name": "Monal",
            "address": "Pir Sohawa",
            "category": "Restaurant",
            "coordinates": {"type": "Point", "coordinates": [73.07, 33.76]},
            "averageRating": 4.6
        }));
        assert_eq!(b.id, "65f1c0ffee");
        assert_eq!(b.rating, 4.6);
        assert_eq!(b.coordinates.unwrap().lat, 33.76);
    }

    #[test]
    fn test_business_row_lenient_values() {
        let b = business(json!({
            "name": "Tea Stall",
            "category": "restaurant",
            "coordinates": null,
            "rating": "n/a"
        }));
        assert_eq!(b.id, "business-7");
        assert_eq!(b.address, "");
        assert_eq!(b.rating, 0.0);
        assert!(b.coordinates.is_none());

        let rated = business(json!({"name": "x", "rating": "3.5"}));
        assert_eq!(rated.rating, 3.5);
        let clamped = business(json!({"name": "x", "rating": 9}));
        assert_eq!(clamped.rating, 5.0);
    }

    #[test]
    fn test_business_category_normalization() {
        let row = json!({"name": "PC", "category": "Hotels & Resorts"});
        let kept = serde_json::from_value::<RawBusinessRow>(row.clone())
            .unwrap()
            .into_business(0, false);
        assert_eq!(kept.category, "Hotels & Resorts");

        let normalized = serde_json::from_value::<RawBusinessRow>(row)
            .unwrap()
            .into_business(0, true);
        assert_eq!(
            normalized.category,
            CategoryBucket::classify("Hotels & Resorts").as_str()
        );
    }

    #[test]
    fn test_location_rows() {
        let located: RawLocationRow = serde_json::from_value(json!({
            "id": 12,
            "name": "Lahore",
            "coordinates": [74.35, 31.52]
        }))
        .unwrap();
        let location = located.into_location(0).unwrap();
        assert_eq!(location.id, "12");
        assert_eq!(location.coordinates.lat, 31.52);

        let unlocated: RawLocationRow = serde_json::from_value(json!({"name": "Ghost"})).unwrap();
        assert!(unlocated.into_location(1).is_none());

        let anonymous: RawLocationRow = serde_json::from_value(json!({
            "name": "Murree",
            "coordinates": [73.39, 33.9]
        }))
        .unwrap();
        assert_eq!(anonymous.into_location(3).unwrap().id, "location-3");
    }
}
