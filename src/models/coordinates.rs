use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Exact bit pattern of a coordinate pair, usable as a set key.
pub type CoordinateKey = (u64, u64);

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(format!(
                "Coordinates must be finite numbers (lat: {}, lng: {})",
                lat, lng
            ));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            ));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lng
            ));
        }
        Ok(Coordinates { lat, lng })
    }

    /// Build from a snapshot pair ordered `[lon, lat]`.
    pub fn from_lon_lat(pair: &[f64]) -> Result<Self, String> {
        match pair {
            [lng, lat] => Self::new(*lat, *lng),
            _ => Err(format!(
                "Expected [lon, lat] pair, got {} values",
                pair.len()
            )),
        }
    }

    /// Build from an endpoint pair ordered `[lat, lon]`.
    pub fn from_lat_lon(pair: &[f64]) -> Result<Self, String> {
        match pair {
            [lat, lng] => Self::new(*lat, *lng),
            _ => Err(format!(
                "Expected [lat, lon] pair, got {} values",
                pair.len()
            )),
        }
    }

    /// Euclidean norm over raw longitude/latitude differences.
    ///
    /// This is a degree-space approximation used for nearest-location matching
    /// and distance ranking. Displayed route distances use the geodesic metric
    /// in [`crate::services::route_distance`] instead.
    pub fn planar_distance_to(&self, other: &Coordinates) -> f64 {
        let dlng = self.lng - other.lng;
        let dlat = self.lat - other.lat;
        (dlng * dlng + dlat * dlat).sqrt()
    }

    /// Arithmetic midpoint (average latitude, average longitude).
    pub fn midpoint(&self, other: &Coordinates) -> Coordinates {
        Coordinates {
            lat: (self.lat + other.lat) / 2.0,
            lng: (self.lng + other.lng) / 2.0,
        }
    }

    pub fn key(&self) -> CoordinateKey {
        (self.lat.to_bits(), self.lng.to_bits())
    }
}
