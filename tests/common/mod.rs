use odysseum::config::RecommendationConfig;
use odysseum::models::{
    Business, BusinessCatalog, Coordinates, Location, LocationIndex, RouteEndpoint,
};
use odysseum::services::itinerary_composer::ItineraryComposer;
use odysseum::snapshot::Snapshots;
use std::path::PathBuf;
use uuid::Uuid;

/// Shorthand for valid coordinates
#[allow(dead_code)]
pub fn coords(lat: f64, lng: f64) -> Coordinates {
    Coordinates::new(lat, lng).unwrap()
}

/// Create a test business
#[allow(dead_code)]
pub fn create_test_business(
    name: &str,
    category: &str,
    lat: f64,
    lng: f64,
    rating: f64,
) -> Business {
    Business::new(
        format!("test-{}", name.to_lowercase().replace(' ', "-")),
        name,
        format!("{} Street", name),
        category,
        Some(coords(lat, lng)),
        rating,
    )
}

#[allow(dead_code)]
pub fn endpoint(name: &str, lat: f64, lng: f64) -> RouteEndpoint {
    RouteEndpoint::new(name, coords(lat, lng))
}

/// Three reference locations roughly along a north-south corridor
#[allow(dead_code)]
pub fn test_locations() -> LocationIndex {
    LocationIndex::from_locations(vec![
        Location::new("loc-lahore", "Lahore", coords(31.52, 74.35)),
        Location::new("loc-islamabad", "Islamabad", coords(33.68, 73.04)),
        Location::new("loc-murree", "Murree", coords(33.90, 73.39)),
    ])
    .unwrap()
}

/// Businesses clustered around the test locations
#[allow(dead_code)]
pub fn test_catalog() -> BusinessCatalog {
    BusinessCatalog::new(vec![
        create_test_business("Andaaz", "Restaurant", 31.58, 74.31, 4.5),
        create_test_business("Cuckoo's Den", "restaurant", 31.59, 74.31, 4.1),
        create_test_business("Pearl Continental", "Hotel", 31.55, 74.34, 4.4),
        create_test_business("Monal", "Restaurant", 33.76, 73.07, 4.6),
        create_test_business("Serena", "hotel", 33.71, 73.10, 4.8),
        create_test_business("Lok Virsa", "Entertainment", 33.69, 73.07, 4.3),
        create_test_business("Mall Road Workshop", "Services", 33.90, 73.39, 3.9),
        create_test_business("Pine Cottage", "Hotel", 33.91, 73.40, 3.7),
        create_test_business("Anarkali Bazaar", "Shopping", 31.57, 74.31, 4.9),
        Business::new(
            "test-unmapped",
            "Unmapped Dhaba",
            "Unknown",
            "restaurant",
            None,
            5.0,
        ),
    ])
}

#[allow(dead_code)]
pub fn test_snapshots() -> Snapshots {
    Snapshots {
        locations: test_locations(),
        catalog: test_catalog(),
    }
}

/// Get test composer with default recommendation settings
#[allow(dead_code)]
pub fn test_composer() -> ItineraryComposer {
    ItineraryComposer::new(RecommendationConfig::default())
}

/// Write `contents` to a unique temp file
#[allow(dead_code)]
pub fn write_temp_json(contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("odysseum-test-{}.json", Uuid::new_v4()));
    std::fs::write(&path, contents).expect("Failed to write temp snapshot");
    path
}
