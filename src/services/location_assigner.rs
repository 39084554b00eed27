use crate::models::{Business, Coordinates, Location, LocationIndex};
use crate::services::route_distance::planar_distance;
use std::collections::BTreeMap;

/// Businesses grouped under their nearest reference location, keyed by name.
/// Every location in the index has an entry, possibly empty.
pub type LocationAssignment = BTreeMap<String, Vec<Business>>;

/// Nearest location to `point` by planar distance.
///
/// Equidistant locations resolve to the lexicographically smallest name: the
/// index iterates in name order and only a strictly smaller distance replaces
/// the current best.
pub fn nearest_location<'a>(
    point: &Coordinates,
    locations: &'a LocationIndex,
) -> Option<&'a Location> {
    let mut best: Option<(&Location, f64)> = None;

    for location in locations.iter() {
        let distance = planar_distance(point, &location.coordinates);
        if distance.is_nan() {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((location, distance)),
        }
    }

    best.map(|(location, _)| location)
}

/// Assign each business with coordinates to its nearest location.
///
/// Businesses without coordinates are left out. Snapshot order is preserved
/// within each location's list.
pub fn assign_to_nearest(businesses: &[Business], locations: &LocationIndex) -> LocationAssignment {
    let mut assignment: LocationAssignment = locations
        .names()
        .map(|name| (name.to_string(), Vec::new()))
        .collect();

    let mut unlocated = 0usize;
    for business in businesses {
        let Some(coordinates) = business.coordinates else {
            unlocated += 1;
            continue;
        };

        if let Some(location) = nearest_location(&coordinates, locations) {
            if let Some(bucket) = assignment.get_mut(&location.name) {
                bucket.push(business.clone());
            }
        }
    }

    tracing::debug!(
        businesses = businesses.len(),
        locations = locations.len(),
        unlocated,
        "Assigned businesses to nearest locations"
    );

    assignment
}
