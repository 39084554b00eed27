//! Geodesic travel distances for displayed route figures.
//!
//! Nearest-location matching and distance ranking use the planar metric
//! ([`planar_distance`]); everything shown to a traveller, and the stop score,
//! goes through [`geodesic_distance_km`]. Assignment results depend on the
//! planar metric, so the two must not be swapped.

use crate::models::{Coordinates, DistanceKm};
use geo::{Distance, Geodesic, Point};

/// Degree-space Euclidean distance between two coordinates.
pub fn planar_distance(a: &Coordinates, b: &Coordinates) -> f64 {
    a.planar_distance_to(b)
}

/// Distance on the WGS84 ellipsoid in kilometers.
///
/// Returns `None` when either point is not a valid coordinate or the result is
/// not a finite distance; callers decide how to penalize that.
pub fn geodesic_distance_km(a: &Coordinates, b: &Coordinates) -> Option<DistanceKm> {
    let a = Coordinates::new(a.lat, a.lng).ok()?;
    let b = Coordinates::new(b.lat, b.lng).ok()?;

    let meters = Geodesic.distance(Point::new(a.lng, a.lat), Point::new(b.lng, b.lat));
    match DistanceKm::new(meters / 1000.0) {
        Ok(distance) => Some(distance),
        Err(e) => {
            tracing::debug!(?a, ?b, "Geodesic distance failed: {}", e);
            None
        }
    }
}

/// Sum of consecutive geodesic legs across an ordered sequence of points.
///
/// Fewer than two points is a zero-length route. Any failing leg fails the
/// whole total.
pub fn total_route_distance(points: &[Coordinates]) -> Option<DistanceKm> {
    points
        .windows(2)
        .map(|leg| geodesic_distance_km(&leg[0], &leg[1]))
        .sum()
}
