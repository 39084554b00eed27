pub mod rendering;
mod stop_selection;

use crate::config::RecommendationConfig;
use crate::error::{AppError, Result};
use crate::models::request::{DestinationRecommendation, DestinationRequest, OptimizationRequest};
use crate::models::{
    BusinessCatalog, CategoryBucket, Itinerary, LocationIndex, RouteEndpoint, StopPlan,
};
use crate::services::category_ranker::{rank, RankedCategories};
use crate::services::location_assigner::assign_to_nearest;
use crate::services::route_distance::total_route_distance;
use std::collections::BTreeMap;

pub use rendering::render;
pub use stop_selection::{SelectionOutcome, StopSelector};

/// Ranked categories for every reference location, keyed by location name.
pub type LocationRankings = BTreeMap<String, RankedCategories>;

/// Builds recommendations from the in-memory snapshots.
///
/// Two entry points share the ranking primitives: structured lookups join
/// precomputed per-location rankings against requested destinations, and
/// free-form itineraries greedily fill a stop plan around a start/end pair.
#[derive(Clone)]
pub struct ItineraryComposer {
    config: RecommendationConfig,
}

impl ItineraryComposer {
    pub fn new(config: RecommendationConfig) -> Self {
        ItineraryComposer { config }
    }

    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    /// Assign businesses to their nearest location, then rank each location's
    /// businesses per bucket with the location itself as the reference point.
    ///
    /// A request without `top_n` uses the configured default.
    pub fn rank_by_location(
        &self,
        locations: &LocationIndex,
        catalog: &BusinessCatalog,
        optimization: &OptimizationRequest,
    ) -> Result<LocationRankings> {
        if locations.is_empty() {
            return Err(AppError::Validation(
                "Location snapshot is empty".to_string(),
            ));
        }
        if catalog.is_empty() {
            return Err(AppError::Validation(
                "Business snapshot is empty".to_string(),
            ));
        }
        optimization.validate().map_err(AppError::Validation)?;
        let top_n = optimization.top_n_or(self.config.default_top_n);

        let assignment = assign_to_nearest(catalog.as_slice(), locations);

        let rankings: LocationRankings = assignment
            .into_iter()
            .filter_map(|(name, businesses)| {
                let reference = locations.get(&name)?.coordinates;
                let ranked = rank(&businesses, optimization.criterion, top_n, Some(&reference));
                Some((name, ranked))
            })
            .collect();

        tracing::info!(
            locations = rankings.len(),
            criterion = ?optimization.criterion,
            top_n,
            "Ranked businesses for all locations"
        );

        Ok(rankings)
    }

    /// Join requested destinations and categories against precomputed rankings.
    ///
    /// A destination whose name is not a known location gets empty lists.
    pub fn recommend_destinations(
        &self,
        destinations: &[DestinationRequest],
        rankings: &LocationRankings,
    ) -> Vec<DestinationRecommendation> {
        destinations
            .iter()
            .map(|destination| {
                let ranked = rankings.get(&destination.name);
                if ranked.is_none() {
                    tracing::warn!(
                        destination = %destination.name,
                        "Unknown destination, returning empty recommendations"
                    );
                }

                let categories: BTreeMap<CategoryBucket, Vec<_>> = destination
                    .stops
                    .iter()
                    .map(|stop| {
                        let list = ranked
                            .and_then(|r| r.get(&stop.category))
                            .cloned()
                            .unwrap_or_default();
                        (stop.category, list)
                    })
                    .collect();

                DestinationRecommendation {
                    name: destination.name.clone(),
                    categories,
                }
            })
            .collect()
    }

    /// Build a free-form itinerary between the first endpoint and, when there
    /// is more than one, the last.
    pub fn compose(
        &self,
        endpoints: &[RouteEndpoint],
        plan: &StopPlan,
        catalog: &BusinessCatalog,
    ) -> Result<Itinerary> {
        let (start, end) = match endpoints {
            [] => {
                return Err(AppError::Validation(
                    "At least one route endpoint is required".to_string(),
                ));
            }
            [only] => (only.clone(), None),
            [first, .., last] => (first.clone(), Some(last.clone())),
        };

        if endpoints.len() > 2 {
            tracing::debug!(
                endpoints = endpoints.len(),
                "Intermediate endpoints are ignored"
            );
        }

        let reference = match &end {
            Some(end) => start.coordinates.midpoint(&end.coordinates),
            None => start.coordinates,
        };

        let selector = StopSelector::new(self.config.clone());
        let outcome = selector.select_stops(plan, catalog, &reference, &start.coordinates)?;

        let total_distance_km = match &end {
            Some(end) => {
                let total = total_route_distance(&[start.coordinates, end.coordinates]);
                if total.is_none() {
                    tracing::warn!(
                        start = %start.name,
                        end = %end.name,
                        "Could not compute total route distance"
                    );
                }
                total
            }
            None => None,
        };

        tracing::info!(
            start = %start.name,
            end = end.as_ref().map(|e| e.name.as_str()).unwrap_or("-"),
            requested = plan.stops.len(),
            selected = outcome.stops.len(),
            skipped = outcome.skipped.len(),
            "Composed itinerary"
        );

        let mut itinerary = Itinerary::new(start, end);
        itinerary.stops = outcome.stops;
        itinerary.skipped_slots = outcome.skipped;
        itinerary.total_distance_km = total_distance_km;

        Ok(itinerary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Business, Coordinates, Location, StopRequest};

    fn c(lat: f64, lng: f64) -> Coordinates {
        Coordinates::new(lat, lng).unwrap()
    }

    fn composer() -> ItineraryComposer {
        ItineraryComposer::new(RecommendationConfig::default())
    }

    fn restaurant(name: &str, coordinates: Coordinates, rating: f64) -> Business {
        Business::new(name, name, "addr", "Restaurant", Some(coordinates), rating)
    }

    #[test]
    fn test_compose_prefers_nearby_over_higher_rating() {
        let endpoints = vec![
            RouteEndpoint::new("Start", c(0.0, 0.0)),
            RouteEndpoint::new("End", c(10.0, 0.0)),
        ];
        let catalog = BusinessCatalog::new(vec![
            restaurant("Q", c(5.0, 5.0), 4.5),
            restaurant("P", c(5.0, 0.1), 4.0),
        ]);

        let itinerary = composer()
            .compose(&endpoints, &StopPlan::default_plan(), &catalog)
            .unwrap();

        assert_eq!(itinerary.stops.len(), 1);
        assert_eq!(itinerary.stops[0].business.name, "P");
        assert_eq!(itinerary.stops[0].order_in_itinerary, 1);

        let total = itinerary.total_distance_km.unwrap().as_km();
        assert!((total - 1106.0).abs() < 5.0, "got {}", total);
    }

    #[test]
    fn test_compose_empty_catalog() {
        let endpoints = vec![
            RouteEndpoint::new("Start", c(0.0, 0.0)),
            RouteEndpoint::new("End", c(0.0, 1.0)),
        ];
        let empty = BusinessCatalog::default();
        let itinerary = composer()
            .compose(&endpoints, &StopPlan::default_plan(), &empty)
            .unwrap();

        assert!(itinerary.stops.is_empty());
        assert_eq!(itinerary.skipped_slots.len(), 1);
        assert!(itinerary.total_distance_km.is_some());
    }

    #[test]
    fn test_compose_requires_an_endpoint() {
        let empty = BusinessCatalog::default();
        let result = composer().compose(&[], &StopPlan::default_plan(), &empty);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_compose_start_only_has_no_total() {
        let endpoints = vec![RouteEndpoint::new("Start", c(1.0, 1.0))];
        let catalog = BusinessCatalog::new(vec![restaurant("R", c(1.01, 1.01), 4.0)]);

        let itinerary = composer()
            .compose(&endpoints, &StopPlan::default_plan(), &catalog)
            .unwrap();
        assert!(itinerary.end.is_none());
        assert!(itinerary.total_distance_km.is_none());
        assert_eq!(itinerary.stops.len(), 1);
    }

    #[test]
    fn test_compose_uses_first_and_last_endpoint() {
        let endpoints = vec![
            RouteEndpoint::new("A", c(0.0, 0.0)),
            RouteEndpoint::new("B", c(0.0, 50.0)),
            RouteEndpoint::new("C", c(0.0, 1.0)),
        ];
        let plan = StopPlan::new(vec![StopRequest::new("hotel")]);

        let itinerary = composer()
            .compose(&endpoints, &plan, &BusinessCatalog::default())
            .unwrap();
        assert_eq!(itinerary.end.unwrap().name, "C");
        assert!(itinerary.total_distance_km.unwrap().as_km() < 120.0);
    }

    fn locations() -> LocationIndex {
        LocationIndex::from_locations(vec![
            Location::new("a", "A", c(0.0, 0.0)),
            Location::new("b", "B", c(10.0, 10.0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_rank_by_location_and_join() {
        let catalog = BusinessCatalog::new(vec![
            Business::new("x", "X", "addr", "hotel", Some(c(1.0, 1.0)), 4.0),
            Business::new("y", "Y", "addr", "hotel", Some(c(9.0, 9.0)), 5.0),
            Business::new("z", "Z", "addr", "restaurant", Some(c(0.5, 0.5)), 3.0),
        ]);

        let composer = composer();
        let rankings = composer
            .rank_by_location(&locations(), &catalog, &OptimizationRequest::default())
            .unwrap();

        let request = vec![
            DestinationRequest::new(
                "A",
                &[CategoryBucket::Hotel, CategoryBucket::Entertainment],
            ),
            DestinationRequest::new("Nowhere", &[CategoryBucket::Hotel]),
        ];
        let result = composer.recommend_destinations(&request, &rankings);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].categories.len(), 2);
        let hotels = &result[0].categories[&CategoryBucket::Hotel];
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].name, "X");
        let entertainment = &result[0].categories[&CategoryBucket::Entertainment];
        assert!(entertainment.is_empty());

        assert_eq!(result[1].name, "Nowhere");
        assert!(result[1].categories[&CategoryBucket::Hotel].is_empty());
    }

    #[test]
    fn test_rank_by_location_rejects_empty_snapshots() {
        let composer = composer();
        let empty_locations = LocationIndex::from_locations(Vec::new()).unwrap();
        let catalog = BusinessCatalog::new(vec![restaurant("r", c(0.0, 0.0), 3.0)]);

        let optimization = OptimizationRequest::default();

        assert!(matches!(
            composer.rank_by_location(&empty_locations, &catalog, &optimization),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            composer.rank_by_location(&locations(), &BusinessCatalog::default(), &optimization),
            Err(AppError::Validation(_))
        ));
    }
}
