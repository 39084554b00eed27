pub mod category_ranker;
pub mod interpreter;
pub mod itinerary_composer;
pub mod location_assigner;
pub mod route_distance;
