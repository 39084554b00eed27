pub mod business;
pub mod category;
pub mod coordinates;
pub mod distance;
pub mod itinerary;
pub mod location;
pub mod request;

pub use business::{Business, BusinessCatalog};
pub use category::{CategoryBucket, OptimizationCriterion};
pub use coordinates::{CoordinateKey, Coordinates};
pub use distance::DistanceKm;
pub use itinerary::{
    Itinerary, RouteEndpoint, SkipReason, SkippedSlot, Stop, StopPlan, StopRequest,
};
pub use location::{Location, LocationIndex};
