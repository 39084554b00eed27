// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod snapshot;

// Re-export commonly used types
pub use error::{AppError, Result};

use models::{BusinessCatalog, LocationIndex};
use services::interpreter::IntentInterpreter;
use services::itinerary_composer::ItineraryComposer;
use snapshot::Snapshots;
use std::sync::Arc;

// App state for sharing across the application
pub struct AppState {
    pub locations: Arc<LocationIndex>,
    pub catalog: Arc<BusinessCatalog>,
    pub composer: ItineraryComposer,
    /// Absent when no interpreter endpoint is configured
    pub interpreter: Option<Arc<dyn IntentInterpreter>>,
}

impl AppState {
    pub fn new(
        snapshots: Snapshots,
        composer: ItineraryComposer,
        interpreter: Option<Arc<dyn IntentInterpreter>>,
    ) -> Self {
        AppState {
            locations: Arc::new(snapshots.locations),
            catalog: Arc::new(snapshots.catalog),
            composer,
            interpreter,
        }
    }
}
