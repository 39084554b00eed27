pub mod debug;
pub mod itineraries;
pub mod recommendations;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/recommendations", post(recommendations::recommend))
        .route("/itineraries", post(itineraries::create_itinerary))
        .route(
            "/itineraries/query",
            post(itineraries::create_itinerary_from_query),
        )
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}
