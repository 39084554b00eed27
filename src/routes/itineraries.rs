use crate::error::{AppError, Result};
use crate::models::request::{ItineraryRequest, ItineraryResponse, QueryRequest};
use crate::models::{Itinerary, StopPlan};
use crate::services::interpreter::interpret_query;
use crate::services::itinerary_composer::render;
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

fn respond(itinerary: Itinerary) -> Json<ItineraryResponse> {
    let rendered = render(&itinerary);
    Json(ItineraryResponse {
        itinerary,
        rendered,
    })
}

/// POST /itineraries
/// Free-form itinerary from explicit endpoints and a stop plan
pub async fn create_itinerary(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ItineraryRequest>,
) -> Result<Json<ItineraryResponse>> {
    let endpoints = request.endpoints().map_err(AppError::InvalidRequest)?;
    let plan = StopPlan::from_value_or_default(request.stop_plan);

    tracing::info!(
        endpoints = endpoints.len(),
        stops = plan.stops.len(),
        "Itinerary request"
    );

    let itinerary = state.composer.compose(&endpoints, &plan, &state.catalog)?;
    Ok(respond(itinerary))
}

/// POST /itineraries/query
/// Free-form itinerary from a free-text trip description
pub async fn create_itinerary_from_query(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<ItineraryResponse>> {
    request.validate().map_err(AppError::InvalidRequest)?;

    let interpreter = state
        .interpreter
        .as_ref()
        .ok_or(AppError::InterpreterUnavailable)?;

    tracing::info!(query_len = request.query.len(), "Itinerary query request");

    let interpreted =
        interpret_query(interpreter.as_ref(), &request.query, &state.locations).await?;
    let itinerary = state.composer.compose(
        &interpreted.route.endpoints,
        &interpreted.plan,
        &state.catalog,
    )?;
    Ok(respond(itinerary))
}
