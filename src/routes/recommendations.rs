use crate::error::{AppError, Result};
use crate::models::request::{RecommendationRequest, RecommendationResponse};
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /recommendations
/// Ranked businesses per requested destination and category
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>> {
    request.validate().map_err(AppError::InvalidRequest)?;

    tracing::info!(
        destinations = request.destinations.len(),
        criterion = ?request.optimization.criterion,
        top_n = request
            .optimization
            .top_n_or(state.composer.config().default_top_n),
        "Recommendation request"
    );

    let rankings = state.composer.rank_by_location(
        &state.locations,
        &state.catalog,
        &request.optimization,
    )?;
    let destinations = state
        .composer
        .recommend_destinations(&request.destinations, &rankings);

    Ok(Json(RecommendationResponse { destinations }))
}
