// Request/Response types for API endpoints

use crate::constants::MAX_TOP_N;
use crate::models::{
    Business, CategoryBucket, Coordinates, Itinerary, OptimizationCriterion, RouteEndpoint,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Endpoint as supplied by callers: coordinates ordered `[lat, lon]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointInput {
    pub name: String,
    pub coordinates: Vec<f64>,
}

impl EndpointInput {
    pub fn to_endpoint(&self) -> Result<RouteEndpoint, String> {
        let coordinates = Coordinates::from_lat_lon(&self.coordinates)
            .map_err(|e| format!("Endpoint '{}': {}", self.name, e))?;
        Ok(RouteEndpoint::new(self.name.clone(), coordinates))
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OptimizationRequest {
    #[serde(default)]
    pub criterion: OptimizationCriterion,
    /// Falls back to the configured default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_n: Option<usize>,
}

impl OptimizationRequest {
    pub fn top_n_or(&self, default_top_n: usize) -> usize {
        self.top_n.unwrap_or(default_top_n)
    }

    pub fn validate(&self) -> Result<(), String> {
        match self.top_n {
            Some(n) if n == 0 || n > MAX_TOP_N => {
                Err(format!("top_n must be between 1 and {}", MAX_TOP_N))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationStop {
    pub category: CategoryBucket,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationRequest {
    pub name: String,
    #[serde(default)]
    pub stops: Vec<DestinationStop>,
}

impl DestinationRequest {
    pub fn new(name: impl Into<String>, categories: &[CategoryBucket]) -> Self {
        DestinationRequest {
            name: name.into(),
            stops: categories
                .iter()
                .map(|&category| DestinationStop { category })
                .collect(),
        }
    }
}

/// Structured lookup request: ranked businesses per destination and category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub destinations: Vec<DestinationRequest>,
    #[serde(default)]
    pub optimization: OptimizationRequest,
}

impl RecommendationRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.destinations.is_empty() {
            return Err("At least one destination is required".to_string());
        }
        self.optimization.validate()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DestinationRecommendation {
    pub name: String,
    pub categories: BTreeMap<CategoryBucket, Vec<Business>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub destinations: Vec<DestinationRecommendation>,
}

/// Free-form itinerary request with an explicit stop plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryRequest {
    pub endpoints: Vec<EndpointInput>,
    /// Untyped plan; validated with fallback to the default plan
    #[serde(default)]
    pub stop_plan: Value,
}

impl ItineraryRequest {
    pub fn endpoints(&self) -> Result<Vec<RouteEndpoint>, String> {
        self.endpoints
            .iter()
            .map(EndpointInput::to_endpoint)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

impl QueryRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.query.trim().is_empty() {
            return Err("query must not be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItineraryResponse {
    pub itinerary: Itinerary,
    pub rendered: String,
}
