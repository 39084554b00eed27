//! Free-text query interpretation.
//!
//! An interpreter turns a traveller's query into route endpoints, an
//! optimization criterion and a stop plan. Its output is untrusted text: every
//! response goes through the parsers here, and parse failures fall back to
//! defaults instead of failing the request, except for a route with no
//! recognisable endpoint.

mod chat;

use crate::error::AppError;
use crate::models::{Coordinates, LocationIndex, OptimizationCriterion, RouteEndpoint, StopPlan};
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use chat::ChatInterpreter;

/// Bumped whenever prompts or the response contract change.
pub const INTERPRETER_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct RouteIntent {
    pub criterion: OptimizationCriterion,
    /// Start first, then end; further entries are ignored downstream
    pub endpoints: Vec<RouteEndpoint>,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("interpreter returned an empty response")]
    Empty,

    #[error("response is not JSON: {0}")]
    NotJson(String),

    #[error("response has no usable '{0}'")]
    MissingField(&'static str),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("interpreter call failed: {0}")]
    Transport(String),
}

#[async_trait]
pub trait IntentInterpreter: Send + Sync {
    fn version(&self) -> u32 {
        INTERPRETER_VERSION
    }

    /// Pick route endpoints and an optimization criterion for `query`.
    async fn interpret_route(
        &self,
        query: &str,
        locations: &LocationIndex,
    ) -> Result<RouteIntent, ParseError>;

    /// Pick the ordered stop categories for `query` along `route`.
    async fn interpret_stops(
        &self,
        query: &str,
        route: &RouteIntent,
    ) -> Result<StopPlan, ParseError>;
}

/// Everything the free-form itinerary needs from a query.
#[derive(Debug, Clone)]
pub struct InterpretedQuery {
    pub route: RouteIntent,
    pub plan: StopPlan,
}

/// Run both interpretation steps, applying the documented defaults.
///
/// A failed stop plan becomes the default plan. A route without endpoints is
/// a validation error, and a transport failure on the route step is reported
/// as an interpreter error.
pub async fn interpret_query(
    interpreter: &dyn IntentInterpreter,
    query: &str,
    locations: &LocationIndex,
) -> crate::error::Result<InterpretedQuery> {
    let route = match interpreter.interpret_route(query, locations).await {
        Ok(route) => route,
        Err(ParseError::Transport(e)) => return Err(AppError::Interpreter(e)),
        Err(e) => {
            return Err(AppError::Validation(format!(
                "Could not determine route endpoints: {}",
                e
            )));
        }
    };

    let plan = interpreter
        .interpret_stops(query, &route)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(
                "Stop plan interpretation failed: {}. Using default stop plan",
                e
            );
            StopPlan::default_plan()
        });

    tracing::debug!(
        version = interpreter.version(),
        criterion = ?route.criterion,
        endpoints = route.endpoints.len(),
        stops = plan.stops.len(),
        "Interpreted query"
    );

    Ok(InterpretedQuery { route, plan })
}

/// Remove a ```json fenced block wrapper, if present, and surrounding whitespace.
pub fn clean_json_response(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Display form of a name that went through the interpreter wrapped in brackets.
pub fn strip_brackets(name: &str) -> &str {
    name.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim()
}

fn parse_json(raw: &str) -> Result<Value, ParseError> {
    let cleaned = clean_json_response(raw);
    if cleaned.is_empty() {
        return Err(ParseError::Empty);
    }
    serde_json::from_str(cleaned).map_err(|e| ParseError::NotJson(e.to_string()))
}

/// Resolve one named endpoint. Known location names use snapshot coordinates;
/// unknown names fall back to the interpreter's `[lat, lon]` pair.
fn resolve_endpoint(
    name: &str,
    value: Option<&Value>,
    locations: &LocationIndex,
) -> Option<RouteEndpoint> {
    let name = strip_brackets(name);
    if let Some(location) = locations.get(name) {
        let endpoint = RouteEndpoint::new(location.name.clone(), location.coordinates);
        return Some(endpoint);
    }

    let pair: Vec<f64> = value?
        .as_array()?
        .iter()
        .filter_map(Value::as_f64)
        .collect();

    match Coordinates::from_lat_lon(&pair) {
        Ok(coordinates) => Some(RouteEndpoint::new(name, coordinates)),
        Err(e) => {
            tracing::warn!(endpoint = %name, "Dropping interpreted endpoint: {}", e);
            None
        }
    }
}

/// Parse a route response of the form
/// `{"optimization": "rating", "locations": {"Name": [lat, lon], ...}}`.
///
/// `locations` may also be a plain list of names known to the index.
pub fn parse_route_intent(
    raw: &str,
    locations: &LocationIndex,
) -> Result<RouteIntent, ParseError> {
    let value = parse_json(raw)?;
    let object = value
        .as_object()
        .ok_or_else(|| ParseError::Malformed("expected a JSON object".to_string()))?;

    let criterion = match object.get("optimization") {
        Some(Value::String(s)) => OptimizationCriterion::parse_lenient(s),
        _ => OptimizationCriterion::default(),
    };

    let endpoints: Vec<RouteEndpoint> = match object.get("locations") {
        Some(Value::Object(named)) => named
            .iter()
            .filter_map(|(name, coords)| resolve_endpoint(name, Some(coords), locations))
            .collect(),
        Some(Value::Array(names)) => names
            .iter()
            .filter_map(Value::as_str)
            .filter_map(|name| resolve_endpoint(name, None, locations))
            .collect(),
        _ => Vec::new(),
    };

    if endpoints.is_empty() {
        return Err(ParseError::MissingField("locations"));
    }

    Ok(RouteIntent {
        criterion,
        endpoints,
    })
}

/// Parse a stop plan response; the shape is validated by [`StopPlan::from_value`].
pub fn parse_stop_plan(raw: &str) -> Result<StopPlan, ParseError> {
    let value = parse_json(raw)?;
    StopPlan::from_value(value).map_err(ParseError::Malformed)
}
