use crate::constants::DEFAULT_STOP_CATEGORY;
use crate::models::{Business, Coordinates, DistanceKm};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A named point a trip starts or ends at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteEndpoint {
    pub name: String,
    pub coordinates: Coordinates,
}

impl RouteEndpoint {
    pub fn new(name: impl Into<String>, coordinates: Coordinates) -> Self {
        RouteEndpoint {
            name: name.into(),
            coordinates,
        }
    }
}

/// One requested stop slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StopRequest {
    pub category: String,
}

impl StopRequest {
    pub fn new(category: impl Into<String>) -> Self {
        StopRequest {
            category: category.into(),
        }
    }
}

/// Ordered stop slots for a free-form itinerary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StopPlan {
    pub number_of_stops: usize,
    pub stops: Vec<StopRequest>,
}

#[derive(Deserialize)]
struct RawStopPlan {
    #[serde(default)]
    number_of_stops: Option<u64>,
    stops: Vec<StopRequest>,
}

impl StopPlan {
    pub fn new(stops: Vec<StopRequest>) -> Self {
        StopPlan {
            number_of_stops: stops.len(),
            stops,
        }
    }

    /// Plan used whenever an external plan cannot be validated: one restaurant stop.
    pub fn default_plan() -> Self {
        StopPlan::new(vec![StopRequest::new(DEFAULT_STOP_CATEGORY)])
    }

    /// Validate the shape of an untyped plan payload.
    ///
    /// A JSON string value is decoded once more, since interpreters commonly
    /// return the plan as an encoded string.
    pub fn from_value(value: Value) -> Result<Self, String> {
        let value = match value {
            Value::String(encoded) => serde_json::from_str(&encoded)
                .map_err(|e| format!("Stop plan string is not JSON: {}", e))?,
            other => other,
        };

        let raw: RawStopPlan =
            serde_json::from_value(value).map_err(|e| format!("Malformed stop plan: {}", e))?;

        if let Some(declared) = raw.number_of_stops {
            if declared as usize != raw.stops.len() {
                tracing::debug!(
                    declared,
                    listed = raw.stops.len(),
                    "Stop plan count mismatch, using listed stops"
                );
            }
        }

        Ok(StopPlan::new(raw.stops))
    }

    pub fn from_value_or_default(value: Value) -> Self {
        Self::from_value(value).unwrap_or_else(|e| {
            tracing::warn!("{}. Using default stop plan", e);
            Self::default_plan()
        })
    }
}

/// A selected business placed in an itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    #[serde(flatten)]
    pub business: Business,
    pub order_in_itinerary: u32,
    /// Geodesic distance from the itinerary start, absent if it could not be computed
    pub distance_from_start_km: Option<DistanceKm>,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    UnknownCategory,
    NoCandidates,
    AllCandidatesUsed,
}

/// A requested slot that produced no stop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkippedSlot {
    /// Zero-based position in the stop plan
    pub slot: usize,
    pub category: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: Uuid,
    pub start: RouteEndpoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<RouteEndpoint>,
    pub stops: Vec<Stop>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skipped_slots: Vec<SkippedSlot>,
    /// Start-to-end geodesic distance; absent without an end point
    pub total_distance_km: Option<DistanceKm>,
}

impl Itinerary {
    pub fn new(start: RouteEndpoint, end: Option<RouteEndpoint>) -> Self {
        Itinerary {
            id: Uuid::new_v4(),
            start,
            end,
            stops: Vec::new(),
            skipped_slots: Vec::new(),
            total_distance_km: None,
        }
    }
}
