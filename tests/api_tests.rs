use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use odysseum::config::RecommendationConfig;
use odysseum::models::{LocationIndex, StopPlan};
use odysseum::services::itinerary_composer::ItineraryComposer;
use odysseum::services::interpreter::{
    parse_route_intent, parse_stop_plan, IntentInterpreter, ParseError, RouteIntent,
};
use odysseum::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

mod common;

/// Interpreter that replays canned model output
struct ScriptedInterpreter {
    route: &'static str,
    stops: &'static str,
}

#[async_trait]
impl IntentInterpreter for ScriptedInterpreter {
    async fn interpret_route(
        &self,
        _query: &str,
        locations: &LocationIndex,
    ) -> Result<RouteIntent, ParseError> {
        parse_route_intent(self.route, locations)
    }

    async fn interpret_stops(
        &self,
        _query: &str,
        _route: &RouteIntent,
    ) -> Result<StopPlan, ParseError> {
        parse_stop_plan(self.stops)
    }
}

fn setup_test_app(interpreter: Option<Arc<dyn IntentInterpreter>>) -> axum::Router {
    let state = Arc::new(AppState::new(
        common::test_snapshots(),
        common::test_composer(),
        interpreter,
    ));
    odysseum::routes::create_router(state)
}

fn setup_test_app_with_config(config: RecommendationConfig) -> axum::Router {
    let state = Arc::new(AppState::new(
        common::test_snapshots(),
        ItineraryComposer::new(config),
        None,
    ));
    odysseum::routes::create_router(state)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = setup_test_app(None);

    let request = Request::builder()
        .uri("/debug/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["checks"]["locations"], 3);
    assert_eq!(json["checks"]["businesses"], 10);
    assert_eq!(json["checks"]["interpreter"]["enabled"], false);
}

#[tokio::test]
async fn test_recommendations_endpoint() {
    let app = setup_test_app(None);

    let request = post_json(
        "/recommendations",
        json!({
            "destinations": [
                {"name": "Lahore", "stops": [{"category": "restaurant"}, {"category": "hotel"}]},
                {"name": "Atlantis", "stops": [{"category": "hotel"}]}
            ],
            "optimization": {"criterion": "rating", "top_n": 1}
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    let lahore = &json["destinations"][0];
    assert_eq!(lahore["name"], "Lahore");
    let restaurants = lahore["categories"]["restaurant"].as_array().unwrap();
    assert_eq!(restaurants.len(), 1);
    assert_eq!(restaurants[0]["name"], "Andaaz");
    let hotels = &lahore["categories"]["hotel"];
    assert_eq!(hotels[0]["name"], "Pearl Continental");

    let unknown = &json["destinations"][1];
    let unknown_hotels = unknown["categories"]["hotel"].as_array().unwrap();
    assert!(unknown_hotels.is_empty());
}

#[tokio::test]
async fn test_recommendations_use_configured_default_top_n() {
    let body = json!({
        "destinations": [{"name": "Lahore", "stops": [{"category": "restaurant"}]}]
    });

    let app = setup_test_app(None);
    let response = app
        .oneshot(post_json("/recommendations", body.clone()))
        .await
        .unwrap();
    let json = read_json(response).await;
    let restaurants = json["destinations"][0]["categories"]["restaurant"]
        .as_array()
        .unwrap();
    assert_eq!(restaurants.len(), 2);

    let app = setup_test_app_with_config(RecommendationConfig {
        default_top_n: 1,
        ..RecommendationConfig::default()
    });
    let response = app
        .oneshot(post_json("/recommendations", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    let restaurants = json["destinations"][0]["categories"]["restaurant"]
        .as_array()
        .unwrap();
    assert_eq!(restaurants.len(), 1);
    assert_eq!(restaurants[0]["name"], "Andaaz");
}

#[tokio::test]
async fn test_recommendations_unknown_criterion_ranks_by_rating() {
    let app = setup_test_app(None);

    let request = post_json(
        "/recommendations",
        json!({
            "destinations": [{"name": "Lahore", "stops": [{"category": "restaurant"}]}],
            "optimization": {"criterion": "cheapest"}
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    let restaurants = &json["destinations"][0]["categories"]["restaurant"];
    assert_eq!(restaurants[0]["name"], "Andaaz");
}

#[tokio::test]
async fn test_recommendations_validation() {
    let app = setup_test_app(None);

    let request = post_json("/recommendations", json!({"destinations": []}));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = post_json(
        "/recommendations",
        json!({
            "destinations": [{"name": "Lahore", "stops": []}],
            "optimization": {"top_n": 500}
        }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = read_json(response).await;
    assert!(json["message"].as_str().unwrap().contains("top_n"));
}

#[tokio::test]
async fn test_itinerary_endpoint() {
    let app = setup_test_app(None);

    let request = post_json(
        "/itineraries",
        json!({
            "endpoints": [
                {"name": "Lahore", "coordinates": [31.52, 74.35]},
                {"name": "Islamabad", "coordinates": [33.68, 73.04]}
            ],
            "stop_plan": {"number_of_stops": 1, "stops": [{"category": "hotel"}]}
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    let stops = json["itinerary"]["stops"].as_array().unwrap();
    assert_eq!(stops.len(), 1);
    assert_eq!(stops[0]["name"], "Serena");
    assert_eq!(stops[0]["order_in_itinerary"], 1);
    let total_km = json["itinerary"]["total_distance_km"].as_f64().unwrap();
    assert!(total_km > 250.0);
    assert!(json["rendered"]
        .as_str()
        .unwrap()
        .starts_with("Journey from Lahore to Islamabad"));
}

#[tokio::test]
async fn test_itinerary_endpoint_with_malformed_plan() {
    let app = setup_test_app(None);

    let request = post_json(
        "/itineraries",
        json!({
            "endpoints": [{"name": "Lahore", "coordinates": [31.52, 74.35]}],
            "stop_plan": "three stops please"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    let stops = json["itinerary"]["stops"].as_array().unwrap();
    assert_eq!(stops.len(), 1);
    assert_eq!(stops[0]["category"], "Restaurant");
    assert!(json["itinerary"].get("end").is_none());
}

#[tokio::test]
async fn test_itinerary_endpoint_rejects_bad_endpoints() {
    let app = setup_test_app(None);

    let request = post_json("/itineraries", json!({"endpoints": []}));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let request = post_json(
        "/itineraries",
        json!({"endpoints": [{"name": "Nowhere", "coordinates": [123.0, 0.0]}]}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_query_endpoint_without_interpreter() {
    let app = setup_test_app(None);

    let request = post_json("/itineraries/query", json!({"query": "Lahore to Murree"}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_query_endpoint_with_interpreter() {
    let interpreter = ScriptedInterpreter {
        route: "```json\n{\"optimization\": \"rating\", \"locations\": {\"[Islamabad]\": [33.68, 73.04], \"[Murree]\": [33.9, 73.39]}}\n```",
        stops: "```json\n{\"number_of_stops\": 2, \"stops\": [{\"category\": \"Entertainment\"}, {\"category\": \"Hotel\"}]}\n```",
    };
    let app = setup_test_app(Some(Arc::new(interpreter)));

    let request = post_json(
        "/itineraries/query",
        json!({"query": "Day trip from Islamabad to Murree, see something fun then find a hotel"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["itinerary"]["start"]["name"], "Islamabad");
    assert_eq!(json["itinerary"]["end"]["name"], "Murree");

    let names: Vec<&str> = json["itinerary"]["stops"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names[0], "Lok Virsa");
    assert_eq!(names.len(), 2);
}

#[tokio::test]
async fn test_query_endpoint_unusable_route() {
    let interpreter = ScriptedInterpreter {
        route: "I am not sure where you want to go.",
        stops: "{}",
    };
    let app = setup_test_app(Some(Arc::new(interpreter)));

    let request = post_json("/itineraries/query", json!({"query": "somewhere nice"}));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let request = post_json("/itineraries/query", json!({"query": "   "}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
