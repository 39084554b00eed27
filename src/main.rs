use axum::Router;
use odysseum::config::Config;
use odysseum::services::interpreter::{ChatInterpreter, IntentInterpreter};
use odysseum::services::itinerary_composer::ItineraryComposer;
use odysseum::snapshot::{load_snapshots, JsonSnapshotSource};
use odysseum::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "odysseum=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting Odysseum recommendation server");
    tracing::info!("Configuration loaded successfully");

    // Snapshots are read once and shared read-only
    tracing::info!(
        locations = %config.locations_path,
        businesses = %config.businesses_path,
        "Loading snapshots..."
    );
    let source = JsonSnapshotSource::new(&config.locations_path, &config.businesses_path)
        .with_normalized_categories(config.normalize_categories);
    let snapshots = load_snapshots(&source).await?;

    let interpreter: Option<Arc<dyn IntentInterpreter>> = match config.interpreter.clone() {
        Some(interpreter_config) => {
            tracing::info!(
                model = %interpreter_config.model,
                "Free-text query interpreter enabled"
            );
            Some(Arc::new(ChatInterpreter::new(interpreter_config)))
        }
        None => {
            tracing::info!("INTERPRETER_ENDPOINT not configured. Free-text queries disabled.");
            None
        }
    };

    let composer = ItineraryComposer::new(config.recommendation.clone());
    let state = Arc::new(AppState::new(snapshots, composer, interpreter));

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", odysseum::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
