use crate::services::interpreter::INTERPRETER_VERSION;
use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Snapshot sizes and interpreter availability
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut status = json!({
        "status": "ok",
        "checks": {}
    });

    status["checks"]["locations"] = json!(state.locations.len());
    status["checks"]["businesses"] = json!(state.catalog.len());
    status["checks"]["located_businesses"] = json!(state.catalog.located_count());

    if state.locations.is_empty() || state.catalog.is_empty() {
        status["status"] = json!("degraded");
    }

    status["checks"]["interpreter"] = match &state.interpreter {
        Some(interpreter) => json!({"enabled": true, "version": interpreter.version()}),
        None => json!({"enabled": false, "version": INTERPRETER_VERSION}),
    };

    Json(status)
}
