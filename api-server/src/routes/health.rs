use crate::state::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/test", get(test))
        .route("/ready", get(ready))
}

async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn test() -> Json<Value> {
    Json(json!({ "message": "This is a test endpoint." }))
}

/// Readiness: whether the verification pipeline can take jobs.
async fn ready(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "model_loaded": state.verifier.is_ready() }))
}
