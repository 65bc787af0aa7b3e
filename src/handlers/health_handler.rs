use axum::{extract::State, response::Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().timestamp(),
        "service": "gateway-dashboard",
        "version": env!("CARGO_PKG_VERSION"),
        "source": state.source.kind()
    }))
}
