use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::interface::http::state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: String,
    version: &'static str,
}

/// Builds the liveness route.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: state.ctx.settings.observability.service_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
