pub mod dto;
pub mod openapi;
pub mod problem;
pub mod routes;
pub mod state;
pub mod trace;
pub mod urls;

use axum::Router;

use crate::interface::http::state::AppState;

/// Builds the full HTTP application: OGC API routes plus operational endpoints.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .merge(routes::health::router())
        .merge(routes::metrics::router())
        .layer(axum::middleware::from_fn(trace::observe))
        .with_state(state)
}
