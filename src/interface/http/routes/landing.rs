// HTTP routes: landing page, conformance declaration and API definition.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::domain::entities::landing::ConfClass;
use crate::domain::services::assembler::assemble_landing_page;
use crate::domain::value_objects::request_urls::RequestUrls;
use crate::interface::http::openapi::openapi_doc;
use crate::interface::http::state::AppState;

pub async fn get_landing_page(State(state): State<AppState>, urls: RequestUrls) -> Response {
    let api = &state.ctx.settings.api;
    let page = assemble_landing_page(
        Some(api.title.clone()),
        Some(api.description.clone()),
        &urls,
    );
    Json(page).into_response()
}

pub async fn get_conformance() -> Response {
    Json(ConfClass::default()).into_response()
}

pub async fn get_openapi(State(state): State<AppState>, urls: RequestUrls) -> Response {
    let api = &state.ctx.settings.api;
    Json(openapi_doc(&api.title, Some(api.description.as_str()), urls.base_url())).into_response()
}
