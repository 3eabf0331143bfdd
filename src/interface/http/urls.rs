use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Uri, header};
use axum::response::Response;

use crate::domain::value_objects::request_urls::RequestUrls;
use crate::interface::http::problem::{TYPE_BLANK, problem};
use crate::interface::http::state::AppState;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Resolves the API base URL: the configured public URL, else the `Host` the
/// client used.
pub fn base_url(public_base_url: Option<&str>, headers: &HeaderMap, uri: &Uri) -> String {
    if let Some(configured) = public_base_url {
        return configured.to_string();
    }
    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim())
        .filter(|v| *v == "http" || *v == "https")
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_else(|| "localhost".to_string());
    format!("{scheme}://{host}/")
}

#[async_trait]
impl FromRequestParts<AppState> for RequestUrls {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let base = base_url(
            state.ctx.settings.server.public_base_url.as_deref(),
            &parts.headers,
            &parts.uri,
        );
        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        RequestUrls::new(&base, path_and_query).map_err(|err| {
            problem(
                StatusCode::BAD_REQUEST,
                TYPE_BLANK,
                "invalid request URL",
                Some(err.to_string()),
                None,
            )
        })
    }
}
