use std::time::Instant;

use axum::extract::MatchedPath;
use axum::http::{HeaderName, HeaderValue, Method, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, histogram};
use tracing::info;

const REQUEST_ID: &str = "x-request-id";

/// A per-request trace identifier used for support and debugging.
#[derive(Debug, Clone)]
pub struct TraceId(pub String);

/// Tags the request with a trace id, then records a structured log line and
/// request metrics once the response is ready.
pub async fn observe(mut req: Request<axum::body::Body>, next: Next) -> Response {
    // Step 1: Reuse a client-provided id or generate a new one.
    let trace_id = req
        .headers()
        .get(REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    req.extensions_mut().insert(TraceId(trace_id.clone()));

    // Step 2: Capture request metadata; the route template keeps labels bounded.
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let path = req.uri().path().to_string();
    let start = Instant::now();

    // Step 3: Run the request.
    let mut response = next.run(req).await;

    // Step 4: Echo the trace id.
    if let Ok(value) = HeaderValue::from_str(&trace_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID), value);
    }

    // Step 5: Emit metrics and the structured log entry.
    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();
    let method_label = method_label(&method);
    let status_label = status_class(status);
    counter!(
        "http_requests_total",
        "method" => method_label,
        "route" => route.clone(),
        "status" => status_label
    )
    .increment(1);
    histogram!(
        "http_request_duration_ms",
        "method" => method_label,
        "route" => route.clone(),
        "status" => status_label
    )
    .record(latency_ms as f64);
    info!(
        trace_id = %trace_id,
        method = %method,
        route = %route,
        path = %path,
        status,
        latency_ms,
        "http_request"
    );

    response
}

fn method_label(method: &Method) -> &'static str {
    match method.as_str() {
        "GET" => "GET",
        "POST" => "POST",
        "DELETE" => "DELETE",
        "HEAD" => "HEAD",
        "OPTIONS" => "OPTIONS",
        _ => "OTHER",
    }
}

fn status_class(status: u16) -> &'static str {
    match status {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
