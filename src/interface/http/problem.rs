use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::application::client::ClientError;
use crate::domain::value_objects::request_urls::RequestUrls;

pub const TYPE_NO_SUCH_PROCESS: &str =
    "http://www.opengis.net/def/exceptions/ogcapi-processes-1/1.0/no-such-process";
pub const TYPE_NO_SUCH_JOB: &str =
    "http://www.opengis.net/def/exceptions/ogcapi-processes-1/1.0/no-such-job";
pub const TYPE_RESULT_NOT_READY: &str =
    "http://www.opengis.net/def/exceptions/ogcapi-processes-1/1.0/result-not-ready";
pub const TYPE_BLANK: &str = "about:blank";

/// OGC API exception payload (RFC 7807 Problem Details).
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemDetails {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub r#type: String,
    /// A short, human-readable summary of the problem type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The HTTP status code for this occurrence.
    pub status: u16,
    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// The URL of the request that failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

/// Build a Problem Details response with the correct content-type.
pub fn problem(
    status: StatusCode,
    problem_type: &str,
    title: &str,
    detail: Option<String>,
    instance: Option<String>,
) -> Response {
    // Step 1: Build the problem payload.
    let payload = ProblemDetails {
        r#type: problem_type.to_string(),
        title: Some(title.to_string()),
        status: status.as_u16(),
        detail,
        instance,
    };

    // Step 2: Convert to an HTTP response with JSON body.
    let mut response = (status, Json(payload)).into_response();

    // Step 3: Ensure RFC 7807 content type.
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/problem+json"),
    );

    response
}

/// Status, type and title of the exception a client error maps to.
///
/// Only the three OGC exceptions carry a type URI. `type` must be a URI
/// reference, so a failed job's results answer `about:blank` instead of the
/// free-text `"job results failed"`.
pub fn classify(err: &ClientError) -> (StatusCode, &'static str, &'static str) {
    match err {
        ClientError::NoSuchProcess { .. } => {
            (StatusCode::NOT_FOUND, TYPE_NO_SUCH_PROCESS, "process not found")
        }
        ClientError::NoSuchJob { .. } => (StatusCode::NOT_FOUND, TYPE_NO_SUCH_JOB, "job not found"),
        ClientError::ResultsNotReady { .. } => (
            StatusCode::NOT_FOUND,
            TYPE_RESULT_NOT_READY,
            "job results not ready",
        ),
        ClientError::JobResultsFailed { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, TYPE_BLANK, "job failed")
        }
        ClientError::InvalidParameter(_) => {
            (StatusCode::BAD_REQUEST, TYPE_BLANK, "invalid parameter")
        }
        ClientError::Backend(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            TYPE_BLANK,
            "internal server error",
        ),
    }
}

/// Maps a backend error to its OGC exception response for the current request.
pub fn client_error(err: ClientError, urls: &RequestUrls) -> Response {
    let (status, problem_type, title) = classify(&err);
    let instance = urls.current_url().to_string();
    match &err {
        ClientError::Backend(_) => error!(instance = %instance, error = %err, "backend_error"),
        _ if status.is_server_error() => warn!(instance = %instance, error = %err, "job_failed"),
        _ => {}
    }
    problem(status, problem_type, title, Some(err.to_string()), Some(instance))
}
