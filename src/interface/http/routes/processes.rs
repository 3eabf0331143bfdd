// HTTP routes: process listing, description and execution.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use metrics::counter;
use tracing::info;

use crate::application::client::ClientError;
use crate::domain::entities::execute::Execute;
use crate::domain::services::assembler::{
    assemble_created_job, assemble_process_description, assemble_process_list, monitor_href,
};
use crate::domain::value_objects::request_urls::RequestUrls;
use crate::interface::http::dto::query::process_list_query;
use crate::interface::http::problem::client_error;
use crate::interface::http::routes::{RouteName, success_status};
use crate::interface::http::state::AppState;

/// Lists the processes offered by the backend.
pub async fn get_processes(
    State(state): State<AppState>,
    urls: RequestUrls,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    // Step 1: Parse the query.
    let query = match process_list_query(params) {
        Ok(query) => query,
        Err(err) => return client_error(err, &urls),
    };

    // Step 2: Fetch the page and link it.
    match state.ctx.client.get_processes(query).await {
        Ok(mut list) => {
            assemble_process_list(&mut list, &urls);
            (success_status(RouteName::GetProcesses), Json(list)).into_response()
        }
        Err(err) => client_error(err, &urls),
    }
}

pub async fn get_process(
    State(state): State<AppState>,
    urls: RequestUrls,
    Path(process_id): Path<String>,
) -> Response {
    match state.ctx.client.get_process(&process_id).await {
        Ok(mut process) => {
            assemble_process_description(&mut process, &urls);
            (success_status(RouteName::GetProcess), Json(process)).into_response()
        }
        Err(err) => client_error(err, &urls),
    }
}

/// Submits an execution request and answers with the created job.
pub async fn post_process_execution(
    State(state): State<AppState>,
    urls: RequestUrls,
    Path(process_id): Path<String>,
    payload: Result<Json<Execute>, JsonRejection>,
) -> Response {
    // Step 1: Reject malformed execution requests as OGC exceptions.
    let execute = match payload {
        Ok(Json(execute)) => execute,
        Err(rejection) => {
            return client_error(ClientError::InvalidParameter(rejection.body_text()), &urls);
        }
    };

    // Step 2: Hand the request to the backend.
    let mut job = match state
        .ctx
        .client
        .post_process_execution(&process_id, execute)
        .await
    {
        Ok(job) => job,
        Err(err) => return client_error(err, &urls),
    };

    // Step 3: Link the job and point Location at its status resource.
    assemble_created_job(&mut job, &urls);
    let location = monitor_href(&job, &urls);
    counter!("jobs_submitted_total", "process_id" => process_id.clone()).increment(1);
    info!(job_id = %job.job_id, process_id = %process_id, "job_submitted");

    let mut response =
        (success_status(RouteName::PostProcessExecution), Json(job)).into_response();
    if let Ok(value) = HeaderValue::from_str(&location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}
