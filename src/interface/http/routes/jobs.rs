// HTTP routes: job listing, status, dismissal and results.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};

use crate::domain::services::assembler::{assemble_job, assemble_job_list};
use crate::domain::value_objects::request_urls::RequestUrls;
use crate::interface::http::dto::query::job_list_query;
use crate::interface::http::problem::client_error;
use crate::interface::http::routes::{RouteName, success_status};
use crate::interface::http::state::AppState;

/// Lists submitted jobs, filtered by process and status.
pub async fn get_jobs(
    State(state): State<AppState>,
    urls: RequestUrls,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    // Step 1: Parse filters, limit and cursor.
    let query = match job_list_query(params) {
        Ok(query) => query,
        Err(err) => return client_error(err, &urls),
    };

    // Step 2: Fetch the page and link every job.
    match state.ctx.client.get_jobs(query).await {
        Ok(mut list) => {
            assemble_job_list(&mut list, &urls);
            (success_status(RouteName::GetJobs), Json(list)).into_response()
        }
        Err(err) => client_error(err, &urls),
    }
}

pub async fn get_job(
    State(state): State<AppState>,
    urls: RequestUrls,
    Path(job_id): Path<String>,
) -> Response {
    match state.ctx.client.get_job(&job_id).await {
        Ok(mut job) => {
            assemble_job(&mut job, &urls);
            (success_status(RouteName::GetJob), Json(job)).into_response()
        }
        Err(err) => client_error(err, &urls),
    }
}

/// Dismisses a job and returns its final status.
pub async fn delete_job(
    State(state): State<AppState>,
    urls: RequestUrls,
    Path(job_id): Path<String>,
) -> Response {
    match state.ctx.client.delete_job(&job_id).await {
        Ok(mut job) => {
            assemble_job(&mut job, &urls);
            (success_status(RouteName::DeleteJob), Json(job)).into_response()
        }
        Err(err) => client_error(err, &urls),
    }
}

pub async fn get_job_results(
    State(state): State<AppState>,
    urls: RequestUrls,
    Path(job_id): Path<String>,
) -> Response {
    match state.ctx.client.get_job_results(&job_id).await {
        Ok(results) => (success_status(RouteName::GetJobResults), Json(results)).into_response(),
        Err(err) => client_error(err, &urls),
    }
}
