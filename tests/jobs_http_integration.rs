use axum::body::Body;
use axum::body::to_bytes;
use axum::http::{Request, StatusCode, header};
use ogc_api_processes::application::context::AppContext;
use ogc_api_processes::config::Settings;
use ogc_api_processes::domain::entities::execute::Results;
use ogc_api_processes::domain::entities::process::{ProcessDescription, ProcessSummary};
use ogc_api_processes::infrastructure::memory::InMemoryClient;
use ogc_api_processes::interface::http;
use ogc_api_processes::interface::http::state::AppState;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::util::ServiceExt;

const NO_SUCH_JOB: &str = "http://www.opengis.net/def/exceptions/ogcapi-processes-1/1.0/no-such-job";
const RESULT_NOT_READY: &str =
    "http://www.opengis.net/def/exceptions/ogcapi-processes-1/1.0/result-not-ready";

fn setup_state() -> (AppState, Arc<InMemoryClient>) {
    let client = Arc::new(InMemoryClient::new(vec![
        ProcessDescription::new(ProcessSummary::new("echo", "1.0")),
        ProcessDescription::new(ProcessSummary::new("buffer", "1.0")),
    ]));
    let state = AppState {
        ctx: Arc::new(AppContext::new(
            client.clone(),
            Settings::local(Some("http://x/")),
        )),
        metrics: None,
    };
    (state, client)
}

async fn response_json(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn execute_request(process_id: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/processes/{process_id}/execution"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn submit(state: &AppState, process_id: &str) -> String {
    let response = http::app(state.clone())
        .oneshot(execute_request(process_id, json!({"inputs": {"message": "hi"}})))
        .await
        .unwrap();
    let json = response_json(response).await;
    json["jobID"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn given_execution_request_when_submitted_should_create_job_with_location() {
    let (state, client) = setup_state();

    let response = http::app(state)
        .oneshot(execute_request("echo", json!({"inputs": {"message": "hi"}})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let json = response_json(response).await;
    let job_id = json["jobID"].as_str().unwrap();
    assert_eq!(location, format!("http://x/jobs/{job_id}"));
    assert_eq!(json["status"], "accepted");
    assert_eq!(json["processID"], "echo");
    assert_eq!(json["type"], "process");
    assert_eq!(
        json["links"],
        json!([
            {
                "href": "http://x/processes/echo/execution",
                "rel": "self",
                "type": "application/json"
            },
            {
                "href": location,
                "rel": "monitor",
                "type": "application/json",
                "title": "job status info"
            }
        ])
    );
    let stored = client.execution_request(job_id).unwrap();
    assert_eq!(stored.inputs.unwrap()["message"], "hi");
}

#[tokio::test]
async fn given_malformed_body_when_submitted_should_return_bad_request_problem() {
    let (state, _) = setup_state();

    let response = http::app(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/processes/echo/execution")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );
}

#[tokio::test]
async fn given_unknown_process_when_submitted_should_return_no_such_process() {
    let (state, _) = setup_state();

    let response = http::app(state)
        .oneshot(execute_request("nope", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = response_json(response).await;
    assert_eq!(
        json["type"],
        "http://www.opengis.net/def/exceptions/ogcapi-processes-1/1.0/no-such-process"
    );
}

#[tokio::test]
async fn given_running_job_when_status_requested_should_link_self_only() {
    let (state, client) = setup_state();
    let job_id = submit(&state, "echo").await;
    client.record_progress(&job_id, 40).unwrap();

    let response = http::app(state)
        .oneshot(request("GET", &format!("/jobs/{job_id}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "running");
    assert_eq!(json["progress"], 40);
    assert_eq!(
        json["links"],
        json!([{
            "href": format!("http://x/jobs/{job_id}"),
            "rel": "self",
            "type": "application/json"
        }])
    );
}

#[tokio::test]
async fn given_unfinished_job_when_results_requested_should_return_not_ready() {
    let (state, _) = setup_state();
    let job_id = submit(&state, "echo").await;

    let response = http::app(state)
        .oneshot(request("GET", &format!("/jobs/{job_id}/results")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = response_json(response).await;
    assert_eq!(json["type"], RESULT_NOT_READY);
    assert_eq!(json["instance"], format!("http://x/jobs/{job_id}/results"));
}

#[tokio::test]
async fn given_successful_job_when_queried_should_link_and_serve_results() {
    let (state, client) = setup_state();
    let job_id = submit(&state, "echo").await;
    let results = Results::from([("echo".to_string(), json!("hi"))]);
    client.record_success(&job_id, results).unwrap();

    let status = http::app(state.clone())
        .oneshot(request("GET", &format!("/jobs/{job_id}")))
        .await
        .unwrap();
    let status = response_json(status).await;
    assert_eq!(status["status"], "successful");
    assert_eq!(
        status["links"][1],
        json!({"href": format!("http://x/jobs/{job_id}/results"), "rel": "results"})
    );

    let response = http::app(state)
        .oneshot(request("GET", &format!("/jobs/{job_id}/results")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({"echo": "hi"}));
}

#[tokio::test]
async fn given_failed_job_when_results_requested_should_return_server_error_problem() {
    let (state, client) = setup_state();
    let job_id = submit(&state, "echo").await;
    client.record_failure(&job_id, "division by zero").unwrap();

    let response = http::app(state)
        .oneshot(request("GET", &format!("/jobs/{job_id}/results")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert_eq!(json["type"], "about:blank");
    assert!(json["detail"].as_str().unwrap().contains("division by zero"));
}

#[tokio::test]
async fn given_job_when_deleted_twice_should_dismiss_then_report_missing() {
    let (state, _) = setup_state();
    let job_id = submit(&state, "echo").await;

    let first = http::app(state.clone())
        .oneshot(request("DELETE", &format!("/jobs/{job_id}")))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let json = response_json(first).await;
    assert_eq!(json["status"], "dismissed");
    assert_eq!(json["links"].as_array().unwrap().len(), 1);

    let second = http::app(state)
        .oneshot(request("DELETE", &format!("/jobs/{job_id}")))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    assert_eq!(response_json(second).await["type"], NO_SUCH_JOB);
}

#[tokio::test]
async fn given_unknown_job_when_status_requested_should_return_no_such_job() {
    let (state, _) = setup_state();

    let response = http::app(state)
        .oneshot(request("GET", "/jobs/missing"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = response_json(response).await;
    assert_eq!(json["type"], NO_SUCH_JOB);
    assert_eq!(json["detail"], "job `missing` not found");
}

#[tokio::test]
async fn given_jobs_when_listed_with_limit_should_page_and_monitor_each_job() {
    let (state, _) = setup_state();
    for _ in 0..3 {
        submit(&state, "echo").await;
    }

    let response = http::app(state)
        .oneshot(request("GET", "/jobs?limit=2"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    let jobs = json["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 2);
    for job in jobs {
        assert_eq!(job["links"][0]["rel"], "monitor");
        assert_eq!(job["links"][0]["title"], "job status info");
    }
    assert_eq!(
        json["links"],
        json!([
            {
                "href": "http://x/jobs?limit=2",
                "rel": "self",
                "type": "application/json",
                "title": "list of submitted jobs"
            },
            {"href": "http://x/jobs?limit=2&offset=2", "rel": "next"}
        ])
    );
}

#[tokio::test]
async fn given_filters_when_jobs_listed_should_match_process_and_status() {
    let (state, client) = setup_state();
    let echo_job = submit(&state, "echo").await;
    submit(&state, "echo").await;
    submit(&state, "buffer").await;
    client
        .record_success(&echo_job, Results::new())
        .unwrap();

    let response = http::app(state.clone())
        .oneshot(request("GET", "/jobs?processID=echo&status=successful"))
        .await
        .unwrap();
    let json = response_json(response).await;
    let jobs = json["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["jobID"], echo_job.as_str());
    assert_eq!(jobs[0]["links"][1]["rel"], "results");

    let response = http::app(state)
        .oneshot(request("GET", "/jobs?processID=echo,buffer&status=accepted"))
        .await
        .unwrap();
    let json = response_json(response).await;
    assert_eq!(json["jobs"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn given_unknown_status_filter_when_jobs_listed_should_return_bad_request() {
    let (state, _) = setup_state();

    let response = http::app(state)
        .oneshot(request("GET", "/jobs?status=paused"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["type"], "about:blank");
}

#[tokio::test]
async fn given_offset_past_end_when_jobs_listed_should_link_back_to_last_page() {
    let (state, _) = setup_state();
    for _ in 0..3 {
        submit(&state, "echo").await;
    }

    let response = http::app(state)
        .oneshot(request("GET", "/jobs?limit=2&offset=100"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["jobs"], json!([]));
    let links = json["links"].as_array().unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[1]["rel"], "prev");
    assert_eq!(links[1]["href"], "http://x/jobs?limit=2&offset=1");
}
