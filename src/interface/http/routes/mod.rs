// Route table: every OGC API - Processes endpoint, its HTTP binding and the
// response model it serves. The router and the OpenAPI document are both
// derived from it.

pub mod health;
pub mod jobs;
pub mod landing;
pub mod metrics;
pub mod processes;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{MethodFilter, MethodRouter, on};

use crate::interface::http::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteName {
    GetLandingPage,
    GetConformance,
    GetOpenApi,
    GetProcesses,
    GetProcess,
    PostProcessExecution,
    GetJobs,
    GetJob,
    DeleteJob,
    GetJobResults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Delete,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Delete => "delete",
        }
    }

    fn filter(self) -> MethodFilter {
        match self {
            Verb::Get => MethodFilter::GET,
            Verb::Post => MethodFilter::POST,
            Verb::Delete => MethodFilter::DELETE,
        }
    }
}

/// Schema of a successful response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseModel {
    LandingPage,
    ConfClass,
    OpenApi,
    ProcessList,
    ProcessDescription,
    StatusInfo,
    JobList,
    Results,
}

impl ResponseModel {
    pub fn schema_name(self) -> &'static str {
        match self {
            ResponseModel::LandingPage => "LandingPage",
            ResponseModel::ConfClass => "ConfClass",
            ResponseModel::OpenApi => "OpenApi",
            ResponseModel::ProcessList => "ProcessList",
            ResponseModel::ProcessDescription => "ProcessDescription",
            ResponseModel::StatusInfo => "StatusInfo",
            ResponseModel::JobList => "JobList",
            ResponseModel::Results => "Results",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RouteSpec {
    pub name: RouteName,
    pub verb: Verb,
    /// OpenAPI-style template, e.g. `/jobs/{job_id}`.
    pub path: &'static str,
    pub status: u16,
    pub response_model: ResponseModel,
    pub summary: &'static str,
    pub operation_id: &'static str,
    pub tag: &'static str,
}

impl RouteSpec {
    /// The path template in axum syntax (`/jobs/:job_id`).
    pub fn router_path(&self) -> String {
        self.path
            .split('/')
            .map(|segment| match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(param) => format!(":{param}"),
                None => segment.to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Names of the path parameters, in order.
    pub fn path_params(&self) -> Vec<&'static str> {
        self.path
            .split('/')
            .filter_map(|segment| segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')))
            .collect()
    }
}

pub const ROUTES: &[RouteSpec] = &[
    RouteSpec {
        name: RouteName::GetLandingPage,
        verb: Verb::Get,
        path: "/",
        status: 200,
        response_model: ResponseModel::LandingPage,
        summary: "landing page of this API",
        operation_id: "getLandingPage",
        tag: "Capabilities",
    },
    RouteSpec {
        name: RouteName::GetConformance,
        verb: Verb::Get,
        path: "/conformance",
        status: 200,
        response_model: ResponseModel::ConfClass,
        summary: "information about standards that this API conforms to",
        operation_id: "getConformanceClasses",
        tag: "Capabilities",
    },
    RouteSpec {
        name: RouteName::GetOpenApi,
        verb: Verb::Get,
        path: "/openapi.json",
        status: 200,
        response_model: ResponseModel::OpenApi,
        summary: "OpenAPI definition of this API",
        operation_id: "getOpenApi",
        tag: "Capabilities",
    },
    RouteSpec {
        name: RouteName::GetProcesses,
        verb: Verb::Get,
        path: "/processes",
        status: 200,
        response_model: ResponseModel::ProcessList,
        summary: "retrieve the list of available processes",
        operation_id: "getProcesses",
        tag: "Processes",
    },
    RouteSpec {
        name: RouteName::GetProcess,
        verb: Verb::Get,
        path: "/processes/{process_id}",
        status: 200,
        response_model: ResponseModel::ProcessDescription,
        summary: "retrieve the description of a process",
        operation_id: "getProcessDescription",
        tag: "Processes",
    },
    RouteSpec {
        name: RouteName::PostProcessExecution,
        verb: Verb::Post,
        path: "/processes/{process_id}/execution",
        status: 201,
        response_model: ResponseModel::StatusInfo,
        summary: "execute a process",
        operation_id: "execute",
        tag: "Processes",
    },
    RouteSpec {
        name: RouteName::GetJobs,
        verb: Verb::Get,
        path: "/jobs",
        status: 200,
        response_model: ResponseModel::JobList,
        summary: "retrieve the list of submitted jobs",
        operation_id: "getJobs",
        tag: "Jobs",
    },
    RouteSpec {
        name: RouteName::GetJob,
        verb: Verb::Get,
        path: "/jobs/{job_id}",
        status: 200,
        response_model: ResponseModel::StatusInfo,
        summary: "retrieve the status of a job",
        operation_id: "getStatus",
        tag: "Jobs",
    },
    RouteSpec {
        name: RouteName::DeleteJob,
        verb: Verb::Delete,
        path: "/jobs/{job_id}",
        status: 200,
        response_model: ResponseModel::StatusInfo,
        summary: "cancel a job execution, remove a finished job",
        operation_id: "dismiss",
        tag: "Jobs",
    },
    RouteSpec {
        name: RouteName::GetJobResults,
        verb: Verb::Get,
        path: "/jobs/{job_id}/results",
        status: 200,
        response_model: ResponseModel::Results,
        summary: "retrieve the results of a job",
        operation_id: "getResult",
        tag: "Jobs",
    },
];

/// Success status declared for a route.
pub fn success_status(name: RouteName) -> StatusCode {
    ROUTES
        .iter()
        .find(|route| route.name == name)
        .and_then(|route| StatusCode::from_u16(route.status).ok())
        .unwrap_or(StatusCode::OK)
}

fn bind(route: &RouteSpec) -> MethodRouter<AppState> {
    let filter = route.verb.filter();
    match route.name {
        RouteName::GetLandingPage => on(filter, landing::get_landing_page),
        RouteName::GetConformance => on(filter, landing::get_conformance),
        RouteName::GetOpenApi => on(filter, landing::get_openapi),
        RouteName::GetProcesses => on(filter, processes::get_processes),
        RouteName::GetProcess => on(filter, processes::get_process),
        RouteName::PostProcessExecution => on(filter, processes::post_process_execution),
        RouteName::GetJobs => on(filter, jobs::get_jobs),
        RouteName::GetJob => on(filter, jobs::get_job),
        RouteName::DeleteJob => on(filter, jobs::delete_job),
        RouteName::GetJobResults => on(filter, jobs::get_job_results),
    }
}

/// Builds the OGC API - Processes routes from the route table.
pub fn router() -> Router<AppState> {
    ROUTES
        .iter()
        .fold(Router::new(), |router, route| router.route(&route.router_path(), bind(route)))
}
