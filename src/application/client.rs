// Backend contract: one method per OGC API - Processes endpoint.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::execute::{Execute, Results};
use crate::domain::entities::job::{JobList, StatusCode, StatusInfo};
use crate::domain::entities::process::{ProcessDescription, ProcessList};

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 10_000;

/// Errors a backend reports; each one maps to an OGC exception response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("process `{process_id}` not found")]
    NoSuchProcess { process_id: String },
    #[error("job `{job_id}` not found")]
    NoSuchJob { job_id: String },
    #[error("results of job `{job_id}` are not ready")]
    ResultsNotReady { job_id: String },
    #[error("job `{job_id}` failed: {detail}")]
    JobResultsFailed { job_id: String, detail: String },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("backend error: {0}")]
    Backend(String),
}

/// Query of `GET /processes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessListQuery {
    pub limit: u32,
    /// Every query parameter not recognized above, typically the fragments
    /// the backend emitted as pagination cursors.
    pub cursor: BTreeMap<String, String>,
}

impl Default for ProcessListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            cursor: BTreeMap::new(),
        }
    }
}

/// Query of `GET /jobs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListQuery {
    pub process_ids: Vec<String>,
    pub statuses: Vec<StatusCode>,
    pub limit: u32,
    pub cursor: BTreeMap<String, String>,
}

impl Default for JobListQuery {
    fn default() -> Self {
        Self {
            process_ids: Vec::new(),
            statuses: Vec::new(),
            limit: DEFAULT_LIMIT,
            cursor: BTreeMap::new(),
        }
    }
}

/// Operations a backend implements to be served over OGC API - Processes.
///
/// Returned objects carry no links; the HTTP layer attaches them. List
/// responses may carry `pagination` cursors, which become `next`/`prev` links.
#[async_trait]
pub trait ProcessesClient: Send + Sync {
    /// `GET /processes`
    async fn get_processes(&self, query: ProcessListQuery) -> Result<ProcessList, ClientError>;
    /// `GET /processes/{process_id}`
    async fn get_process(&self, process_id: &str) -> Result<ProcessDescription, ClientError>;
    /// `POST /processes/{process_id}/execution`
    async fn post_process_execution(
        &self,
        process_id: &str,
        execute: Execute,
    ) -> Result<StatusInfo, ClientError>;
    /// `GET /jobs`
    async fn get_jobs(&self, query: JobListQuery) -> Result<JobList, ClientError>;
    /// `GET /jobs/{job_id}`
    async fn get_job(&self, job_id: &str) -> Result<StatusInfo, ClientError>;
    /// `GET /jobs/{job_id}/results`
    async fn get_job_results(&self, job_id: &str) -> Result<Results, ClientError>;
    /// `DELETE /jobs/{job_id}`
    async fn delete_job(&self, job_id: &str) -> Result<StatusInfo, ClientError>;
}
