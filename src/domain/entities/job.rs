use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::domain::entities::link::Link;
use crate::domain::entities::pagination::PaginationQueryParameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Process,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusCode {
    Accepted,
    Running,
    Successful,
    Failed,
    Dismissed,
}

impl StatusCode {
    pub const ALL: [StatusCode; 5] = [
        StatusCode::Accepted,
        StatusCode::Running,
        StatusCode::Successful,
        StatusCode::Failed,
        StatusCode::Dismissed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Accepted => "accepted",
            StatusCode::Running => "running",
            StatusCode::Successful => "successful",
            StatusCode::Failed => "failed",
            StatusCode::Dismissed => "dismissed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == raw)
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            StatusCode::Successful | StatusCode::Failed | StatusCode::Dismissed
        )
    }

    /// Jobs in these states expose a `results` link.
    pub fn has_results(self) -> bool {
        matches!(self, StatusCode::Successful | StatusCode::Failed)
    }
}

/// Status information of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusInfo {
    #[serde(rename = "jobID")]
    pub job_id: String,
    #[serde(rename = "processID", default, skip_serializing_if = "Option::is_none")]
    pub process_id: Option<String>,
    #[serde(rename = "type")]
    pub r#type: JobType,
    pub status: StatusCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub created: Option<OffsetDateTime>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub started: Option<OffsetDateTime>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub finished: Option<OffsetDateTime>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub updated: Option<OffsetDateTime>,
    /// Percentage in `0..=100`; larger values are rejected on deserialization.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_progress"
    )]
    #[schema(minimum = 0, maximum = 100)]
    pub progress: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    /// Backend-specific members, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StatusInfo {
    pub fn new(job_id: impl Into<String>, status: StatusCode) -> Self {
        Self {
            job_id: job_id.into(),
            process_id: None,
            r#type: JobType::Process,
            status,
            message: None,
            created: None,
            started: None,
            finished: None,
            updated: None,
            progress: None,
            links: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_process_id(mut self, process_id: impl Into<String>) -> Self {
        self.process_id = Some(process_id.into());
        self
    }
}

fn deserialize_progress<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<u8>::deserialize(deserializer)? {
        Some(progress) if progress > 100 => Err(de::Error::custom(format!(
            "progress must be between 0 and 100, got {progress}"
        ))),
        progress => Ok(progress),
    }
}

/// A page of jobs.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct JobList {
    pub jobs: Vec<StatusInfo>,
    pub links: Vec<Link>,
    #[serde(skip)]
    pub pagination: Option<PaginationQueryParameters>,
}

impl JobList {
    pub fn new(jobs: Vec<StatusInfo>) -> Self {
        Self {
            jobs,
            links: Vec::new(),
            pagination: None,
        }
    }

    pub fn with_pagination(mut self, pagination: PaginationQueryParameters) -> Self {
        self.pagination = Some(pagination);
        self
    }
}
