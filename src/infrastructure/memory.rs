// In-memory backend: a process catalog and job table kept in process memory.
// Offset-based pagination cursors; jobs only move when a caller records progress.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use time::OffsetDateTime;
use tracing::info;

use crate::application::client::{ClientError, JobListQuery, ProcessListQuery, ProcessesClient};
use crate::domain::entities::execute::{Execute, Results};
use crate::domain::entities::job::{JobList, StatusCode, StatusInfo};
use crate::domain::entities::pagination::PaginationQueryParameters;
use crate::domain::entities::process::{ProcessDescription, ProcessList};
use crate::domain::value_objects::ids::JobId;

const OFFSET_PARAM: &str = "offset";

#[derive(Debug, Clone)]
struct JobRecord {
    status: StatusInfo,
    execute: Execute,
    results: Option<Results>,
}

pub struct InMemoryClient {
    processes: Vec<ProcessDescription>,
    jobs: RwLock<Vec<JobRecord>>,
}

impl InMemoryClient {
    pub fn new(processes: Vec<ProcessDescription>) -> Self {
        Self {
            processes,
            jobs: RwLock::new(Vec::new()),
        }
    }

    /// Marks a job as running with the given progress percentage (capped at 100).
    pub fn record_progress(&self, job_id: &str, progress: u8) -> Result<StatusInfo, ClientError> {
        self.transition(job_id, |record, now| {
            if record.status.status == StatusCode::Accepted {
                record.status.started = Some(now);
            }
            record.status.status = StatusCode::Running;
            record.status.progress = Some(progress.min(100));
        })
    }

    /// Marks a job as successful and stores its results.
    pub fn record_success(&self, job_id: &str, results: Results) -> Result<StatusInfo, ClientError> {
        self.transition(job_id, |record, now| {
            record.status.status = StatusCode::Successful;
            record.status.progress = Some(100);
            record.status.finished = Some(now);
            record.status.message = Some("job completed".to_string());
            record.results = Some(results);
        })
    }

    /// Marks a job as failed with a human-readable reason.
    pub fn record_failure(&self, job_id: &str, reason: &str) -> Result<StatusInfo, ClientError> {
        self.transition(job_id, |record, now| {
            record.status.status = StatusCode::Failed;
            record.status.finished = Some(now);
            record.status.message = Some(reason.to_string());
        })
    }

    /// Returns the execution request a job was submitted with.
    pub fn execution_request(&self, job_id: &str) -> Result<Execute, ClientError> {
        let jobs = self.read_jobs()?;
        find(&jobs, job_id)
            .map(|record| record.execute.clone())
            .ok_or_else(|| no_such_job(job_id))
    }

    fn transition(
        &self,
        job_id: &str,
        apply: impl FnOnce(&mut JobRecord, OffsetDateTime),
    ) -> Result<StatusInfo, ClientError> {
        let mut jobs = self.write_jobs()?;
        let record = jobs
            .iter_mut()
            .find(|record| record.status.job_id == job_id)
            .ok_or_else(|| no_such_job(job_id))?;
        if record.status.status.is_terminal() {
            return Err(ClientError::InvalidParameter(format!(
                "job `{job_id}` is already {}",
                record.status.status.as_str()
            )));
        }
        let now = OffsetDateTime::now_utc();
        apply(record, now);
        record.status.updated = Some(now);
        Ok(record.status.clone())
    }

    fn read_jobs(&self) -> Result<RwLockReadGuard<'_, Vec<JobRecord>>, ClientError> {
        self.jobs
            .read()
            .map_err(|_| ClientError::Backend("job table lock poisoned".to_string()))
    }

    fn write_jobs(&self) -> Result<RwLockWriteGuard<'_, Vec<JobRecord>>, ClientError> {
        self.jobs
            .write()
            .map_err(|_| ClientError::Backend("job table lock poisoned".to_string()))
    }
}

fn find<'a>(jobs: &'a [JobRecord], job_id: &str) -> Option<&'a JobRecord> {
    jobs.iter().find(|record| record.status.job_id == job_id)
}

fn no_such_job(job_id: &str) -> ClientError {
    ClientError::NoSuchJob {
        job_id: job_id.to_string(),
    }
}

/// Slices one page out of `items` and computes the neighbouring cursors.
fn paginate<T: Clone>(
    items: &[T],
    limit: u32,
    cursor: &BTreeMap<String, String>,
) -> Result<(Vec<T>, PaginationQueryParameters), ClientError> {
    let offset = match cursor.get(OFFSET_PARAM) {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| ClientError::InvalidParameter(format!("invalid offset `{raw}`")))?,
        None => 0,
    };
    let limit = limit as usize;
    let page: Vec<T> = items.iter().skip(offset).take(limit).cloned().collect();

    // Cursors past the end step back from the last item, never past it.
    let mut pagination = PaginationQueryParameters::default();
    let next = offset.saturating_add(limit);
    if next < items.len() {
        pagination = pagination.with_next([(OFFSET_PARAM, next.to_string())]);
    }
    if offset > 0 {
        let prev = offset.min(items.len()).saturating_sub(limit);
        pagination = pagination.with_prev([(OFFSET_PARAM, prev.to_string())]);
    }
    Ok((page, pagination))
}

#[async_trait]
impl ProcessesClient for InMemoryClient {
    async fn get_processes(&self, query: ProcessListQuery) -> Result<ProcessList, ClientError> {
        let summaries: Vec<_> = self.processes.iter().map(|p| p.summary.clone()).collect();
        let (page, pagination) = paginate(&summaries, query.limit, &query.cursor)?;
        Ok(ProcessList::new(page).with_pagination(pagination))
    }

    async fn get_process(&self, process_id: &str) -> Result<ProcessDescription, ClientError> {
        self.processes
            .iter()
            .find(|p| p.id() == process_id)
            .cloned()
            .ok_or_else(|| ClientError::NoSuchProcess {
                process_id: process_id.to_string(),
            })
    }

    async fn post_process_execution(
        &self,
        process_id: &str,
        execute: Execute,
    ) -> Result<StatusInfo, ClientError> {
        self.get_process(process_id).await?;

        let now = OffsetDateTime::now_utc();
        let mut status =
            StatusInfo::new(JobId::new().to_string(), StatusCode::Accepted).with_process_id(process_id);
        status.message = Some("job accepted".to_string());
        status.created = Some(now);
        status.updated = Some(now);
        status.progress = Some(0);

        self.write_jobs()?.push(JobRecord {
            status: status.clone(),
            execute,
            results: None,
        });
        info!(job_id = %status.job_id, process_id, "job_accepted");
        Ok(status)
    }

    async fn get_jobs(&self, query: JobListQuery) -> Result<JobList, ClientError> {
        let matching: Vec<StatusInfo> = self
            .read_jobs()?
            .iter()
            .map(|record| &record.status)
            .filter(|job| {
                query.process_ids.is_empty()
                    || job
                        .process_id
                        .as_ref()
                        .is_some_and(|id| query.process_ids.contains(id))
            })
            .filter(|job| query.statuses.is_empty() || query.statuses.contains(&job.status))
            .cloned()
            .collect();
        let (page, pagination) = paginate(&matching, query.limit, &query.cursor)?;
        Ok(JobList::new(page).with_pagination(pagination))
    }

    async fn get_job(&self, job_id: &str) -> Result<StatusInfo, ClientError> {
        let jobs = self.read_jobs()?;
        find(&jobs, job_id)
            .map(|record| record.status.clone())
            .ok_or_else(|| no_such_job(job_id))
    }

    async fn get_job_results(&self, job_id: &str) -> Result<Results, ClientError> {
        let jobs = self.read_jobs()?;
        let record = find(&jobs, job_id).ok_or_else(|| no_such_job(job_id))?;
        match record.status.status {
            StatusCode::Successful => Ok(record.results.clone().unwrap_or_default()),
            StatusCode::Failed => Err(ClientError::JobResultsFailed {
                job_id: job_id.to_string(),
                detail: record
                    .status
                    .message
                    .clone()
                    .unwrap_or_else(|| "job failed".to_string()),
            }),
            StatusCode::Dismissed => Err(no_such_job(job_id)),
            StatusCode::Accepted | StatusCode::Running => Err(ClientError::ResultsNotReady {
                job_id: job_id.to_string(),
            }),
        }
    }

    async fn delete_job(&self, job_id: &str) -> Result<StatusInfo, ClientError> {
        let mut jobs = self.write_jobs()?;
        let record = jobs
            .iter_mut()
            .find(|record| record.status.job_id == job_id)
            .ok_or_else(|| no_such_job(job_id))?;
        if record.status.status == StatusCode::Dismissed {
            return Err(no_such_job(job_id));
        }
        let now = OffsetDateTime::now_utc();
        record.status.status = StatusCode::Dismissed;
        record.status.message = Some("job dismissed".to_string());
        record.status.updated = Some(now);
        record.status.finished.get_or_insert(now);
        record.results = None;
        info!(job_id, "job_dismissed");
        Ok(record.status.clone())
    }
}
