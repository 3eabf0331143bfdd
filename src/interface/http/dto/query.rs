// Query-string parsing for the list endpoints.
//
// Raw pairs are taken in arrival order so repeated keys survive; anything not
// recognized is kept as cursor material for the backend.

use std::collections::BTreeMap;

use crate::application::client::{
    ClientError, DEFAULT_LIMIT, JobListQuery, MAX_LIMIT, ProcessListQuery,
};
use crate::domain::entities::job::StatusCode;

const LIMIT: &str = "limit";
const PROCESS_ID: &str = "processID";
const STATUS: &str = "status";

pub fn process_list_query(pairs: Vec<(String, String)>) -> Result<ProcessListQuery, ClientError> {
    let mut query = ProcessListQuery::default();
    for (key, value) in pairs {
        match key.as_str() {
            LIMIT => query.limit = parse_limit(&value)?,
            _ => {
                query.cursor.entry(key).or_insert(value);
            }
        }
    }
    Ok(query)
}

pub fn job_list_query(pairs: Vec<(String, String)>) -> Result<JobListQuery, ClientError> {
    let mut query = JobListQuery::default();
    let mut cursor = BTreeMap::new();
    for (key, value) in pairs {
        match key.as_str() {
            LIMIT => query.limit = parse_limit(&value)?,
            PROCESS_ID => query.process_ids.extend(split_list(&value).map(str::to_string)),
            STATUS => {
                for raw in split_list(&value) {
                    let status = StatusCode::parse(raw).ok_or_else(|| {
                        ClientError::InvalidParameter(format!("unknown job status `{raw}`"))
                    })?;
                    if !query.statuses.contains(&status) {
                        query.statuses.push(status);
                    }
                }
            }
            _ => {
                cursor.entry(key).or_insert(value);
            }
        }
    }
    query.cursor = cursor;
    Ok(query)
}

fn parse_limit(raw: &str) -> Result<u32, ClientError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(DEFAULT_LIMIT);
    }
    match raw.parse::<u32>() {
        Ok(limit) if (1..=MAX_LIMIT).contains(&limit) => Ok(limit),
        _ => Err(ClientError::InvalidParameter(format!(
            "`limit` must be an integer between 1 and {MAX_LIMIT}, got `{raw}`"
        ))),
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|v| !v.is_empty())
}
