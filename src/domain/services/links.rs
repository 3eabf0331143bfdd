// Link builder: pure constructors for the links attached to responses.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::domain::entities::job::StatusInfo;
use crate::domain::entities::link::{Link, MEDIA_TYPE_JSON, MEDIA_TYPE_OPENAPI};
use crate::domain::entities::pagination::PaginationQueryParameters;

pub const REL_CONFORMANCE: &str = "http://www.opengis.net/def/rel/ogc/1.0/conformance";
pub const REL_PROCESSES: &str = "http://www.opengis.net/def/rel/ogc/1.0/processes";
pub const REL_JOB_LIST: &str = "http://www.opengis.net/def/rel/ogc/1.0/job-list";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("invalid pagination direction `{direction}`: expected `next` or `prev`")]
    InvalidArgument { direction: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Next,
    Prev,
}

impl PageDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            PageDirection::Next => "next",
            PageDirection::Prev => "prev",
        }
    }

    /// Returns the cursor fragment stored for this direction, if any.
    pub fn cursor(self, pagination: &PaginationQueryParameters) -> Option<&BTreeMap<String, String>> {
        match self {
            PageDirection::Next => pagination.next.as_ref(),
            PageDirection::Prev => pagination.prev.as_ref(),
        }
    }
}

impl FromStr for PageDirection {
    type Err = LinkError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "next" => Ok(PageDirection::Next),
            "prev" => Ok(PageDirection::Prev),
            other => Err(LinkError::InvalidArgument {
                direction: other.to_string(),
            }),
        }
    }
}

/// Builds a `self` link pointing at the current request URL.
pub fn self_link(current_url: &str, title: Option<&str>, media_type: Option<&str>) -> Link {
    let mut link = Link::new(current_url, "self");
    if let Some(title) = title {
        link = link.with_title(title);
    }
    if let Some(media_type) = media_type {
        link = link.with_type(media_type);
    }
    link
}

/// Builds a `next`/`prev` link by overlaying the cursor fragment on the current query.
pub fn page_link(
    current_url: &Url,
    direction: &str,
    pagination: &PaginationQueryParameters,
) -> Result<Link, LinkError> {
    let direction = direction.parse::<PageDirection>()?;
    Ok(page_link_for(current_url, direction, pagination))
}

pub(crate) fn page_link_for(
    current_url: &Url,
    direction: PageDirection,
    pagination: &PaginationQueryParameters,
) -> Link {
    let mut url = current_url.clone();
    if let Some(cursor) = direction.cursor(pagination) {
        let pairs = overlay_query(current_url, cursor);
        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut()
                .clear()
                .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
    }
    Link::new(url.as_str(), direction.as_str())
}

// Keys of the cursor replace every value of the same key in the current query,
// at the position of its first occurrence; new keys go last.
fn overlay_query(current_url: &Url, cursor: &BTreeMap<String, String>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut overlaid = BTreeSet::new();
    for (key, value) in current_url.query_pairs() {
        match cursor.get(key.as_ref()) {
            Some(replacement) => {
                if overlaid.insert(key.to_string()) {
                    pairs.push((key.into_owned(), replacement.clone()));
                }
            }
            None => pairs.push((key.into_owned(), value.into_owned())),
        }
    }
    for (key, value) in cursor {
        if !overlaid.contains(key) {
            pairs.push((key.clone(), value.clone()));
        }
    }
    pairs
}

/// Joins a path relative to the API base URL.
pub fn resource_href(base_url: &str, path: &str) -> String {
    if base_url.ends_with('/') {
        format!("{base_url}{path}")
    } else {
        format!("{base_url}/{path}")
    }
}

/// Links attached to a job: a `self` (single job) or `monitor` (job list) link,
/// plus a `results` link once the job succeeded or failed.
pub fn job_links(job: &StatusInfo, base_url: &str, is_collection_context: bool) -> Vec<Link> {
    let job_href = resource_href(base_url, &format!("jobs/{}", job.job_id));
    let primary = if is_collection_context {
        Link::new(job_href.clone(), "monitor").with_title("job status info")
    } else {
        Link::new(job_href.clone(), "self")
    };
    let mut links = vec![primary.with_type(MEDIA_TYPE_JSON)];
    if job.status.has_results() {
        links.push(Link::new(format!("{job_href}/results"), "results"));
    }
    links
}

pub fn process_link(base_url: &str, process_id: &str) -> Link {
    Link::new(resource_href(base_url, &format!("processes/{process_id}")), "process")
        .with_type(MEDIA_TYPE_JSON)
        .with_title("process description")
}

pub fn execute_link(base_url: &str, process_id: &str) -> Link {
    Link::new(
        resource_href(base_url, &format!("processes/{process_id}/execution")),
        "execute",
    )
    .with_type(MEDIA_TYPE_JSON)
    .with_title("process execution")
}

pub fn landing_page_links(base_url: &str, current_url: &str) -> Vec<Link> {
    vec![
        self_link(current_url, Some("this document"), Some(MEDIA_TYPE_JSON)),
        Link::new(resource_href(base_url, "openapi.json"), "service-desc")
            .with_type(MEDIA_TYPE_OPENAPI)
            .with_title("OpenAPI service description"),
        Link::new(resource_href(base_url, "conformance"), REL_CONFORMANCE)
            .with_type(MEDIA_TYPE_JSON)
            .with_title("Conformance declaration"),
        Link::new(resource_href(base_url, "processes"), REL_PROCESSES)
            .with_type(MEDIA_TYPE_JSON)
            .with_title("Metadata about the processes"),
        Link::new(resource_href(base_url, "jobs"), REL_JOB_LIST)
            .with_type(MEDIA_TYPE_JSON)
            .with_title("The list of jobs"),
    ]
}
