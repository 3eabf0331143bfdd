// Response assembler: attaches links to backend resources before serialization.
//
// Objects coming from the backend are trusted to be schema-valid; nothing here
// validates or fails.

use crate::domain::entities::job::{JobList, StatusInfo};
use crate::domain::entities::landing::LandingPage;
use crate::domain::entities::link::{Link, MEDIA_TYPE_JSON};
use crate::domain::entities::process::{ProcessDescription, ProcessList};
use crate::domain::services::links::{
    execute_link, job_links, landing_page_links, process_link, resource_href, self_link,
};
use crate::domain::services::pagination::pagination_links;
use crate::domain::value_objects::request_urls::RequestUrls;

pub fn assemble_landing_page(
    title: Option<String>,
    description: Option<String>,
    urls: &RequestUrls,
) -> LandingPage {
    LandingPage {
        title,
        description,
        links: landing_page_links(urls.base_url(), urls.current_url().as_str()),
    }
}

pub fn assemble_process_list(list: &mut ProcessList, urls: &RequestUrls) {
    for process in &mut list.processes {
        process.links = vec![process_link(urls.base_url(), &process.id)];
    }
    let mut links = vec![self_link(
        &resource_href(urls.base_url(), "processes/"),
        None,
        Some(MEDIA_TYPE_JSON),
    )];
    links.extend(pagination_links(urls.current_url(), list.pagination.as_ref()));
    list.links = links;
}

pub fn assemble_process_description(process: &mut ProcessDescription, urls: &RequestUrls) {
    let id = process.summary.id.clone();
    process.summary.links = vec![
        Link::new(
            resource_href(urls.base_url(), &format!("processes/{id}")),
            "self",
        )
        .with_type(MEDIA_TYPE_JSON),
        execute_link(urls.base_url(), &id),
    ];
}

/// Links of a job that has just been submitted: the execution request itself
/// and the job status resource to poll.
pub fn assemble_created_job(job: &mut StatusInfo, urls: &RequestUrls) {
    job.links = vec![
        self_link(urls.current_url().as_str(), None, Some(MEDIA_TYPE_JSON)),
        Link::new(monitor_href(job, urls), "monitor")
            .with_type(MEDIA_TYPE_JSON)
            .with_title("job status info"),
    ];
}

/// Absolute URL of the job status resource.
pub fn monitor_href(job: &StatusInfo, urls: &RequestUrls) -> String {
    resource_href(urls.base_url(), &format!("jobs/{}", job.job_id))
}

pub fn assemble_job_list(list: &mut JobList, urls: &RequestUrls) {
    for job in &mut list.jobs {
        job.links = job_links(job, urls.base_url(), true);
    }
    let mut links = vec![self_link(
        urls.current_url().as_str(),
        Some("list of submitted jobs"),
        Some(MEDIA_TYPE_JSON),
    )];
    links.extend(pagination_links(urls.current_url(), list.pagination.as_ref()));
    list.links = links;
}

pub fn assemble_job(job: &mut StatusInfo, urls: &RequestUrls) {
    job.links = job_links(job, urls.base_url(), false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::job::StatusCode;
    use crate::domain::entities::pagination::PaginationQueryParameters;
    use crate::domain::entities::process::ProcessSummary;
    use serde_json::json;

    fn urls(path_and_query: &str) -> RequestUrls {
        RequestUrls::new("http://x/", path_and_query).unwrap()
    }

    #[test]
    fn given_process_list_when_assembled_should_link_each_process_and_envelope() {
        let mut list = ProcessList::new(vec![ProcessSummary::new("abc", "1.0")]);

        assemble_process_list(&mut list, &urls("/processes"));

        let value = serde_json::to_value(&list).unwrap();
        assert_eq!(
            value["processes"][0]["links"],
            json!([{
                "href": "http://x/processes/abc",
                "rel": "process",
                "type": "application/json",
                "title": "process description"
            }])
        );
        assert_eq!(
            value["links"],
            json!([{"href": "http://x/processes/", "rel": "self", "type": "application/json"}])
        );
    }

    #[test]
    fn given_paginated_process_list_when_assembled_should_append_next_then_prev() {
        let mut list = ProcessList::new(vec![ProcessSummary::new("abc", "1.0")]).with_pagination(
            PaginationQueryParameters::default()
                .with_next([("offset", "3")])
                .with_prev([("offset", "1")]),
        );

        assemble_process_list(&mut list, &urls("/processes?limit=2&offset=2"));

        let rels: Vec<_> = list.links.iter().map(|l| l.rel.as_str()).collect();
        assert_eq!(rels, vec!["self", "next", "prev"]);
        assert_eq!(list.links[1].href, "http://x/processes?limit=2&offset=3");
        assert_eq!(list.links[2].href, "http://x/processes?limit=2&offset=1");
    }

    #[test]
    fn given_process_description_when_assembled_should_link_self_and_execution() {
        let mut process = ProcessDescription::new(ProcessSummary::new("abc", "1.0"));

        assemble_process_description(&mut process, &urls("/processes/abc"));

        let links = &process.summary.links;
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].rel, "self");
        assert_eq!(links[0].href, "http://x/processes/abc");
        assert_eq!(links[1].rel, "execute");
        assert_eq!(links[1].href, "http://x/processes/abc/execution");
    }

    #[test]
    fn given_job_list_when_assembled_should_use_monitor_links() {
        let mut list = JobList::new(vec![
            StatusInfo::new("1", StatusCode::Running),
            StatusInfo::new("2", StatusCode::Successful),
        ]);

        assemble_job_list(&mut list, &urls("/jobs"));

        assert_eq!(list.jobs[0].links.len(), 1);
        assert_eq!(list.jobs[0].links[0].rel, "monitor");
        assert_eq!(list.jobs[1].links.len(), 2);
        assert_eq!(list.jobs[1].links[1].href, "http://x/jobs/2/results");
        assert_eq!(list.links.len(), 1);
        assert_eq!(list.links[0].href, "http://x/jobs");
        assert_eq!(list.links[0].title.as_deref(), Some("list of submitted jobs"));
    }

    #[test]
    fn given_single_job_when_assembled_should_use_self_link() {
        let mut job = StatusInfo::new("9", StatusCode::Failed);

        assemble_job(&mut job, &urls("/jobs/9"));

        assert_eq!(job.links[0].rel, "self");
        assert_eq!(job.links[0].href, "http://x/jobs/9");
        assert_eq!(job.links[1].rel, "results");
    }

    #[test]
    fn given_created_job_when_assembled_should_link_request_and_monitor() {
        let mut job = StatusInfo::new("5", StatusCode::Accepted);
        let urls = urls("/processes/abc/execution");

        assemble_created_job(&mut job, &urls);

        assert_eq!(job.links[0].rel, "self");
        assert_eq!(job.links[0].href, "http://x/processes/abc/execution");
        assert_eq!(job.links[1].rel, "monitor");
        assert_eq!(job.links[1].href, monitor_href(&job, &urls));
        assert_eq!(monitor_href(&job, &urls), "http://x/jobs/5");
    }

    #[test]
    fn given_urls_when_landing_page_assembled_should_carry_title_and_links() {
        let page = assemble_landing_page(Some("Demo".to_string()), None, &urls("/"));

        assert_eq!(page.title.as_deref(), Some("Demo"));
        assert_eq!(page.links[0].href, "http://x/");
        assert_eq!(page.links.len(), 5);
    }
}
