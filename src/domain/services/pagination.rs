// Pagination cursor codec: turns backend cursors into request-relative links.

use url::Url;

use crate::domain::entities::link::Link;
use crate::domain::entities::pagination::PaginationQueryParameters;
use crate::domain::services::links::{PageDirection, page_link_for};

/// Returns the `next` link followed by the `prev` link, skipping directions
/// whose cursor is absent or empty.
pub fn pagination_links(current_url: &Url, pagination: Option<&PaginationQueryParameters>) -> Vec<Link> {
    let Some(pagination) = pagination else {
        return Vec::new();
    };

    [PageDirection::Next, PageDirection::Prev]
        .into_iter()
        .filter(|direction| {
            direction
                .cursor(pagination)
                .is_some_and(|cursor| !cursor.is_empty())
        })
        .map(|direction| page_link_for(current_url, direction, pagination))
        .collect()
}
