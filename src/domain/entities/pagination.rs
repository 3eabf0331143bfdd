use std::collections::BTreeMap;

/// Query-string fragments identifying the neighbouring pages of a collection.
///
/// Produced by the backend that knows how to paginate its store. The keys and
/// values are opaque to this crate: they are merged into the current request
/// query to build `next`/`prev` links and handed back to the backend when a
/// client follows one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationQueryParameters {
    pub next: Option<BTreeMap<String, String>>,
    pub prev: Option<BTreeMap<String, String>>,
}

impl PaginationQueryParameters {
    pub fn with_next<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.next = Some(collect_pairs(pairs));
        self
    }

    pub fn with_prev<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.prev = Some(collect_pairs(pairs));
        self
    }
}

fn collect_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> BTreeMap<String, String>
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_builders_when_called_should_fill_both_directions() {
        let params = PaginationQueryParameters::default()
            .with_next([("offset", "20")])
            .with_prev([("offset", "0")]);

        assert_eq!(params.next.unwrap().get("offset").map(String::as_str), Some("20"));
        assert_eq!(params.prev.unwrap().get("offset").map(String::as_str), Some("0"));
    }
}
