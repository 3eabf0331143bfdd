use url::Url;

/// The URLs of the request being answered, used to make every href absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUrls {
    base_url: String,
    current_url: Url,
}

impl RequestUrls {
    /// Builds the pair from the API base URL and the request path and query.
    ///
    /// The base URL is normalized to end with `/`; `path_and_query` is resolved
    /// below it, so an API mounted under a prefix keeps that prefix.
    pub fn new(base_url: &str, path_and_query: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);
        let current_url = base.join(path_and_query.trim_start_matches('/'))?;
        Ok(Self {
            base_url: base.into(),
            current_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn current_url(&self) -> &Url {
        &self.current_url
    }
}
