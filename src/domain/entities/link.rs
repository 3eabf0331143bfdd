use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MEDIA_TYPE_JSON: &str = "application/json";
pub const MEDIA_TYPE_OPENAPI: &str = "application/vnd.oai.openapi+json;version=3.0";

/// A hyperlink embedded in a response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    pub href: String,
    pub rel: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Link {
    pub fn new(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            r#type: None,
            hreflang: None,
            title: None,
        }
    }

    pub fn with_type(mut self, media_type: impl Into<String>) -> Self {
        self.r#type = Some(media_type.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
