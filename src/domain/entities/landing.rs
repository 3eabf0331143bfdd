use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::entities::link::Link;

pub const CONFORMANCE_CLASSES: [&str; 5] = [
    "http://www.opengis.net/spec/ogcapi-processes-1/1.0/conf/core",
    "http://www.opengis.net/spec/ogcapi-processes-1/1.0/conf/ogc-process-description",
    "http://www.opengis.net/spec/ogcapi-processes-1/1.0/conf/job-list",
    "http://www.opengis.net/spec/ogcapi-processes-1/1.0/conf/json",
    "http://www.opengis.net/spec/ogcapi-processes-1/1.0/conf/oas30",
];

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LandingPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub links: Vec<Link>,
}

/// Conformance declaration.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ConfClass {
    #[serde(rename = "conformsTo")]
    pub conforms_to: Vec<String>,
}

impl Default for ConfClass {
    fn default() -> Self {
        Self {
            conforms_to: CONFORMANCE_CLASSES.iter().map(|c| c.to_string()).collect(),
        }
    }
}
