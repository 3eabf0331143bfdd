//! OpenAPI 3.0 document of the served routes.
//!
//! Paths come from the route table and component schemas from the entity
//! types, so neither can drift from what is actually served.

use serde_json::{Map, Value, json};
use utoipa::OpenApi;

use crate::domain::entities::execute::{Execute, Format, Output, ResponseMode, Subscriber};
use crate::domain::entities::job::{JobList, JobType, StatusCode, StatusInfo};
use crate::domain::entities::landing::{ConfClass, LandingPage};
use crate::domain::entities::link::Link;
use crate::domain::entities::process::{
    InputDescription, JobControlOptions, MaxOccurs, Metadata, ObjectType, OutputDescription,
    ProcessDescription, ProcessList, ProcessSummary, Reference, Schema, SchemaItem,
    TransmissionMode, Unbounded,
};
use crate::interface::http::problem::ProblemDetails;
use crate::interface::http::routes::{ROUTES, RouteName, RouteSpec};

/// Builds the document served at `/openapi.json`.
pub fn openapi_doc(title: &str, description: Option<&str>, base_url: &str) -> Value {
    let mut paths = Map::new();
    for route in ROUTES {
        let entry = paths
            .entry(route.path.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(methods) = entry {
            methods.insert(route.verb.as_str().to_string(), operation(route));
        }
    }

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": title,
            "description": description.unwrap_or_default(),
            "version": env!("CARGO_PKG_VERSION")
        },
        "servers": [{ "url": base_url }],
        "paths": paths,
        "components": components()
    })
}

fn operation(route: &RouteSpec) -> Value {
    let mut responses = Map::new();
    responses.insert(
        route.status.to_string(),
        json!({
            "description": route.summary,
            "content": {
                "application/json": {
                    "schema": schema_ref(route.response_model.schema_name())
                }
            }
        }),
    );
    for (status, description) in error_responses(route.name) {
        responses.insert(
            status.to_string(),
            json!({
                "description": description,
                "content": {
                    "application/problem+json": { "schema": schema_ref("ProblemDetails") }
                }
            }),
        );
    }

    let mut op = json!({
        "operationId": route.operation_id,
        "summary": route.summary,
        "tags": [route.tag],
        "responses": responses
    });
    let params = parameters(route);
    if !params.is_empty() {
        op["parameters"] = Value::Array(params);
    }
    if route.name == RouteName::PostProcessExecution {
        op["requestBody"] = json!({
            "required": true,
            "content": {
                "application/json": { "schema": schema_ref("Execute") }
            }
        });
    }
    op
}

fn parameters(route: &RouteSpec) -> Vec<Value> {
    let mut params: Vec<Value> = route
        .path_params()
        .into_iter()
        .map(|name| {
            json!({
                "name": name,
                "in": "path",
                "required": true,
                "schema": { "type": "string" }
            })
        })
        .collect();
    match route.name {
        RouteName::GetProcesses => params.push(limit_param()),
        RouteName::GetJobs => {
            params.push(limit_param());
            params.push(json!({
                "name": "processID",
                "in": "query",
                "required": false,
                "style": "form",
                "explode": false,
                "schema": { "type": "array", "items": { "type": "string" } }
            }));
            params.push(json!({
                "name": "status",
                "in": "query",
                "required": false,
                "style": "form",
                "explode": false,
                "schema": {
                    "type": "array",
                    "items": { "$ref": "#/components/schemas/StatusCode" }
                }
            }));
        }
        _ => {}
    }
    params
}

fn limit_param() -> Value {
    json!({
        "name": "limit",
        "in": "query",
        "required": false,
        "schema": { "type": "integer", "minimum": 1, "maximum": 10000, "default": 10 }
    })
}

fn error_responses(name: RouteName) -> Vec<(u16, &'static str)> {
    match name {
        RouteName::GetProcess => vec![(404, "process not found")],
        RouteName::PostProcessExecution => {
            vec![(400, "invalid execution request"), (404, "process not found")]
        }
        RouteName::GetProcesses | RouteName::GetJobs => vec![(400, "invalid parameter")],
        RouteName::GetJob | RouteName::DeleteJob => vec![(404, "job not found")],
        RouteName::GetJobResults => vec![
            (404, "job not found or results not ready"),
            (500, "job failed"),
        ],
        RouteName::GetLandingPage | RouteName::GetConformance | RouteName::GetOpenApi => {
            Vec::new()
        }
    }
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

/// Component schemas derived from the entities.
#[derive(OpenApi)]
#[openapi(components(schemas(
    Link,
    LandingPage,
    ConfClass,
    Metadata,
    JobControlOptions,
    TransmissionMode,
    ProcessSummary,
    ProcessList,
    ProcessDescription,
    InputDescription,
    OutputDescription,
    MaxOccurs,
    Unbounded,
    Schema,
    Reference,
    SchemaItem,
    ObjectType,
    Format,
    Output,
    ResponseMode,
    Subscriber,
    Execute,
    JobType,
    StatusCode,
    StatusInfo,
    JobList,
    ProblemDetails
)))]
struct EntitySchemas;

fn components() -> Value {
    let mut components = EntitySchemas::openapi()
        .components
        .and_then(|components| serde_json::to_value(components).ok())
        .unwrap_or_else(|| json!({ "schemas": {} }));
    // Free-form bodies without an entity of their own.
    if let Some(schemas) = components["schemas"].as_object_mut() {
        schemas.insert(
            "Results".to_string(),
            json!({ "type": "object", "additionalProperties": true }),
        );
        schemas.insert("OpenApi".to_string(), json!({ "type": "object" }));
    }
    components
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_route_table_when_documented_should_list_every_operation() {
        let doc = openapi_doc("t", None, "http://x/");

        for route in ROUTES {
            let op = &doc["paths"][route.path][route.verb.as_str()];
            assert_eq!(op["operationId"], route.operation_id, "{}", route.path);
            assert!(op["responses"][route.status.to_string()].is_object());
        }
    }

    #[test]
    fn given_shared_path_when_documented_should_hold_both_methods() {
        let doc = openapi_doc("t", None, "http://x/");

        let job = &doc["paths"]["/jobs/{job_id}"];
        assert_eq!(job["get"]["operationId"], "getStatus");
        assert_eq!(job["delete"]["operationId"], "dismiss");
        assert_eq!(job["get"]["parameters"][0]["name"], "job_id");
    }

    #[test]
    fn given_execution_route_when_documented_should_declare_request_body_and_201() {
        let doc = openapi_doc("t", Some("d"), "http://x/");

        let op = &doc["paths"]["/processes/{process_id}/execution"]["post"];
        assert_eq!(
            op["requestBody"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/Execute"
        );
        assert!(op["responses"]["201"].is_object());
        assert_eq!(doc["servers"][0]["url"], "http://x/");
        assert_eq!(doc["info"]["description"], "d");
    }

    fn property_names(components: &Value, name: &str) -> Vec<String> {
        let schema = &components["schemas"][name];
        let mut names: Vec<String> = schema["properties"]
            .as_object()
            .map(|props| props.keys().cloned().collect())
            .unwrap_or_default();
        for part in schema["allOf"].as_array().into_iter().flatten() {
            match part["$ref"].as_str().and_then(|r| r.rsplit('/').next()) {
                Some(referenced) => names.extend(property_names(components, referenced)),
                None => names.extend(
                    part["properties"]
                        .as_object()
                        .into_iter()
                        .flat_map(|props| props.keys().cloned()),
                ),
            }
        }
        names
    }

    fn assert_documented<T: serde::Serialize>(components: &Value, name: &str, entity: &T) {
        let value = serde_json::to_value(entity).unwrap();
        let documented = property_names(components, name);
        for field in value.as_object().unwrap().keys() {
            assert!(documented.contains(field), "{name}.{field} missing from schema");
        }
    }

    #[test]
    fn given_populated_entities_when_documented_should_cover_every_serialized_field() {
        let components = components();
        let link = json!({
            "href": "http://x/", "rel": "self", "type": "application/json",
            "hreflang": "en", "title": "t"
        });
        let summary = json!({
            "id": "abc",
            "version": "1.0",
            "title": "t",
            "description": "d",
            "keywords": ["k"],
            "metadata": [{"title": "m", "role": "r", "href": "http://x/m"}],
            "jobControlOptions": ["async-execute"],
            "outputTransmission": ["value"],
            "links": [link.clone()]
        });
        let mut description = summary.clone();
        description["inputs"] = json!({"in": {
            "title": "t", "description": "d", "keywords": ["k"],
            "minOccurs": 0, "maxOccurs": "unbounded", "schema": {"type": "string"}
        }});
        description["outputs"] = json!({"out": {"schema": {"$ref": "#/x"}}});

        let link: Link = serde_json::from_value(link).unwrap();
        let summary: ProcessSummary = serde_json::from_value(summary).unwrap();
        let description: ProcessDescription = serde_json::from_value(description).unwrap();
        let inputs = description.inputs.clone().unwrap();
        let status: StatusInfo = serde_json::from_value(json!({
            "jobID": "1", "processID": "abc", "type": "process", "status": "running",
            "message": "m", "created": "2024-05-01T10:00:00Z",
            "started": "2024-05-01T10:00:00Z", "finished": "2024-05-01T10:00:00Z",
            "updated": "2024-05-01T10:00:00Z", "progress": 5, "links": [link.clone()]
        }))
        .unwrap();
        let execute: Execute = serde_json::from_value(json!({
            "inputs": {"in": 1},
            "outputs": {"out": {"format": {"mediaType": "text/plain"}, "transmissionMode": "value"}},
            "response": "document",
            "subscriber": {"successUri": "http://x/ok"}
        }))
        .unwrap();

        assert_documented(&components, "Link", &link);
        assert_documented(&components, "ProcessSummary", &summary);
        assert_documented(&components, "ProcessDescription", &description);
        assert_documented(&components, "InputDescription", &inputs["in"]);
        assert_documented(&components, "StatusInfo", &status);
        assert_documented(&components, "Execute", &execute);
        assert_documented(&components, "JobList", &JobList::new(vec![status]));
        assert_documented(&components, "ProcessList", &ProcessList::new(vec![summary]));
        assert_documented(&components, "ConfClass", &ConfClass::default());
    }

    #[test]
    fn given_link_schema_when_documented_should_require_href_and_rel() {
        let components = components();

        let required = components["schemas"]["Link"]["required"].as_array().unwrap();
        assert!(required.contains(&json!("href")));
        assert!(required.contains(&json!("rel")));
    }

    #[test]
    fn given_document_when_built_should_reference_only_declared_schemas() {
        let doc = openapi_doc("t", None, "http://x/");
        let schemas = doc["components"]["schemas"].as_object().unwrap();

        let raw = doc.to_string();
        for reference in raw.split("#/components/schemas/").skip(1) {
            let name: String = reference.chars().take_while(|c| *c != '"').collect();
            assert!(schemas.contains_key(&name), "{name} is not declared");
        }
    }
}
