// Demo process catalogue served by the in-memory backend.

use std::collections::BTreeMap;

use crate::domain::entities::process::{
    InputDescription, JobControlOptions, ObjectType, OutputDescription, ProcessDescription,
    ProcessSummary, Schema, TransmissionMode,
};

/// Processes the binary registers at startup.
pub fn sample_processes() -> Vec<ProcessDescription> {
    vec![echo(), buffer()]
}

fn summary(id: &str, title: &str, description: &str, keywords: &[&str]) -> ProcessSummary {
    let mut summary = ProcessSummary::new(id, "1.0.0");
    summary.title = Some(title.to_string());
    summary.description = Some(description.to_string());
    summary.keywords = Some(keywords.iter().map(|k| k.to_string()).collect());
    summary.job_control_options = Some(vec![
        JobControlOptions::AsyncExecute,
        JobControlOptions::Dismiss,
    ]);
    summary.output_transmission = Some(vec![TransmissionMode::Value]);
    summary
}

fn echo() -> ProcessDescription {
    let mut process = ProcessDescription::new(summary(
        "echo",
        "Echo",
        "Returns its input unchanged.",
        &["demo"],
    ));
    let mut message = InputDescription::new(Schema::of_type(ObjectType::String));
    message.title = Some("message".to_string());
    process.inputs = Some(BTreeMap::from([("message".to_string(), message)]));
    process.outputs = Some(BTreeMap::from([(
        "echo".to_string(),
        OutputDescription::new(Schema::of_type(ObjectType::String)),
    )]));
    process
}

fn buffer() -> ProcessDescription {
    let mut process = ProcessDescription::new(summary(
        "buffer",
        "Buffer",
        "Buffers a geometry by a distance.",
        &["geometry", "demo"],
    ));
    let geometry = InputDescription::new(Schema::of_type(ObjectType::Object));
    let mut distance = InputDescription::new(Schema::of_type(ObjectType::Number));
    distance.description = Some("buffer distance in the geometry's units".to_string());
    process.inputs = Some(BTreeMap::from([
        ("geometry".to_string(), geometry),
        ("distance".to_string(), distance),
    ]));
    process.outputs = Some(BTreeMap::from([(
        "buffered".to_string(),
        OutputDescription::new(Schema::of_type(ObjectType::Object)),
    )]));
    process
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_sample_catalogue_when_listed_should_hold_unique_ids() {
        let processes = sample_processes();
        let mut ids: Vec<&str> = processes.iter().map(|p| p.id()).collect();
        ids.sort();
        ids.dedup();

        assert_eq!(ids, vec!["buffer", "echo"]);
    }
}
