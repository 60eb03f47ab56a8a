use serde::{Deserialize, Serialize};

/// Progress of an activity, deliverable, maintenance or project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Status {
    Planned,
    InProgress,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ProjectKind {
    Internal,
    External,
}

/// What a daily load was spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum LoadKind {
    Project,
    Maintenance,
    Support,
}

/// Which kind of work item an estimation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum EstimationTarget {
    Project,
    Deliverable,
    Activity,
}
