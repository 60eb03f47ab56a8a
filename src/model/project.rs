use crate::model::{ClientRef, Entity, Identified, ProjectKind, Referenceable, SeqId, Status};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: Option<SeqId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ProjectKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRef {
    #[serde(default)]
    pub id: Option<SeqId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl ProjectRef {
    pub fn to(id: SeqId) -> Self {
        Self { id: Some(id), reference: None }
    }
}

impl Identified for Project {
    type Id = SeqId;

    fn id(&self) -> Option<&SeqId> {
        self.id.as_ref()
    }
}

impl Identified for ProjectRef {
    type Id = SeqId;

    fn id(&self) -> Option<&SeqId> {
        self.id.as_ref()
    }
}

impl Entity for Project {
    const NAME: &'static str = "project";
    const RESOURCE_PATH: &'static str = "projects";
    const RELATIONSHIPS: &'static [&'static str] = &["client"];

    fn draft() -> Self {
        Self {
            id: None,
            reference: None,
            kind: None,
            description: None,
            start_date: None,
            end_date: None,
            status: None,
            client: None,
        }
    }

    fn set_id(&mut self, id: SeqId) {
        self.id = Some(id);
    }
}

impl Referenceable for Project {
    type Reference = ProjectRef;

    fn to_reference(&self) -> ProjectRef {
        ProjectRef {
            id: self.id,
            reference: self.reference.clone(),
        }
    }

    fn from_reference(reference: ProjectRef) -> Self {
        reference.into()
    }
}

impl From<ProjectRef> for Project {
    fn from(reference: ProjectRef) -> Self {
        Self {
            id: reference.id,
            reference: reference.reference,
            ..Self::draft()
        }
    }
}
