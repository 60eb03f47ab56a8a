use crate::model::{Entity, Identified, ProjectRef, Referenceable, SeqId, Status};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deliverable {
    #[serde(default)]
    pub id: Option<SeqId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverableRef {
    #[serde(default)]
    pub id: Option<SeqId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl DeliverableRef {
    pub fn to(id: SeqId) -> Self {
        Self { id: Some(id), reference: None }
    }
}

impl Identified for Deliverable {
    type Id = SeqId;

    fn id(&self) -> Option<&SeqId> {
        self.id.as_ref()
    }
}

impl Identified for DeliverableRef {
    type Id = SeqId;

    fn id(&self) -> Option<&SeqId> {
        self.id.as_ref()
    }
}

impl Entity for Deliverable {
    const NAME: &'static str = "deliverable";
    const RESOURCE_PATH: &'static str = "deliverables";
    const RELATIONSHIPS: &'static [&'static str] = &["project"];

    fn draft() -> Self {
        Self {
            id: None,
            reference: None,
            start_date: None,
            end_date: None,
            description: None,
            status: None,
            project: None,
        }
    }

    fn set_id(&mut self, id: SeqId) {
        self.id = Some(id);
    }
}

impl Referenceable for Deliverable {
    type Reference = DeliverableRef;

    fn to_reference(&self) -> DeliverableRef {
        DeliverableRef {
            id: self.id,
            reference: self.reference.clone(),
        }
    }

    fn from_reference(reference: DeliverableRef) -> Self {
        reference.into()
    }
}

impl From<DeliverableRef> for Deliverable {
    fn from(reference: DeliverableRef) -> Self {
        Self {
            id: reference.id,
            reference: reference.reference,
            ..Self::draft()
        }
    }
}
