use crate::model::{Entity, Identified, Referenceable, SeqId, Status};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default)]
    pub id: Option<SeqId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Remaining work, free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_work: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRef {
    #[serde(default)]
    pub id: Option<SeqId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl ActivityRef {
    pub fn to(id: SeqId) -> Self {
        Self { id: Some(id), reference: None }
    }
}

impl Identified for Activity {
    type Id = SeqId;

    fn id(&self) -> Option<&SeqId> {
        self.id.as_ref()
    }
}

impl Identified for ActivityRef {
    type Id = SeqId;

    fn id(&self) -> Option<&SeqId> {
        self.id.as_ref()
    }
}

impl Entity for Activity {
    const NAME: &'static str = "activity";
    const RESOURCE_PATH: &'static str = "activities";

    fn draft() -> Self {
        Self {
            id: None,
            reference: None,
            description: None,
            start_date: None,
            end_date: None,
            remaining_work: None,
            status: None,
        }
    }

    fn set_id(&mut self, id: SeqId) {
        self.id = Some(id);
    }
}

impl Referenceable for Activity {
    type Reference = ActivityRef;

    fn to_reference(&self) -> ActivityRef {
        ActivityRef {
            id: self.id,
            reference: self.reference.clone(),
        }
    }

    fn from_reference(reference: ActivityRef) -> Self {
        reference.into()
    }
}

impl From<ActivityRef> for Activity {
    fn from(reference: ActivityRef) -> Self {
        Self {
            id: reference.id,
            reference: reference.reference,
            ..Self::draft()
        }
    }
}
