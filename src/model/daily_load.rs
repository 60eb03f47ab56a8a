use crate::model::{Entity, Identified, LoadKind, ResourceRef};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Time a resource spent on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLoad {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<LoadKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceRef>,
}

impl Identified for DailyLoad {
    type Id = Uuid;

    fn id(&self) -> Option<&Uuid> {
        self.id.as_ref()
    }
}

impl Entity for DailyLoad {
    const NAME: &'static str = "dailyLoad";
    const RESOURCE_PATH: &'static str = "daily-loads";
    const RELATIONSHIPS: &'static [&'static str] = &["resource"];

    fn draft() -> Self {
        Self {
            id: None,
            date: None,
            kind: None,
            duration: None,
            description: None,
            resource: None,
        }
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }
}
