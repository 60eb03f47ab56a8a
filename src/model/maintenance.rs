use crate::model::{Entity, Identified, ResourceRef, Status};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maintenance {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceRef>,
}

impl Identified for Maintenance {
    type Id = Uuid;

    fn id(&self) -> Option<&Uuid> {
        self.id.as_ref()
    }
}

impl Entity for Maintenance {
    const NAME: &'static str = "maintenance";
    const RESOURCE_PATH: &'static str = "maintenances";
    const RELATIONSHIPS: &'static [&'static str] = &["resource"];

    fn draft() -> Self {
        Self {
            id: None,
            description: None,
            product: None,
            solution: None,
            status: None,
            start_date: None,
            end_date: None,
            duration: None,
            resource: None,
        }
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }
}
