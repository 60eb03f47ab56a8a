use crate::model::{
    ActivityRef, DeliverableRef, Entity, EstimationTarget, Identified, ProjectRef,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Effort estimate attached to a project, a deliverable or an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimation {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taken_over: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<EstimationTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliverable: Option<DeliverableRef>,
}

impl Identified for Estimation {
    type Id = Uuid;

    fn id(&self) -> Option<&Uuid> {
        self.id.as_ref()
    }
}

impl Entity for Estimation {
    const NAME: &'static str = "estimation";
    const RESOURCE_PATH: &'static str = "estimations";
    const RELATIONSHIPS: &'static [&'static str] = &["activity", "project", "deliverable"];

    fn draft() -> Self {
        Self {
            id: None,
            date: None,
            day_value: None,
            hour_value: None,
            taken_over: None,
            target: None,
            activity: None,
            project: None,
            deliverable: None,
        }
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }
}
