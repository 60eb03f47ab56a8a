use crate::model::{Entity, Identified, Referenceable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person whose time is booked on daily loads and maintenances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
}

/// Projection of a [`Resource`] embedded in owning entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl Resource {
    pub fn new(last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            id: None,
            last_name: Some(last_name.into()),
            first_name: Some(first_name.into()),
        }
    }
}

impl ResourceRef {
    pub fn to(id: Uuid) -> Self {
        Self { id: Some(id), last_name: None }
    }
}

impl Identified for Resource {
    type Id = Uuid;

    fn id(&self) -> Option<&Uuid> {
        self.id.as_ref()
    }
}

impl Identified for ResourceRef {
    type Id = Uuid;

    fn id(&self) -> Option<&Uuid> {
        self.id.as_ref()
    }
}

impl Entity for Resource {
    const NAME: &'static str = "resource";
    const RESOURCE_PATH: &'static str = "resources";

    fn draft() -> Self {
        Self {
            id: None,
            last_name: None,
            first_name: None,
        }
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }
}

impl Referenceable for Resource {
    type Reference = ResourceRef;

    fn to_reference(&self) -> ResourceRef {
        ResourceRef {
            id: self.id,
            last_name: self.last_name.clone(),
        }
    }

    fn from_reference(reference: ResourceRef) -> Self {
        reference.into()
    }
}

impl From<ResourceRef> for Resource {
    fn from(reference: ResourceRef) -> Self {
        Self {
            id: reference.id,
            last_name: reference.last_name,
            first_name: None,
        }
    }
}
