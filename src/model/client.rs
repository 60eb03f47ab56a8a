use crate::model::{Entity, Identified, Referenceable, SeqId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default)]
    pub id: Option<SeqId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

/// Projection of a [`Client`] embedded in projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRef {
    #[serde(default)]
    pub id: Option<SeqId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl ClientRef {
    pub fn to(id: SeqId) -> Self {
        Self { id: Some(id), reference: None }
    }
}

impl Identified for Client {
    type Id = SeqId;

    fn id(&self) -> Option<&SeqId> {
        self.id.as_ref()
    }
}

impl Identified for ClientRef {
    type Id = SeqId;

    fn id(&self) -> Option<&SeqId> {
        self.id.as_ref()
    }
}

impl Entity for Client {
    const NAME: &'static str = "client";
    const RESOURCE_PATH: &'static str = "clients";

    fn draft() -> Self {
        Self {
            id: None,
            reference: None,
            last_name: None,
            first_name: None,
            contact: None,
        }
    }

    fn set_id(&mut self, id: SeqId) {
        self.id = Some(id);
    }
}

impl Referenceable for Client {
    type Reference = ClientRef;

    fn to_reference(&self) -> ClientRef {
        ClientRef {
            id: self.id,
            reference: self.reference.clone(),
        }
    }

    fn from_reference(reference: ClientRef) -> Self {
        reference.into()
    }
}

impl From<ClientRef> for Client {
    fn from(reference: ClientRef) -> Self {
        Self {
            id: reference.id,
            reference: reference.reference,
            ..Self::draft()
        }
    }
}
