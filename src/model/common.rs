use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;
use uuid::Uuid;

/// Integer identity, assigned from the shared sequence.
pub type SeqId = i64;

/// Identity field type of an entity. Each entity type picks one kind and
/// keeps it for its whole lifetime.
pub trait EntityKey:
    Clone + Eq + Hash + Debug + Display + FromStr + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Whether new identities are drawn from the store's sequence.
    const SEQUENTIAL: bool;

    /// Produce the identity for a freshly created entity.
    fn generate(next_value: i64) -> Self;
}

impl EntityKey for SeqId {
    const SEQUENTIAL: bool = true;

    fn generate(next_value: i64) -> Self {
        next_value
    }
}

impl EntityKey for Uuid {
    const SEQUENTIAL: bool = false;

    fn generate(_next_value: i64) -> Self {
        Uuid::new_v4()
    }
}

/// Anything carrying an optional identity: entities, drafts and references.
pub trait Identified {
    type Id: EntityKey;

    fn id(&self) -> Option<&Self::Id>;
}

/// A business record type exposed through the REST API.
pub trait Entity:
    Identified + Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Name used in alert headers and error bodies (e.g. `dailyLoad`).
    const NAME: &'static str;
    /// Path segment under `/api` (e.g. `daily-loads`).
    const RESOURCE_PATH: &'static str;
    /// Relationship fields, in their JSON spelling.
    const RELATIONSHIPS: &'static [&'static str] = &[];

    /// A draft: identity explicitly unset, every optional field absent.
    fn draft() -> Self;

    fn set_id(&mut self, id: Self::Id);

    fn is_draft(&self) -> bool {
        self.id().is_none()
    }
}

/// An entity that other entities point at through a reduced projection.
pub trait Referenceable: Entity {
    type Reference: Identified<Id = Self::Id>
        + Clone
        + Debug
        + PartialEq
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    fn to_reference(&self) -> Self::Reference;

    /// Widen a reference into an entity whose non-display fields are absent.
    fn from_reference(reference: Self::Reference) -> Self;
}
