use crate::model::{
    Activity, Client, DailyLoad, Deliverable, Entity, Estimation, Maintenance, Project, Resource,
};
use anyhow::Result;

/// Persistence for one entity type.
#[async_trait::async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    /// All stored entities, in creation order
    async fn find_all(&self) -> Result<Vec<E>>;
    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E>>;
    async fn exists(&self, id: &E::Id) -> Result<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
    /// Insert or replace. A draft receives a fresh identity; the saved
    /// entity is returned.
    async fn save(&self, entity: E) -> Result<E>;
    /// Remove by identity. Entities referencing the removed one are left as is.
    async fn delete(&self, id: &E::Id) -> Result<bool>;
}

pub trait Store:
    EntityStore<Activity>
    + EntityStore<Client>
    + EntityStore<DailyLoad>
    + EntityStore<Deliverable>
    + EntityStore<Estimation>
    + EntityStore<Maintenance>
    + EntityStore<Project>
    + EntityStore<Resource>
    + Send
    + Sync
{
}

impl<T> Store for T where
    T: EntityStore<Activity>
        + EntityStore<Client>
        + EntityStore<DailyLoad>
        + EntityStore<Deliverable>
        + EntityStore<Estimation>
        + EntityStore<Maintenance>
        + EntityStore<Project>
        + EntityStore<Resource>
        + Send
        + Sync
{
}
