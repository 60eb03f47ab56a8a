use std::sync::Arc;

use crate::model::Entity;
use crate::service::{resolve_route, EntityLookup, ReferenceService, ServiceError};

/// Listing of one entity type, with delete-then-reload.
pub struct ListView<E, S> {
    service: Arc<S>,
    items: Vec<E>,
}

impl<E, S> ListView<E, S>
where
    E: Entity,
    S: ReferenceService<E> + EntityLookup<E>,
{
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    /// Replace the listing with the service's current collection.
    pub async fn load(&mut self) -> Result<&[E], ServiceError> {
        self.items = self.service.query().await?;
        log::debug!("Loaded {} {} entries", self.items.len(), E::NAME);
        Ok(&self.items)
    }

    /// Delete one entry and reload. The listing is left as it was when the
    /// delete fails.
    pub async fn delete(&mut self, id: &E::Id) -> Result<&[E], ServiceError> {
        self.service.delete(id).await?;
        self.load().await
    }

    pub async fn reset(&mut self) -> Result<&[E], ServiceError> {
        self.items.clear();
        self.load().await
    }
}

/// Read-only view of the entity named by the route.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView<E> {
    entity: E,
}

impl<E: Entity> DetailView<E> {
    pub async fn open<L>(lookup: &L, id: &E::Id) -> Result<Self, ServiceError>
    where
        L: EntityLookup<E> + ?Sized,
    {
        match resolve_route(lookup, Some(id)).await? {
            Some(entity) => Ok(Self { entity }),
            None => Err(ServiceError::NotFound {
                entity: E::NAME,
                id: id.to_string(),
            }),
        }
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }

    pub fn into_entity(self) -> E {
        self.entity
    }
}
