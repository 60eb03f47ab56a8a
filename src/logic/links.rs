use thiserror::Error;

use crate::model::{
    Activity, Client, DailyLoad, Deliverable, Estimation, Identified, Maintenance, Project,
    Referenceable, Resource,
};
use crate::store::traits::{EntityStore, Store};

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("'{field}' has no identity")]
    MissingId { field: &'static str },
    #[error("'{field}' references unknown {entity} '{id}'")]
    NotFound {
        field: &'static str,
        entity: &'static str,
        id: String,
    },
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Point every relationship reference of an entity at a stored target and
/// refresh its display fields from that target.
#[async_trait::async_trait]
pub trait LinkReferences: Sized {
    async fn link_references<S: Store + ?Sized>(&mut self, store: &S) -> Result<(), LinkError>;
}

async fn relink<S, T>(
    store: &S,
    field: &'static str,
    slot: &mut Option<T::Reference>,
) -> Result<(), LinkError>
where
    S: EntityStore<T> + ?Sized,
    T: Referenceable,
{
    let Some(current) = slot.as_ref() else {
        return Ok(());
    };
    let Some(id) = current.id().cloned() else {
        return Err(LinkError::MissingId { field });
    };

    match store.find_by_id(&id).await? {
        Some(target) => {
            *slot = Some(target.to_reference());
            Ok(())
        }
        None => Err(LinkError::NotFound {
            field,
            entity: T::NAME,
            id: id.to_string(),
        }),
    }
}

macro_rules! no_references {
    ($($entity:ty),*) => {
        $(
            #[async_trait::async_trait]
            impl LinkReferences for $entity {
                async fn link_references<S: Store + ?Sized>(&mut self, _store: &S) -> Result<(), LinkError> {
                    Ok(())
                }
            }
        )*
    };
}

no_references!(Activity, Client, Resource);

#[async_trait::async_trait]
impl LinkReferences for DailyLoad {
    async fn link_references<S: Store + ?Sized>(&mut self, store: &S) -> Result<(), LinkError> {
        relink::<S, Resource>(store, "resource", &mut self.resource).await
    }
}

#[async_trait::async_trait]
impl LinkReferences for Maintenance {
    async fn link_references<S: Store + ?Sized>(&mut self, store: &S) -> Result<(), LinkError> {
        relink::<S, Resource>(store, "resource", &mut self.resource).await
    }
}

#[async_trait::async_trait]
impl LinkReferences for Deliverable {
    async fn link_references<S: Store + ?Sized>(&mut self, store: &S) -> Result<(), LinkError> {
        relink::<S, Project>(store, "project", &mut self.project).await
    }
}

#[async_trait::async_trait]
impl LinkReferences for Project {
    async fn link_references<S: Store + ?Sized>(&mut self, store: &S) -> Result<(), LinkError> {
        relink::<S, Client>(store, "client", &mut self.client).await
    }
}

#[async_trait::async_trait]
impl LinkReferences for Estimation {
    async fn link_references<S: Store + ?Sized>(&mut self, store: &S) -> Result<(), LinkError> {
        relink::<S, Activity>(store, "activity", &mut self.activity).await?;
        relink::<S, Project>(store, "project", &mut self.project).await?;
        relink::<S, Deliverable>(store, "deliverable", &mut self.deliverable).await
    }
}
