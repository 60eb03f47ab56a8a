use thiserror::Error;

use crate::logic::{add_to_collection_if_missing, same_identity};
use crate::model::Entity;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },
    #[error("{message} ({status})")]
    Rejected {
        status: u16,
        message: String,
        error_key: Option<String>,
    },
    #[error("{entity} has no identity")]
    MissingId { entity: &'static str },
}

/// Persists one owning entity type.
#[async_trait::async_trait]
pub trait EntityService<E: Entity>: Send + Sync {
    /// Persist a draft; the returned entity carries the server-assigned identity.
    async fn create(&self, entity: E) -> Result<E, ServiceError>;
    async fn update(&self, entity: E) -> Result<E, ServiceError>;
}

/// Single-entity reads and removal, used by routing and list views.
#[async_trait::async_trait]
pub trait EntityLookup<E: Entity>: Send + Sync {
    async fn find(&self, id: &E::Id) -> Result<E, ServiceError>;
    async fn delete(&self, id: &E::Id) -> Result<(), ServiceError>;
}

/// Candidate source for one relationship target type.
#[async_trait::async_trait]
pub trait ReferenceService<T: Entity>: Send + Sync {
    /// Default candidate collection. Paging and filtering are up to the service.
    async fn query(&self) -> Result<Vec<T>, ServiceError>;

    fn add_to_collection_if_missing(&self, collection: &[T], additional: Vec<Option<T>>) -> Vec<T> {
        add_to_collection_if_missing(collection, additional)
    }

    fn compare(&self, a: Option<&T>, b: Option<&T>) -> bool {
        same_identity(a, b)
    }
}
