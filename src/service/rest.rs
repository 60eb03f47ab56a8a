use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

use crate::api::ErrorResponse;
use crate::model::{Entity, Identified};
use crate::service::traits::{EntityLookup, EntityService, ReferenceService, ServiceError};

/// Talks to `<base_url>/api/<resource path>` for one entity type.
pub struct RestService<E> {
    client: Client,
    resource_url: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for RestService<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            resource_url: self.resource_url.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> RestService<E> {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            resource_url: format!("{}/api/{}", base_url.trim_end_matches('/'), E::RESOURCE_PATH),
            _entity: PhantomData,
        }
    }

    pub fn resource_url(&self) -> &str {
        &self.resource_url
    }

    fn item_url(&self, id: &E::Id) -> String {
        format!("{}/{}", self.resource_url, id)
    }

    fn require_id(entity: &E) -> Result<E::Id, ServiceError> {
        entity
            .id()
            .cloned()
            .ok_or(ServiceError::MissingId { entity: E::NAME })
    }

    /// Send only the fields that are set; the server keeps the others.
    pub async fn partial_update(&self, entity: E) -> Result<E, ServiceError> {
        let id = Self::require_id(&entity)?;
        let response = self
            .client
            .patch(self.item_url(&id))
            .header(CONTENT_TYPE, "application/merge-patch+json")
            .json(&entity)
            .send()
            .await?;
        read_body(response).await
    }
}

async fn read_body<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    if response.status().is_success() {
        Ok(response.json::<T>().await?)
    } else {
        Err(rejection(response).await)
    }
}

async fn rejection(response: Response) -> ServiceError {
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(body) => ServiceError::Rejected {
            status: status.as_u16(),
            message: body.error,
            error_key: body.error_key,
        },
        Err(_) => ServiceError::Rejected {
            status: status.as_u16(),
            message: status.to_string(),
            error_key: None,
        },
    }
}

#[async_trait::async_trait]
impl<E: Entity> EntityService<E> for RestService<E> {
    async fn create(&self, entity: E) -> Result<E, ServiceError> {
        let response = self
            .client
            .post(&self.resource_url)
            .json(&entity)
            .send()
            .await?;
        read_body(response).await
    }

    async fn update(&self, entity: E) -> Result<E, ServiceError> {
        let id = Self::require_id(&entity)?;
        let response = self
            .client
            .put(self.item_url(&id))
            .json(&entity)
            .send()
            .await?;
        read_body(response).await
    }
}

#[async_trait::async_trait]
impl<E: Entity> EntityLookup<E> for RestService<E> {
    async fn find(&self, id: &E::Id) -> Result<E, ServiceError> {
        let response = self.client.get(self.item_url(id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ServiceError::NotFound {
                entity: E::NAME,
                id: id.to_string(),
            });
        }
        read_body(response).await
    }

    async fn delete(&self, id: &E::Id) -> Result<(), ServiceError> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(rejection(response).await)
        }
    }
}

#[async_trait::async_trait]
impl<E: Entity> ReferenceService<E> for RestService<E> {
    async fn query(&self) -> Result<Vec<E>, ServiceError> {
        let response = self.client.get(&self.resource_url).send().await?;
        read_body(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DailyLoad, Project};

    #[test]
    fn test_resource_urls() {
        let client = Client::new();
        let loads = RestService::<DailyLoad>::new(client.clone(), "http://localhost:8080/");
        assert_eq!(loads.resource_url(), "http://localhost:8080/api/daily-loads");

        let projects = RestService::<Project>::new(client, "http://localhost:8080");
        assert_eq!(projects.item_url(&12), "http://localhost:8080/api/projects/12");
    }

    #[tokio::test]
    async fn test_update_requires_identity() {
        let service = RestService::<Project>::new(Client::new(), "http://localhost:9");
        let err = service.update(Project::draft()).await.unwrap_err();
        assert!(matches!(err, ServiceError::MissingId { entity: "project" }));
    }
}
