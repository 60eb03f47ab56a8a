use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::marker::PhantomData;

use crate::api::handlers::{ApiError, ErrorResponse};
use crate::model::Entity;

/// Request body deserialized as `E`.
///
/// Unlike axum's `Json`, a body that cannot be read as `E` is answered with
/// the keyed JSON error shape (`errorKey` = `invalidbody`) so clients can
/// report it like any other rejected save.
#[derive(Debug)]
pub struct EntityJson<E>(pub E);

#[async_trait]
impl<S, E> FromRequest<S> for EntityJson<E>
where
    S: Send + Sync,
    E: Entity,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<E>::from_request(req, state).await {
            Ok(Json(entity)) => Ok(Self(entity)),
            Err(rejection) => Err(invalid_body::<E>(rejection)),
        }
    }
}

/// Raw JSON object of a partial update targeting `E`.
#[derive(Debug)]
pub struct EntityPatch<E> {
    pub fields: Value,
    entity: PhantomData<fn() -> E>,
}

#[async_trait]
impl<S, E> FromRequest<S> for EntityPatch<E>
where
    S: Send + Sync,
    E: Entity,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(fields)) => Ok(Self {
                fields,
                entity: PhantomData,
            }),
            Err(rejection) => Err(invalid_body::<E>(rejection)),
        }
    }
}

fn invalid_body<E: Entity>(rejection: JsonRejection) -> ApiError {
    log::debug!(
        "Unreadable {} body ({}): {}",
        E::NAME,
        rejection.status(),
        rejection.body_text()
    );
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::keyed(
            &rejection.body_text(),
            E::NAME,
            "invalidbody",
        )),
    )
}
