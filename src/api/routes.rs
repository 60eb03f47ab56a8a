use axum::{extract::Extension, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::handlers::{self, Alerts};
use crate::logic::{LinkReferences, Validate};
use crate::model::{
    Activity, Client, DailyLoad, Deliverable, Entity, Estimation, Maintenance, Project, Resource,
};
use crate::store::traits::{EntityStore, Store};

pub fn create_router<S: Store + 'static>(alerts: Alerts) -> Router<Arc<S>> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(entity_routes::<S, Activity>())
        .merge(entity_routes::<S, Client>())
        .merge(entity_routes::<S, DailyLoad>())
        .merge(entity_routes::<S, Deliverable>())
        .merge(entity_routes::<S, Estimation>())
        .merge(entity_routes::<S, Maintenance>())
        .merge(entity_routes::<S, Project>())
        .merge(entity_routes::<S, Resource>())
        .layer(Extension(alerts))
        .layer(CorsLayer::permissive())
}

/// CRUD routes for one entity under `/api/<resource path>`.
fn entity_routes<S, E>() -> Router<Arc<S>>
where
    S: Store + EntityStore<E> + 'static,
    E: Entity + Validate + LinkReferences,
{
    let collection = format!("/api/{}", E::RESOURCE_PATH);
    let item = format!("{}/:id", collection);

    Router::new()
        .route(
            &collection,
            get(handlers::list_entities::<S, E>).post(handlers::create_entity::<S, E>),
        )
        .route(
            &item,
            get(handlers::get_entity::<S, E>)
                .put(handlers::update_entity::<S, E>)
                .patch(handlers::partial_update_entity::<S, E>)
                .delete(handlers::delete_entity::<S, E>),
        )
}
