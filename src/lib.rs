pub mod api;
pub mod config;
pub mod form;
pub mod logic;
pub mod model;
pub mod seed;
pub mod service;
pub mod store;

pub use api::handlers;
pub use api::routes;

pub use form::{FormBinding, FormSession, SessionError, SessionState, SessionStatus, TeardownHandle};
pub use logic::{add_to_collection_if_missing, same_identity};
pub use model::*;
pub use service::{EntityService, ReferenceService, RestService, ServiceError};
pub use store::{MemoryStore, PostgresStore, Store};

use anyhow::Context;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::api::handlers::Alerts;
use crate::config::AppConfig;

/// The full HTTP application over the given store.
pub fn build_app<S: Store + 'static>(store: Arc<S>, config: &AppConfig) -> anyhow::Result<Router> {
    let alerts = Alerts::new(&config.api.application_name)
        .context("Invalid application name for alert headers")?;
    Ok(routes::create_router::<S>(alerts).with_state(store))
}

/// Pick the store from configuration, optionally seed it and serve until
/// the listener fails.
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    match config.database_url() {
        Some(database_url) => {
            log::info!("Connecting to PostgreSQL...");
            let postgres_store = PostgresStore::new(&database_url, config.max_connections()).await?;
            postgres_store.migrate().await?;
            serve_store(Arc::new(postgres_store), &config).await
        }
        None => {
            log::info!("No database configured, using the in-memory store");
            serve_store(Arc::new(MemoryStore::new()), &config).await
        }
    }
}

async fn serve_store<S: Store + 'static>(store: Arc<S>, config: &AppConfig) -> anyhow::Result<()> {
    if std::env::var("LOAD_SEED_DATA").unwrap_or_default() == "true" {
        log::info!("Loading seed data...");
        seed::load_seed_data(&*store).await?;
    }

    let app = build_app(store, config)?;
    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    log::info!("easyTask server running on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
