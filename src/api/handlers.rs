use axum::{
    extract::{Extension, Path, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::api::extractors::{EntityJson, EntityPatch};
use crate::logic::{describe, FieldError, LinkError, LinkReferences, Validate};
use crate::model::{Entity, Identified};
use crate::store::traits::{EntityStore, Store};

pub type AppState<S> = Arc<S>;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_key: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
            entity_name: None,
            error_key: None,
            field_errors: Vec::new(),
        }
    }

    pub fn keyed(message: &str, entity_name: &str, error_key: &str) -> Self {
        Self {
            entity_name: Some(entity_name.to_string()),
            error_key: Some(error_key.to_string()),
            ..Self::new(message)
        }
    }
}

/// Names of the alert headers attached to mutating responses, derived from
/// the application name (`X-<name>-alert`, `X-<name>-params`).
#[derive(Debug, Clone)]
pub struct Alerts {
    application_name: String,
    alert: HeaderName,
    params: HeaderName,
}

impl Default for Alerts {
    fn default() -> Self {
        Self {
            application_name: "easyTaskApp".to_string(),
            alert: HeaderName::from_static("x-easytaskapp-alert"),
            params: HeaderName::from_static("x-easytaskapp-params"),
        }
    }
}

impl Alerts {
    pub fn new(application_name: &str) -> anyhow::Result<Self> {
        Ok(Self {
            application_name: application_name.to_string(),
            alert: HeaderName::from_bytes(format!("x-{}-alert", application_name).as_bytes())?,
            params: HeaderName::from_bytes(format!("x-{}-params", application_name).as_bytes())?,
        })
    }

    /// Alert key of an entity event, e.g. `easyTaskApp.dailyLoad.created`.
    pub fn key(&self, entity_name: &str, event: &str) -> String {
        format!("{}.{}.{}", self.application_name, entity_name, event)
    }

    fn headers(&self, entity_name: &str, event: &str, id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.key(entity_name, event)) {
            headers.insert(self.alert.clone(), value);
        }
        if let Ok(value) = HeaderValue::from_str(id) {
            headers.insert(self.params.clone(), value);
        }
        headers
    }
}

fn bad_request<E: Entity>(error_key: &str, message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::keyed(message, E::NAME, error_key)),
    )
}

fn internal_error(e: anyhow::Error) -> ApiError {
    log::error!("Store failure: {:#}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(&e.to_string())),
    )
}

fn parse_id<E: Entity>(raw: &str) -> Result<E::Id, ApiError> {
    raw.parse::<E::Id>()
        .map_err(|_| bad_request::<E>("idinvalid", &format!("Invalid id '{}'", raw)))
}

fn check_valid<E: Entity + Validate>(entity: &E) -> Result<(), ApiError> {
    let errors = entity.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let mut body = ErrorResponse::keyed(&describe(&errors), E::NAME, "validation");
    body.field_errors = errors;
    Err((StatusCode::BAD_REQUEST, Json(body)))
}

async fn link<S, E>(store: &S, entity: &mut E) -> Result<(), ApiError>
where
    S: Store,
    E: Entity + LinkReferences,
{
    match entity.link_references(store).await {
        Ok(()) => Ok(()),
        Err(LinkError::Store(e)) => Err(internal_error(e)),
        Err(e) => Err(bad_request::<E>("referencenotfound", &e.to_string())),
    }
}

/// Path id, body id and stored entity must all agree before an update.
async fn check_update_target<S, E>(
    store: &S,
    path_id: &E::Id,
    body_id: Option<&E::Id>,
) -> Result<(), ApiError>
where
    S: Store + EntityStore<E>,
    E: Entity,
{
    let Some(body_id) = body_id else {
        return Err(bad_request::<E>("idnull", "Invalid id"));
    };
    if body_id != path_id {
        return Err(bad_request::<E>("idinvalid", "Invalid ID"));
    }
    match EntityStore::<E>::exists(store, path_id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(bad_request::<E>("idnotfound", "Entity not found")),
        Err(e) => Err(internal_error(e)),
    }
}

fn saved_id<E: Entity>(entity: &E) -> String {
    entity.id().map(ToString::to_string).unwrap_or_default()
}

pub async fn list_entities<S, E>(
    State(store): State<AppState<S>>,
) -> Result<(HeaderMap, Json<Vec<E>>), ApiError>
where
    S: Store + EntityStore<E>,
    E: Entity,
{
    log::debug!("REST request to get all {}", E::RESOURCE_PATH);
    let entities = EntityStore::<E>::find_all(&*store)
        .await
        .map_err(internal_error)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("x-total-count"),
        HeaderValue::from(entities.len()),
    );
    Ok((headers, Json(entities)))
}

pub async fn get_entity<S, E>(
    State(store): State<AppState<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<E>, ApiError>
where
    S: Store + EntityStore<E>,
    E: Entity,
{
    log::debug!("REST request to get {} : {}", E::NAME, raw_id);
    let id = parse_id::<E>(&raw_id)?;
    match EntityStore::<E>::find_by_id(&*store, &id).await {
        Ok(Some(entity)) => Ok(Json(entity)),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::keyed("Entity not found", E::NAME, "idnotfound")),
        )),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn create_entity<S, E>(
    State(store): State<AppState<S>>,
    Extension(alerts): Extension<Alerts>,
    EntityJson(mut entity): EntityJson<E>,
) -> Result<(StatusCode, HeaderMap, Json<E>), ApiError>
where
    S: Store + EntityStore<E>,
    E: Entity + Validate + LinkReferences,
{
    log::debug!("REST request to save {} : {:?}", E::NAME, entity);
    if !entity.is_draft() {
        return Err(bad_request::<E>(
            "idexists",
            &format!("A new {} cannot already have an ID", E::NAME),
        ));
    }
    check_valid(&entity)?;
    link(&*store, &mut entity).await?;

    let saved = EntityStore::<E>::save(&*store, entity)
        .await
        .map_err(internal_error)?;
    let id = saved_id(&saved);

    let mut headers = alerts.headers(E::NAME, "created", &id);
    if let Ok(location) = HeaderValue::from_str(&format!("/api/{}/{}", E::RESOURCE_PATH, id)) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(saved)))
}

pub async fn update_entity<S, E>(
    State(store): State<AppState<S>>,
    Extension(alerts): Extension<Alerts>,
    Path(raw_id): Path<String>,
    EntityJson(mut entity): EntityJson<E>,
) -> Result<(HeaderMap, Json<E>), ApiError>
where
    S: Store + EntityStore<E>,
    E: Entity + Validate + LinkReferences,
{
    log::debug!("REST request to update {} : {}, {:?}", E::NAME, raw_id, entity);
    let id = parse_id::<E>(&raw_id)?;
    check_update_target::<S, E>(&store, &id, entity.id()).await?;
    check_valid(&entity)?;
    link(&*store, &mut entity).await?;

    let saved = EntityStore::<E>::save(&*store, entity)
        .await
        .map_err(internal_error)?;
    let headers = alerts.headers(E::NAME, "updated", &saved_id(&saved));
    Ok((headers, Json(saved)))
}

/// Copy the non-null fields of `patch` over `stored`. Identity and
/// relationship fields are never patched.
pub fn overlay<E: Entity>(stored: &E, patch: Value) -> Result<E, serde_json::Error> {
    let mut merged = serde_json::to_value(stored)?;
    if let (Value::Object(target), Value::Object(fields)) = (&mut merged, patch) {
        for (field, value) in fields {
            if value.is_null() || field == "id" || E::RELATIONSHIPS.contains(&field.as_str()) {
                continue;
            }
            target.insert(field, value);
        }
    }
    serde_json::from_value(merged)
}

pub async fn partial_update_entity<S, E>(
    State(store): State<AppState<S>>,
    Extension(alerts): Extension<Alerts>,
    Path(raw_id): Path<String>,
    patch: EntityPatch<E>,
) -> Result<(HeaderMap, Json<E>), ApiError>
where
    S: Store + EntityStore<E>,
    E: Entity + Validate,
{
    let patch = patch.fields;
    log::debug!("REST request to partial update {} : {}, {}", E::NAME, raw_id, patch);
    let id = parse_id::<E>(&raw_id)?;
    let body_id = match patch.get("id") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            serde_json::from_value::<E::Id>(value.clone())
                .map_err(|_| bad_request::<E>("idinvalid", "Invalid ID"))?,
        ),
    };
    check_update_target::<S, E>(&store, &id, body_id.as_ref()).await?;

    let stored = EntityStore::<E>::find_by_id(&*store, &id)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| bad_request::<E>("idnotfound", "Entity not found"))?;
    let patched = overlay(&stored, patch)
        .map_err(|e| bad_request::<E>("invalidbody", &e.to_string()))?;
    check_valid(&patched)?;

    let saved = EntityStore::<E>::save(&*store, patched)
        .await
        .map_err(internal_error)?;
    let headers = alerts.headers(E::NAME, "updated", &saved_id(&saved));
    Ok((headers, Json(saved)))
}

/// Removes one entity. Entities referencing it keep their reference.
pub async fn delete_entity<S, E>(
    State(store): State<AppState<S>>,
    Extension(alerts): Extension<Alerts>,
    Path(raw_id): Path<String>,
) -> Result<(StatusCode, HeaderMap), ApiError>
where
    S: Store + EntityStore<E>,
    E: Entity,
{
    log::debug!("REST request to delete {} : {}", E::NAME, raw_id);
    let id = parse_id::<E>(&raw_id)?;
    let removed = EntityStore::<E>::delete(&*store, &id)
        .await
        .map_err(internal_error)?;
    if !removed {
        log::debug!("{} '{}' was already gone", E::NAME, raw_id);
    }
    Ok((
        StatusCode::NO_CONTENT,
        alerts.headers(E::NAME, "deleted", &raw_id),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::create_router;
    use crate::model::{Client, ClientRef, Project, Referenceable};
    use crate::seed::samples;
    use crate::store::MemoryStore;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::Router;
    use serde_json::json;
    use tower::ServiceExt;

    fn app(store: Arc<MemoryStore>) -> Router {
        create_router::<MemoryStore>(Alerts::default()).with_state(store)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        respond(app, request).await
    }

    async fn send_text(
        app: &Router,
        method: &str,
        uri: &str,
        body: &str,
    ) -> (StatusCode, HeaderMap, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        respond(app, request).await
    }

    async fn respond(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, value)
    }

    async fn seeded_client(store: &MemoryStore) -> Client {
        EntityStore::<Client>::save(store, samples::client::with_new_data())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_alerts() {
        let store = Arc::new(MemoryStore::new());
        let app = app(store.clone());

        let body = serde_json::to_value(samples::client::with_new_data()).unwrap();
        let (status, headers, created) = send(&app, "POST", "/api/clients", Some(body)).await;

        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().expect("assigned id");
        assert_eq!(headers[header::LOCATION], format!("/api/clients/{}", id).as_str());
        assert_eq!(headers["x-easytaskapp-alert"], "easyTaskApp.client.created");
        assert_eq!(headers["x-easytaskapp-params"], id.to_string().as_str());
        assert_eq!(created["reference"], "Portugal JSON parse");
    }

    #[tokio::test]
    async fn test_create_rejects_existing_id() {
        let app = app(Arc::new(MemoryStore::new()));
        let body = serde_json::to_value(samples::client::with_required_data()).unwrap();

        let (status, _, error) = send(&app, "POST", "/api/clients", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["errorKey"], "idexists");
        assert_eq!(error["entityName"], "client");
    }

    #[tokio::test]
    async fn test_create_reports_validation_and_reference_errors() {
        let store = Arc::new(MemoryStore::new());
        let app = app(store.clone());

        let mut project = samples::project::with_new_data();
        let (status, _, error) = send(
            &app,
            "POST",
            "/api/projects",
            Some(serde_json::to_value(&project).unwrap()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["errorKey"], "validation");
        assert_eq!(error["fieldErrors"][0]["field"], "client");
        assert_eq!(error["fieldErrors"][0]["errorType"], "MissingRequiredField");

        project.client = Some(ClientRef::to(4242));
        let (status, _, error) = send(
            &app,
            "POST",
            "/api/projects",
            Some(serde_json::to_value(&project).unwrap()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["errorKey"], "referencenotfound");
    }

    #[tokio::test]
    async fn test_create_refreshes_reference_display_fields() {
        let store = Arc::new(MemoryStore::new());
        let client = seeded_client(&store).await;
        let app = app(store.clone());

        let project = Project {
            client: Some(ClientRef {
                id: client.id,
                reference: Some("outdated".to_string()),
            }),
            ..samples::project::with_new_data()
        };
        let (status, _, created) = send(
            &app,
            "POST",
            "/api/projects",
            Some(serde_json::to_value(&project).unwrap()),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["client"]["reference"], "Portugal JSON parse");
    }

    #[tokio::test]
    async fn test_update_id_checks() {
        let store = Arc::new(MemoryStore::new());
        let client = seeded_client(&store).await;
        let app = app(store.clone());
        let id = client.id.unwrap();

        let mut body = serde_json::to_value(&client).unwrap();
        body["id"] = Value::Null;
        let (status, _, error) = send(&app, "PUT", &format!("/api/clients/{}", id), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["errorKey"], "idnull");

        let body = serde_json::to_value(&client).unwrap();
        let (_, _, error) =
            send(&app, "PUT", &format!("/api/clients/{}", id + 1), Some(body)).await;
        assert_eq!(error["errorKey"], "idinvalid");

        let ghost = Client {
            id: Some(id + 100),
            ..client.clone()
        };
        let (_, _, error) = send(
            &app,
            "PUT",
            &format!("/api/clients/{}", id + 100),
            Some(serde_json::to_value(&ghost).unwrap()),
        )
        .await;
        assert_eq!(error["errorKey"], "idnotfound");

        let renamed = Client {
            contact: Some("new contact".to_string()),
            ..client
        };
        let (status, headers, updated) = send(
            &app,
            "PUT",
            &format!("/api/clients/{}", id),
            Some(serde_json::to_value(&renamed).unwrap()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["x-easytaskapp-alert"], "easyTaskApp.client.updated");
        assert_eq!(updated["contact"], "new contact");
    }

    #[tokio::test]
    async fn test_partial_update_overlays_non_null_fields() {
        let store = Arc::new(MemoryStore::new());
        let client = seeded_client(&store).await;
        let project = EntityStore::<Project>::save(
            &*store,
            Project {
                client: Some(client.to_reference()),
                ..samples::project::with_new_data()
            },
        )
        .await
        .unwrap();
        let id = project.id.unwrap();
        let app = app(store.clone());

        let patch = json!({
            "id": id,
            "description": "Patched",
            "reference": null,
            "client": null
        });
        let (status, _, patched) =
            send(&app, "PATCH", &format!("/api/projects/{}", id), Some(patch)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched["description"], "Patched");
        assert_eq!(patched["reference"], "wireless");
        assert_eq!(patched["client"]["id"], client.id.unwrap());
    }

    #[tokio::test]
    async fn test_unreadable_bodies_get_keyed_json_errors() {
        let app = app(Arc::new(MemoryStore::new()));

        for body in [r#"{"kind":"Bogus"}"#, r#"{"startDate":"2023-13-45"}"#, "not json"] {
            let (status, headers, error) = send_text(&app, "POST", "/api/projects", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
            assert_eq!(headers[header::CONTENT_TYPE], "application/json");
            assert_eq!(error["errorKey"], "invalidbody");
            assert_eq!(error["entityName"], "project");
            assert!(!error["error"].as_str().unwrap().is_empty());
        }

        let (status, _, error) = send_text(&app, "PUT", "/api/clients/1", "{").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["errorKey"], "invalidbody");
        assert_eq!(error["entityName"], "client");

        let (status, _, error) = send_text(&app, "PATCH", "/api/resources/1", "not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["errorKey"], "invalidbody");
        assert_eq!(error["entityName"], "resource");
    }

    #[tokio::test]
    async fn test_get_unknown_and_malformed_ids() {
        let app = app(Arc::new(MemoryStore::new()));

        let (status, _, _) = send(&app, "GET", "/api/clients/77", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, error) = send(&app, "GET", "/api/resources/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["errorKey"], "idinvalid");
    }

    #[tokio::test]
    async fn test_delete_does_not_cascade() {
        let store = Arc::new(MemoryStore::new());
        let client = seeded_client(&store).await;
        let project = EntityStore::<Project>::save(
            &*store,
            Project {
                client: Some(client.to_reference()),
                ..samples::project::with_new_data()
            },
        )
        .await
        .unwrap();
        let app = app(store.clone());

        let (status, headers, _) = send(
            &app,
            "DELETE",
            &format!("/api/clients/{}", client.id.unwrap()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(headers["x-easytaskapp-alert"], "easyTaskApp.client.deleted");

        let (_, headers, listed) = send(&app, "GET", "/api/projects", None).await;
        assert_eq!(headers["x-total-count"], "1");
        assert_eq!(listed[0]["client"]["id"], client.id.unwrap());
        assert_eq!(listed[0]["id"], project.id.unwrap());
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = app(Arc::new(MemoryStore::new()));
        let (status, _, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[test]
    fn test_alert_names_follow_application_name() {
        let alerts = Alerts::new("otherApp").unwrap();
        assert_eq!(alerts.key("dailyLoad", "created"), "otherApp.dailyLoad.created");
        let headers = alerts.headers("dailyLoad", "created", "42");
        assert_eq!(headers["x-otherapp-alert"], "otherApp.dailyLoad.created");
        assert_eq!(headers["x-otherapp-params"], "42");
    }
}
