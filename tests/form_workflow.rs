use easytask_admin::config::AppConfig;
use easytask_admin::form::{
    DeliverableForm, EstimationForm, FormSession, ListView, ProjectForm, ResourceForm,
    SessionError, SessionState, SubmitOutcome,
};
use easytask_admin::service::{resolve_route, EntityLookup, ReferenceService, RestService, ServiceError};
use easytask_admin::{
    build_app, Activity, Client, Deliverable, Entity, Estimation, EstimationTarget, MemoryStore,
    Project, ProjectKind, ProjectRef, Referenceable, Resource,
};
use reqwest::Client as HttpClient;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serve the application over an in-memory store on an ephemeral port.
async fn start_server() -> String {
    let app = build_app(Arc::new(MemoryStore::new()), &AppConfig::default()).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", address)
}

struct Services {
    clients: RestService<Client>,
    projects: RestService<Project>,
    deliverables: RestService<Deliverable>,
    activities: RestService<Activity>,
    estimations: RestService<Estimation>,
    resources: RestService<Resource>,
}

impl Services {
    fn new(base_url: &str) -> Self {
        let http = HttpClient::new();
        Self {
            clients: RestService::new(http.clone(), base_url),
            projects: RestService::new(http.clone(), base_url),
            deliverables: RestService::new(http.clone(), base_url),
            activities: RestService::new(http.clone(), base_url),
            estimations: RestService::new(http.clone(), base_url),
            resources: RestService::new(http, base_url),
        }
    }
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

async fn create_client(services: &Services, reference: &str) -> Client {
    use easytask_admin::service::EntityService;
    services
        .clients
        .create(Client {
            reference: text(reference),
            last_name: text("Martin"),
            first_name: text("Claire"),
            ..Client::draft()
        })
        .await
        .unwrap()
}

async fn create_project(services: &Services, client: &Client, reference: &str) -> Project {
    use easytask_admin::service::EntityService;
    services
        .projects
        .create(Project {
            reference: text(reference),
            kind: Some(ProjectKind::External),
            description: text("Customer portal"),
            start_date: chrono::NaiveDate::from_ymd_opt(2023, 1, 9),
            client: Some(client.to_reference()),
            ..Project::draft()
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_project_through_a_form_session() {
    let base_url = start_server().await;
    let services = Services::new(&base_url);
    let acme = create_client(&services, "ACME").await;

    let binding = ProjectForm {
        clients: Arc::new(services.clients.clone()),
    };
    let mut session = FormSession::new(binding, Arc::new(services.projects.clone()));
    session
        .load(resolve_route(&services.projects, None))
        .await
        .unwrap();

    assert_eq!(session.state(), SessionState::Ready);
    assert!(session.entity().unwrap().is_draft());
    let candidates = session.collections().unwrap().clients.clone();
    assert_eq!(candidates, vec![acme.clone()]);

    session
        .edit(|project| {
            project.reference = text("PRJ-PORTAL");
            project.kind = Some(ProjectKind::Internal);
            project.description = text("Self-service portal");
            project.start_date = chrono::NaiveDate::from_ymd_opt(2023, 2, 1);
            project.client = Some(candidates[0].to_reference());
        })
        .unwrap();

    let SubmitOutcome::Saved(saved) = session.submit().await.unwrap() else {
        panic!("project was not saved");
    };
    assert_eq!(session.state(), SessionState::Navigated);
    assert!(saved.id.is_some());

    let stored = services.projects.find(saved.id.as_ref().unwrap()).await.unwrap();
    assert_eq!(stored, saved);
    assert_eq!(stored.client.and_then(|c| c.reference), text("ACME"));
}

#[tokio::test]
async fn test_rejected_save_keeps_the_session_editable() {
    let base_url = start_server().await;
    let services = Services::new(&base_url);

    let binding = ProjectForm {
        clients: Arc::new(services.clients.clone()),
    };
    let mut session = FormSession::new(binding, Arc::new(services.projects.clone()));
    session.load(async { Ok(None) }).await.unwrap();
    session
        .edit(|project| project.reference = text("PRJ-NO-CLIENT"))
        .unwrap();

    let err = session.submit().await.unwrap_err();
    match err {
        SessionError::Save {
            entity: "project",
            source: ServiceError::Rejected {
                status: 400,
                error_key,
                ..
            },
        } => assert_eq!(error_key.as_deref(), Some("validation")),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(session.state(), SessionState::Ready);
    assert!(!session.is_saving());
    assert_eq!(
        session.entity().and_then(|p| p.reference.clone()),
        text("PRJ-NO-CLIENT")
    );
}

#[tokio::test]
async fn test_edit_session_keeps_attached_reference_selectable() {
    let base_url = start_server().await;
    let services = Services::new(&base_url);
    let acme = create_client(&services, "ACME").await;
    let portal = create_project(&services, &acme, "PRJ-PORTAL").await;
    let tools = create_project(&services, &acme, "PRJ-TOOLS").await;

    let deliverable = {
        use easytask_admin::service::EntityService;
        services
            .deliverables
            .create(Deliverable {
                reference: text("LIV-1"),
                start_date: chrono::NaiveDate::from_ymd_opt(2023, 1, 10),
                description: text("Mockups"),
                project: Some(ProjectRef::to(portal.id.unwrap())),
                ..Deliverable::draft()
            })
            .await
            .unwrap()
    };
    assert_eq!(
        deliverable.project.as_ref().and_then(|p| p.reference.clone()),
        text("PRJ-PORTAL")
    );

    let binding = DeliverableForm {
        projects: Arc::new(services.projects.clone()),
    };
    let mut session = FormSession::new(binding, Arc::new(services.deliverables.clone()));
    session
        .load(resolve_route(&services.deliverables, deliverable.id.as_ref()))
        .await
        .unwrap();

    let projects = &session.collections().unwrap().projects;
    let ids: Vec<_> = projects.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![portal.id, tools.id]);
    let attached = session.entity().unwrap().project.clone();
    let selected: Vec<_> = projects
        .iter()
        .filter(|p| easytask_admin::same_identity(Some(*p), attached.as_ref()))
        .collect();
    assert_eq!(selected, vec![&portal]);

    session
        .edit(|d| d.project = Some(tools.to_reference()))
        .unwrap();
    let SubmitOutcome::Saved(saved) = session.submit().await.unwrap() else {
        panic!("deliverable was not saved");
    };
    assert_eq!(saved.id, deliverable.id);
    assert_eq!(saved.project, Some(tools.to_reference()));
}

#[tokio::test]
async fn test_estimation_form_fans_in_all_collections() {
    let base_url = start_server().await;
    let services = Services::new(&base_url);
    let acme = create_client(&services, "ACME").await;
    let portal = create_project(&services, &acme, "PRJ-PORTAL").await;

    let binding = EstimationForm {
        activities: Arc::new(services.activities.clone()),
        projects: Arc::new(services.projects.clone()),
        deliverables: Arc::new(services.deliverables.clone()),
    };
    let mut session = FormSession::new(binding, Arc::new(services.estimations.clone()));
    session.load(async { Ok(None) }).await.unwrap();

    let collections = session.collections().unwrap();
    assert!(collections.activities.is_empty());
    assert_eq!(collections.projects, vec![portal.clone()]);
    assert!(collections.deliverables.is_empty());

    session
        .edit(|e| {
            e.day_value = Some(12.5);
            e.target = Some(EstimationTarget::Project);
            e.project = Some(portal.to_reference());
        })
        .unwrap();
    let SubmitOutcome::Saved(saved) = session.submit().await.unwrap() else {
        panic!("estimation was not saved");
    };
    assert!(saved.id.is_some());
    assert_eq!(
        saved.project.and_then(|p| p.reference),
        text("PRJ-PORTAL")
    );
}

#[tokio::test]
async fn test_list_view_and_partial_update() {
    let base_url = start_server().await;
    let services = Services::new(&base_url);

    let mut session = FormSession::new(ResourceForm::new(), Arc::new(services.resources.clone()));
    session.load(async { Ok(None) }).await.unwrap();
    session
        .edit(|r| {
            r.last_name = text("Durand");
            r.first_name = text("Lea");
        })
        .unwrap();
    let SubmitOutcome::Saved(lea) = session.submit().await.unwrap() else {
        panic!("resource was not saved");
    };

    let patched = services
        .resources
        .partial_update(Resource {
            id: lea.id,
            last_name: None,
            first_name: text("Léa"),
        })
        .await
        .unwrap();
    assert_eq!(patched.last_name, text("Durand"));
    assert_eq!(patched.first_name, text("Léa"));

    let resources = Arc::new(services.resources.clone());
    let mut list = ListView::<Resource, _>::new(resources.clone());
    assert_eq!(list.load().await.unwrap(), &[patched.clone()]);

    let remaining = list.delete(lea.id.as_ref().unwrap()).await.unwrap();
    assert!(remaining.is_empty());

    let err = resources.find(lea.id.as_ref().unwrap()).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "resource", .. }));
    assert!(resources.query().await.unwrap().is_empty());
}
