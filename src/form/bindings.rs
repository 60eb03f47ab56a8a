use std::marker::PhantomData;
use std::sync::Arc;

use crate::logic::reconcile_reference;
use crate::model::{
    Activity, Client, DailyLoad, Deliverable, Entity, Estimation, Maintenance, Project, Resource,
};
use crate::service::{ReferenceService, ServiceError};

/// Relationship wiring of one update form: which candidate collections it
/// fetches and how they are reconciled with the edited entity.
#[async_trait::async_trait]
pub trait FormBinding: Send + Sync {
    type Entity: Entity;
    /// Raw candidate collections, one per relationship field.
    type Fetched: Send;
    /// Reconciled collections handed to the caller.
    type Collections: Send + Sync;

    /// Fetch every candidate collection. The fetches are independent and
    /// this completes only once all of them have.
    async fn fetch(&self) -> Result<Self::Fetched, ServiceError>;

    fn reconcile(&self, fetched: Self::Fetched, entity: &Self::Entity) -> Self::Collections;
}

/// Binding for forms without relationship fields.
pub struct PlainForm<E>(PhantomData<fn() -> E>);

impl<E> PlainForm<E> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Default for PlainForm<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<E: Entity> FormBinding for PlainForm<E> {
    type Entity = E;
    type Fetched = ();
    type Collections = ();

    async fn fetch(&self) -> Result<(), ServiceError> {
        Ok(())
    }

    fn reconcile(&self, _fetched: (), _entity: &E) {}
}

pub type ActivityForm = PlainForm<Activity>;
pub type ClientForm = PlainForm<Client>;
pub type ResourceForm = PlainForm<Resource>;

pub struct DailyLoadForm {
    pub resources: Arc<dyn ReferenceService<Resource>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyLoadCollections {
    pub resources: Vec<Resource>,
}

#[async_trait::async_trait]
impl FormBinding for DailyLoadForm {
    type Entity = DailyLoad;
    type Fetched = Vec<Resource>;
    type Collections = DailyLoadCollections;

    async fn fetch(&self) -> Result<Vec<Resource>, ServiceError> {
        self.resources.query().await
    }

    fn reconcile(&self, fetched: Vec<Resource>, entity: &DailyLoad) -> DailyLoadCollections {
        DailyLoadCollections {
            resources: reconcile_reference(&fetched, entity.resource.as_ref()),
        }
    }
}

pub struct MaintenanceForm {
    pub resources: Arc<dyn ReferenceService<Resource>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceCollections {
    pub resources: Vec<Resource>,
}

#[async_trait::async_trait]
impl FormBinding for MaintenanceForm {
    type Entity = Maintenance;
    type Fetched = Vec<Resource>;
    type Collections = MaintenanceCollections;

    async fn fetch(&self) -> Result<Vec<Resource>, ServiceError> {
        self.resources.query().await
    }

    fn reconcile(&self, fetched: Vec<Resource>, entity: &Maintenance) -> MaintenanceCollections {
        MaintenanceCollections {
            resources: reconcile_reference(&fetched, entity.resource.as_ref()),
        }
    }
}

pub struct DeliverableForm {
    pub projects: Arc<dyn ReferenceService<Project>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliverableCollections {
    pub projects: Vec<Project>,
}

#[async_trait::async_trait]
impl FormBinding for DeliverableForm {
    type Entity = Deliverable;
    type Fetched = Vec<Project>;
    type Collections = DeliverableCollections;

    async fn fetch(&self) -> Result<Vec<Project>, ServiceError> {
        self.projects.query().await
    }

    fn reconcile(&self, fetched: Vec<Project>, entity: &Deliverable) -> DeliverableCollections {
        DeliverableCollections {
            projects: reconcile_reference(&fetched, entity.project.as_ref()),
        }
    }
}

pub struct ProjectForm {
    pub clients: Arc<dyn ReferenceService<Client>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCollections {
    pub clients: Vec<Client>,
}

#[async_trait::async_trait]
impl FormBinding for ProjectForm {
    type Entity = Project;
    type Fetched = Vec<Client>;
    type Collections = ProjectCollections;

    async fn fetch(&self) -> Result<Vec<Client>, ServiceError> {
        self.clients.query().await
    }

    fn reconcile(&self, fetched: Vec<Client>, entity: &Project) -> ProjectCollections {
        ProjectCollections {
            clients: reconcile_reference(&fetched, entity.client.as_ref()),
        }
    }
}

pub struct EstimationForm {
    pub activities: Arc<dyn ReferenceService<Activity>>,
    pub projects: Arc<dyn ReferenceService<Project>>,
    pub deliverables: Arc<dyn ReferenceService<Deliverable>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EstimationCollections {
    pub activities: Vec<Activity>,
    pub projects: Vec<Project>,
    pub deliverables: Vec<Deliverable>,
}

#[async_trait::async_trait]
impl FormBinding for EstimationForm {
    type Entity = Estimation;
    type Fetched = (Vec<Activity>, Vec<Project>, Vec<Deliverable>);
    type Collections = EstimationCollections;

    async fn fetch(&self) -> Result<Self::Fetched, ServiceError> {
        tokio::try_join!(
            self.activities.query(),
            self.projects.query(),
            self.deliverables.query()
        )
    }

    fn reconcile(&self, fetched: Self::Fetched, entity: &Estimation) -> EstimationCollections {
        let (activities, projects, deliverables) = fetched;
        EstimationCollections {
            activities: reconcile_reference(&activities, entity.activity.as_ref()),
            projects: reconcile_reference(&projects, entity.project.as_ref()),
            deliverables: reconcile_reference(&deliverables, entity.deliverable.as_ref()),
        }
    }
}
