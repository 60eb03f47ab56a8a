use std::fmt;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

use crate::form::bindings::FormBinding;
use crate::model::Entity;
use crate::service::{EntityService, ServiceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading,
    Ready,
    Submitting,
    /// Saved; the caller leaves the edit view. Terminal.
    Navigated,
    /// Loading failed; the session cannot be used. Terminal.
    Failed,
    /// Torn down; late results are discarded. Terminal.
    Disposed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Loading => "loading",
            SessionState::Ready => "ready",
            SessionState::Submitting => "submitting",
            SessionState::Navigated => "navigated",
            SessionState::Failed => "failed",
            SessionState::Disposed => "disposed",
        };
        f.write_str(name)
    }
}

/// What an observer of the session sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStatus {
    pub state: SessionState,
    pub is_saving: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update,
}

/// Payload handed out by [`FormSession::begin_submit`].
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest<E> {
    pub mode: SaveMode,
    pub payload: E,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<E> {
    /// Persisted; the session is now `Navigated`.
    Saved(E),
    /// Not accepted in the given state. Nothing was sent.
    Rejected(SessionState),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to load the form: {0}")]
    Load(#[source] ServiceError),
    #[error("failed to save {entity}: {source}")]
    Save {
        entity: &'static str,
        #[source]
        source: ServiceError,
    },
    #[error("the session was torn down")]
    Disposed,
    #[error("not allowed while the session is {0}")]
    InvalidState(SessionState),
}

/// Tears a session down from outside, e.g. when the view goes away while
/// its data is still loading.
#[derive(Clone)]
pub struct TeardownHandle(Arc<watch::Sender<bool>>);

impl TeardownHandle {
    pub fn tear_down(&self) {
        self.0.send_replace(true);
    }
}

async fn teardown_requested(receiver: &mut watch::Receiver<bool>) {
    if receiver.wait_for(|torn_down| *torn_down).await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// One create-or-edit interaction, from load to navigate-away.
pub struct FormSession<B: FormBinding> {
    binding: B,
    service: Arc<dyn EntityService<B::Entity>>,
    state: SessionState,
    is_saving: bool,
    entity: Option<B::Entity>,
    collections: Option<B::Collections>,
    teardown_tx: Arc<watch::Sender<bool>>,
    teardown_rx: watch::Receiver<bool>,
    status: watch::Sender<SessionStatus>,
}

impl<B: FormBinding> FormSession<B> {
    pub fn new(binding: B, service: Arc<dyn EntityService<B::Entity>>) -> Self {
        let (teardown_tx, teardown_rx) = watch::channel(false);
        let (status, _) = watch::channel(SessionStatus {
            state: SessionState::Idle,
            is_saving: false,
        });

        Self {
            binding,
            service,
            state: SessionState::Idle,
            is_saving: false,
            entity: None,
            collections: None,
            teardown_tx: Arc::new(teardown_tx),
            teardown_rx,
            status,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn binding(&self) -> &B {
        &self.binding
    }

    /// The entity being edited; `None` until loaded.
    pub fn entity(&self) -> Option<&B::Entity> {
        self.entity.as_ref()
    }

    /// Reconciled candidate collections; `None` until loaded.
    pub fn collections(&self) -> Option<&B::Collections> {
        self.collections.as_ref()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    pub fn teardown_handle(&self) -> TeardownHandle {
        TeardownHandle(self.teardown_tx.clone())
    }

    fn torn_down(&self) -> bool {
        *self.teardown_rx.borrow()
    }

    fn transition(&mut self, state: SessionState) {
        log::debug!(
            "{} form session: {} -> {}",
            B::Entity::NAME,
            self.state,
            state
        );
        self.state = state;
        self.status.send_replace(SessionStatus {
            state,
            is_saving: self.is_saving,
        });
    }

    fn check_disposed(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Disposed {
            return Err(SessionError::Disposed);
        }
        if self.torn_down() {
            self.is_saving = false;
            self.transition(SessionState::Disposed);
            return Err(SessionError::Disposed);
        }
        Ok(())
    }

    /// Resolve the owning entity and fetch every candidate collection.
    ///
    /// `route` yields the entity to edit, or `None` to create a new one. The
    /// session becomes `Ready` only once the route and every fetch have
    /// completed; a teardown in the meantime discards all of them.
    pub async fn load<F>(&mut self, route: F) -> Result<(), SessionError>
    where
        F: Future<Output = Result<Option<B::Entity>, ServiceError>> + Send,
    {
        self.check_disposed()?;
        if self.state != SessionState::Idle {
            return Err(SessionError::InvalidState(self.state));
        }
        self.transition(SessionState::Loading);

        let mut teardown = self.teardown_rx.clone();
        let outcome = {
            let fan_in = async { tokio::try_join!(route, self.binding.fetch()) };
            tokio::select! {
                biased;
                _ = teardown_requested(&mut teardown) => None,
                result = fan_in => Some(result),
            }
        };

        self.check_disposed()?;
        match outcome {
            None => {
                self.transition(SessionState::Disposed);
                Err(SessionError::Disposed)
            }
            Some(Err(e)) => {
                log::warn!("Failed to load {} form: {}", B::Entity::NAME, e);
                self.transition(SessionState::Failed);
                Err(SessionError::Load(e))
            }
            Some(Ok((entity, fetched))) => {
                let entity = entity.unwrap_or_else(<B::Entity as Entity>::draft);
                let collections = self.binding.reconcile(fetched, &entity);
                self.entity = Some(entity);
                self.collections = Some(collections);
                self.transition(SessionState::Ready);
                Ok(())
            }
        }
    }

    /// Change form-editable fields of the entity.
    pub fn edit<F>(&mut self, change: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut B::Entity),
    {
        self.check_disposed()?;
        if self.state != SessionState::Ready {
            return Err(SessionError::InvalidState(self.state));
        }
        if let Some(entity) = self.entity.as_mut() {
            change(entity);
        }
        Ok(())
    }

    /// First half of a submit: move to `Submitting` and hand out the payload.
    ///
    /// Returns `None`, without touching the session, unless it is `Ready`.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest<B::Entity>> {
        if self.check_disposed().is_err() {
            return None;
        }
        if self.state != SessionState::Ready {
            log::debug!(
                "Ignoring submit of {} form while {}",
                B::Entity::NAME,
                self.state
            );
            return None;
        }

        let payload = self.entity.clone()?;
        let mode = if payload.is_draft() {
            SaveMode::Create
        } else {
            SaveMode::Update
        };
        self.is_saving = true;
        self.transition(SessionState::Submitting);
        Some(SubmitRequest { mode, payload })
    }

    /// Second half of a submit: record the service's answer.
    ///
    /// Success is terminal (`Navigated`). Failure returns to `Ready` with the
    /// entity and collections untouched.
    pub fn finish_submit(
        &mut self,
        result: Result<B::Entity, ServiceError>,
    ) -> Result<B::Entity, SessionError> {
        self.check_disposed()?;
        if self.state != SessionState::Submitting {
            return Err(SessionError::InvalidState(self.state));
        }

        self.is_saving = false;
        match result {
            Ok(saved) => {
                self.transition(SessionState::Navigated);
                Ok(saved)
            }
            Err(source) => {
                log::warn!("Failed to save {}: {}", B::Entity::NAME, source);
                self.transition(SessionState::Ready);
                Err(SessionError::Save {
                    entity: B::Entity::NAME,
                    source,
                })
            }
        }
    }

    /// Save the entity: create when it is a draft, update otherwise.
    pub async fn submit(&mut self) -> Result<SubmitOutcome<B::Entity>, SessionError> {
        let Some(request) = self.begin_submit() else {
            return Ok(SubmitOutcome::Rejected(self.state));
        };

        let result = match request.mode {
            SaveMode::Create => self.service.create(request.payload).await,
            SaveMode::Update => self.service.update(request.payload).await,
        };
        self.finish_submit(result).map(SubmitOutcome::Saved)
    }

    pub fn dispose(&mut self) {
        self.teardown_tx.send_replace(true);
        if self.state != SessionState::Disposed {
            self.is_saving = false;
            self.transition(SessionState::Disposed);
        }
    }
}
