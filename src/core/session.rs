use std::sync::Arc;

use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::sync::watch;

use crate::common::{error, info};
use crate::core::directory::{Directory, MemoryDirectory, SecretHasher};
use crate::core::middleware::MiddlewareChain;
use crate::core::storage::{MemoryStorage, Storage};
use crate::core::uow::ResponseReceiver;
use crate::core::{Config, Credential, Identity, Principal, Registration, UnitOfWork};
use crate::ScholarsError;

/// Point in time view of the session.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    loading: bool,
    principal: Arc<Principal>,
}

impl SessionSnapshot {
    pub(crate) fn loading() -> Self {
        Self {
            loading: true,
            principal: Arc::new(Principal::AnonymousUser),
        }
    }

    pub(crate) fn ready(identity: Option<Identity>) -> Self {
        Self {
            loading: false,
            principal: Arc::new(Principal::from(identity)),
        }
    }

    /// Role gated content must not be shown while this is true.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.principal.identity()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_authenticated()
    }
}

#[derive(Default)]
pub struct Builder {
    config: Option<Config>,
    directory: Option<Arc<dyn Directory>>,
    hasher: Option<Arc<SecretHasher>>,
    storage: Option<Arc<dyn Storage>>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: Config) -> Self {
        let mut builder = Builder::new();
        builder.config = Some(config);
        builder
    }

    pub fn directory(mut self, directory: Arc<dyn Directory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Hasher used for new registrations. Must match the one the directory
    /// verifies with.
    pub fn hasher(mut self, hasher: Arc<SecretHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Assemble the session. The returned `Session` has to be driven with
    /// `run`, typically on its own task.
    ///
    /// Without an explicit directory a `MemoryDirectory` seeded from the
    /// config users is used; without storage the session is kept in memory.
    pub fn build(self) -> crate::Result<(SessionHandle, Session)> {
        let config = self.config.unwrap_or_default();

        let hasher = match self.hasher {
            Some(hasher) => hasher,
            None => Arc::new(SecretHasher::new(&config.hasher)?),
        };
        let directory = match self.directory {
            Some(directory) => directory,
            None => Arc::new(
                MemoryDirectory::from_users(&config.users, Arc::clone(&hasher))?
                    .with_latency(config.latency()),
            ),
        };
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(MemoryStorage::new()));

        let (request_send, request_recv) = mpsc::channel(config.request_channel_buffer());
        let (state_send, state_recv) = watch::channel(SessionSnapshot::loading());

        let middlewares = MiddlewareChain::new(
            directory,
            hasher,
            storage,
            config.storage_key(),
            state_send,
        );

        Ok((
            SessionHandle {
                request_send,
                snapshot: state_recv,
            },
            Session {
                request_recv,
                middlewares,
            },
        ))
    }
}

/// The task side of the session. Processes one unit of work at a time
/// until every handle is dropped.
pub struct Session {
    request_recv: Receiver<UnitOfWork>,
    middlewares: MiddlewareChain,
}

impl Session {
    pub async fn run(mut self) {
        info!("Session running");

        while let Some(uow) = self.request_recv.recv().await {
            if let Err(err) = self.middlewares.apply(uow).await {
                error!("Handle uow {}", err);
            }
        }

        info!("Session closed");
    }
}

/// Cheap to clone entry point to the session.
///
/// Reads are served synchronously from the latest snapshot; mutations are
/// queued to the session task.
#[derive(Clone)]
pub struct SessionHandle {
    request_send: Sender<UnitOfWork>,
    snapshot: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// Load the persisted identity, if any, and leave the loading state.
    /// Unreadable storage yields an empty session.
    pub async fn restore(&self) -> crate::Result<Option<Identity>> {
        let (uow, rx) = UnitOfWork::new_restore();
        self.submit(uow, rx).await
    }

    pub async fn login<S1, S2>(&self, email: S1, secret: S2) -> crate::Result<Identity>
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        let (uow, rx) = UnitOfWork::new_login(Credential::new(email, secret));
        self.submit(uow, rx).await
    }

    pub async fn register(&self, registration: Registration) -> crate::Result<Identity> {
        let (uow, rx) = UnitOfWork::new_register(registration);
        self.submit(uow, rx).await
    }

    /// Clear the identity and its persisted copy. Calling it without a
    /// session is fine.
    pub async fn logout(&self) -> crate::Result<()> {
        let (uow, rx) = UnitOfWork::new_logout();
        self.submit(uow, rx).await
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn current(&self) -> Option<Identity> {
        self.snapshot.borrow().identity().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot.borrow().is_loading()
    }

    /// Wait until the session has left the loading state.
    pub async fn ready(&self) -> crate::Result<SessionSnapshot> {
        let mut snapshot = self.snapshot.clone();
        let ready = snapshot
            .wait_for(|s| !s.is_loading())
            .await
            .map_err(|_| ScholarsError::SessionClosed)?;
        Ok(ready.clone())
    }

    async fn submit<Res>(&self, uow: UnitOfWork, rx: ResponseReceiver<Res>) -> crate::Result<Res> {
        self.request_send
            .send(uow)
            .await
            .map_err(|_| ScholarsError::SessionClosed)?;

        rx.await.map_err(|_| ScholarsError::SessionClosed)?
    }
}
