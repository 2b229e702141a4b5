use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::common::{debug, info, warn, Error, ErrorKind, Result};
use crate::core::middleware::Middleware;
use crate::core::storage::Storage;
use crate::core::{Identity, SessionSnapshot, UnitOfWork};
use crate::ScholarsError;

/// Owns the current identity and its persisted copy.
///
/// The keeper is the only writer of both the session snapshot and the
/// storage key.
pub(crate) struct Keeper {
    storage: Arc<dyn Storage>,
    storage_key: String,
    state: watch::Sender<SessionSnapshot>,
}

impl Keeper {
    pub(crate) fn new(
        storage: Arc<dyn Storage>,
        storage_key: impl Into<String>,
        state: watch::Sender<SessionSnapshot>,
    ) -> Self {
        Self {
            storage,
            storage_key: storage_key.into(),
            state,
        }
    }

    fn publish(&self, identity: Option<Identity>) {
        self.state.send_replace(SessionSnapshot::ready(identity));
    }

    // Never fails. Anything unreadable is dropped and treated as no session.
    async fn load_persisted(&self) -> Option<Identity> {
        let raw = match self.storage.get(&self.storage_key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key=%self.storage_key, "No persisted session");
                return None;
            }
            Err(err) => {
                warn!(key=%self.storage_key, %err, "Read persisted session");
                self.discard().await;
                return None;
            }
        };

        match serde_json::from_str::<Identity>(&raw) {
            Ok(identity) => {
                info!(id=%identity.id, role=%identity.role, "Session restored");
                Some(identity)
            }
            Err(err) => {
                let err = Error::from(ErrorKind::StorageCorrupt {
                    key: self.storage_key.clone(),
                    description: err.to_string(),
                });
                warn!(%err, "Discard persisted session");
                debug!(backtrace=?err.backtrace(), "Corrupt session");
                self.discard().await;
                None
            }
        }
    }

    async fn persist(&self, identity: &Identity) -> crate::Result<()> {
        let raw = serde_json::to_string(identity).map_err(Error::from)?;
        self.storage.set(&self.storage_key, &raw).await
    }

    async fn discard(&self) {
        if let Err(err) = self.storage.remove(&self.storage_key).await {
            warn!(key=%self.storage_key, %err, "Remove persisted session");
        }
    }
}

#[async_trait]
impl Middleware for Keeper {
    async fn apply(&mut self, uow: UnitOfWork) -> Result<()> {
        match uow {
            UnitOfWork::Restore(mut restore) => {
                let identity = self.load_persisted().await;
                self.publish(identity.clone());
                restore.send_response(Ok(identity))
            }
            UnitOfWork::Establish(mut establish) => {
                let identity = establish.request.clone();

                // Published only once the persisted copy matches.
                match self.persist(&identity).await {
                    Ok(()) => {
                        self.publish(Some(identity.clone()));
                        establish.send_response(Ok(identity))
                    }
                    Err(err) => {
                        warn!(id=%identity.id, %err, "Persist session, keep previous state");
                        establish.send_response(Err(err))
                    }
                }
            }
            UnitOfWork::Logout(mut logout) => {
                let authenticated = self.state.borrow().is_authenticated();
                self.publish(None);

                let result = self.storage.remove(&self.storage_key).await;
                if authenticated {
                    info!("Logged out");
                } else {
                    debug!("Logout without session");
                }
                logout.send_response(result)
            }
            UnitOfWork::Login(mut login) => login.send_response(Err(ScholarsError::Internal(
                "login reached keeper without authentication".to_owned(),
            ))),
            UnitOfWork::Register(mut register) => {
                register.send_response(Err(ScholarsError::Internal(
                    "register reached keeper without authentication".to_owned(),
                )))
            }
        }
    }
}
