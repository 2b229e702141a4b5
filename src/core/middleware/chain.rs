use std::sync::Arc;

use tokio::sync::watch;

use crate::common::Result;
use crate::core::directory::{Directory, SecretHasher};
use crate::core::middleware::{Authenticator, Keeper, Logger, Middleware};
use crate::core::storage::Storage;
use crate::core::{SessionSnapshot, UnitOfWork};

pub(crate) struct MiddlewareChain {
    root: Logger<Authenticator<Keeper>>,
}

impl MiddlewareChain {
    pub(crate) fn new(
        directory: Arc<dyn Directory>,
        hasher: Arc<SecretHasher>,
        storage: Arc<dyn Storage>,
        storage_key: &str,
        state: watch::Sender<SessionSnapshot>,
    ) -> Self {
        let keeper = Keeper::new(storage, storage_key, state);

        let authenticator = Authenticator::new(directory, hasher, keeper);

        let logger = Logger::new(authenticator);

        Self { root: logger }
    }

    pub(crate) async fn apply(&mut self, uow: UnitOfWork) -> Result<()> {
        self.root.apply(uow).await
    }
}
