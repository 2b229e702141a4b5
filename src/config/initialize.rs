use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;

use crate::common::{debug, Error};
use crate::config::Config;
use crate::core::access::Navigator;
use crate::core::storage::{FileStorage, MemoryStorage, Storage};
use crate::core::{self, SessionHandle};
use crate::Result;

/// Wires configuration into a running session.
#[derive(Debug)]
pub struct Initializer {
    pub config: Config,
    storage_dir: Option<PathBuf>,
}

impl Initializer {
    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            storage_dir: None,
        }
    }

    pub async fn load_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let f = fs::File::open(path).await?;
        let config = serde_yaml::from_reader::<_, Config>(f.into_std().await)
            .map_err(Error::from)?;

        Ok(Initializer::from_config(config))
    }

    /// Directory where the session is persisted. Without one the session
    /// only lives as long as the process.
    pub fn set_storage_dir(&mut self, storage_dir: impl Into<PathBuf>) {
        self.storage_dir = Some(storage_dir.into());
    }

    /// Spawn the session task and restore the persisted identity.
    /// Must be called from within a tokio runtime.
    pub async fn init_session(self) -> Result<(SessionHandle, core::access::Config)> {
        let Config { session, access } = self.config;

        let storage: Arc<dyn Storage> = match self.storage_dir {
            Some(dir) => {
                debug!(dir = %dir.display(), "Use file storage");
                Arc::new(FileStorage::new(dir))
            }
            None => Arc::new(MemoryStorage::new()),
        };

        let (handle, session) = core::Builder::from_config(session)
            .storage(storage)
            .build()?;

        tokio::spawn(session.run());

        handle.restore().await?;

        Ok((handle, access))
    }

    /// Like `init_session`, returning a navigator configured from the
    /// access section.
    pub async fn init_navigator(self) -> Result<Navigator> {
        let (handle, access) = self.init_session().await?;

        Ok(
            Navigator::new(handle, access.route_table(), access.guard())
                .with_post_login(access.post_login()),
        )
    }
}
