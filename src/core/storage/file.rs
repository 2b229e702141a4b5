use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::common::{trace, Error, ErrorKind};
use crate::core::storage::Storage;
use crate::Result;

/// Storage keeping one file per key under a root directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never observes a half written value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root_dir: PathBuf,
}

impl FileStorage {
    const EXTENSION: &'static str = "json";

    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(Error::from(ErrorKind::Internal(format!(
                "invalid storage key {:?}",
                key
            )))
            .into());
        }
        Ok(self
            .root_dir
            .join(format!("{}.{}", key, FileStorage::EXTENSION)))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key)?;
        match fs::read_to_string(&path).await.map_err(Error::from) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key)?;
        let tmp = path.with_extension("tmp");

        fs::create_dir_all(&self.root_dir).await?;
        fs::write(&tmp, value.as_bytes()).await?;
        fs::rename(&tmp, &path).await?;

        trace!(path = %path.display(), "Stored");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path(key)?;
        match fs::remove_file(&path).await.map_err(Error::from) {
            Ok(()) => Ok(()),
            Err(err) if err.is_not_found() => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.get("scholars.user").await.unwrap(), None);

        storage.set("scholars.user", r#"{"id":"user-1"}"#).await.unwrap();
        assert_eq!(
            storage.get("scholars.user").await.unwrap().as_deref(),
            Some(r#"{"id":"user-1"}"#)
        );
        assert!(dir.path().join("nested/scholars.user.json").exists());
        assert!(!dir.path().join("nested/scholars.user.tmp").exists());

        storage.remove("scholars.user").await.unwrap();
        assert_eq!(storage.get("scholars.user").await.unwrap(), None);
        // Second remove is a no-op.
        storage.remove("scholars.user").await.unwrap();
    }

    #[tokio::test]
    async fn overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set("k", "first").await.unwrap();
        storage.set("k", "second").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn reject_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(storage.set(key, "v").await.is_err(), "key {:?}", key);
        }
    }
}
