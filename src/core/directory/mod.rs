mod hasher;
pub use self::hasher::{HasherConfig, SecretHash, SecretHasher};

mod memory;
pub use self::memory::MemoryDirectory;

mod record;
pub use self::record::DirectoryRecord;

use async_trait::async_trait;

use crate::Result;

/// User directory the session authenticates against.
///
/// Emails are unique and compared case-insensitively. Implementations may
/// talk to a remote service, so every call is asynchronous.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Record whose email matches and whose secret verifies, if any.
    async fn find_by_email_and_secret(
        &self,
        email: &str,
        secret: &str,
    ) -> Result<Option<DirectoryRecord>>;

    async fn exists_by_email(&self, email: &str) -> Result<bool>;

    async fn append(&self, record: DirectoryRecord) -> Result<()>;
}

#[cfg(test)]
pub(crate) use self::hasher::tests::cheap_hasher;
