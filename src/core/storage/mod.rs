mod file;
pub use self::file::FileStorage;

mod memory;
pub use self::memory::MemoryStorage;

use async_trait::async_trait;

use crate::Result;

/// Durable client side key value storage.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
