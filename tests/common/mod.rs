#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use scholars::core::directory::{
    Directory, DirectoryRecord, HasherConfig, MemoryDirectory, SecretHasher,
};
use scholars::core::storage::{MemoryStorage, Storage};
use scholars::core::{Builder, Role, SessionHandle, UserEntry};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

// Minimal argon2 cost, tests only need the scheme not the strength.
pub fn hasher() -> Arc<SecretHasher> {
    let mut config = HasherConfig::default();
    config.set_memory_kib(Some(8));
    config.set_iterations(Some(1));
    config.set_parallelism(Some(1));
    Arc::new(SecretHasher::new(&config).unwrap())
}

pub fn directory(users: &[UserEntry], hasher: Arc<SecretHasher>) -> MemoryDirectory {
    MemoryDirectory::from_users(users, hasher).unwrap()
}

pub fn student(email: &str, password: &str) -> UserEntry {
    UserEntry::new("Student", email, password, Role::Student)
}

/// Spawn a session over `directory` and `storage`. Call inside a runtime.
pub fn spawn_session(
    directory: Arc<dyn Directory>,
    hasher: Arc<SecretHasher>,
    storage: Arc<dyn Storage>,
) -> SessionHandle {
    let (handle, session) = Builder::new()
        .directory(directory)
        .hasher(hasher)
        .storage(storage)
        .build()
        .unwrap();
    tokio::spawn(session.run());
    handle
}

/// Directory wrapper counting every call that reaches it.
#[derive(Clone)]
pub struct CountingDirectory {
    inner: MemoryDirectory,
    calls: Arc<AtomicUsize>,
}

impl CountingDirectory {
    pub fn new(inner: MemoryDirectory) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Directory for CountingDirectory {
    async fn find_by_email_and_secret(
        &self,
        email: &str,
        secret: &str,
    ) -> scholars::Result<Option<DirectoryRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_email_and_secret(email, secret).await
    }

    async fn exists_by_email(&self, email: &str) -> scholars::Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.exists_by_email(email).await
    }

    async fn append(&self, record: DirectoryRecord) -> scholars::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.append(record).await
    }
}

/// Memory storage whose writes can be switched to fail.
#[derive(Clone, Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    fail_writes: Arc<AtomicBool>,
}

impl FlakyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Storage for FlakyStorage {
    async fn get(&self, key: &str) -> scholars::Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> scholars::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(scholars::ScholarsError::Storage("disk full".to_owned()));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> scholars::Result<()> {
        self.inner.remove(key).await
    }
}
