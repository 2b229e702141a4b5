use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Duration;

use crate::common::{debug, trace};
use crate::core::directory::{Directory, DirectoryRecord, SecretHasher};
use crate::core::UserEntry;
use crate::{Result, ScholarsError};

/// Directory kept in process memory.
///
/// Clones share the same table. `latency` is slept before each lookup to
/// stand in for a network round trip.
#[derive(Clone)]
pub struct MemoryDirectory {
    records: Arc<RwLock<Vec<DirectoryRecord>>>,
    hasher: Arc<SecretHasher>,
    latency: Duration,
}

impl MemoryDirectory {
    pub fn new(hasher: Arc<SecretHasher>) -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            hasher,
            latency: Duration::ZERO,
        }
    }

    /// Build a directory holding `users`, hashing their secrets.
    /// Entries without an id get `user-<n>` by position.
    pub fn from_users(users: &[UserEntry], hasher: Arc<SecretHasher>) -> Result<Self> {
        let records = users
            .iter()
            .enumerate()
            .map(|(i, user)| -> Result<DirectoryRecord> {
                let id = user
                    .id
                    .clone()
                    .unwrap_or_else(|| format!("user-{}", i + 1));
                let secret_hash = hasher.hash(&user.password)?;
                Ok(
                    DirectoryRecord::new(id, &user.name, &user.email, user.role, secret_hash)
                        .with_profile(user.profile.clone()),
                )
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(users = records.len(), "Seed memory directory");

        Ok(Self {
            records: Arc::new(RwLock::new(records)),
            hasher,
            latency: Duration::ZERO,
        })
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn records(&self) -> Vec<DirectoryRecord> {
        self.records.read().await.clone()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            trace!(latency = ?self.latency, "Simulate directory latency");
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn find_by_email_and_secret(
        &self,
        email: &str,
        secret: &str,
    ) -> Result<Option<DirectoryRecord>> {
        self.simulate_latency().await;

        let candidate = {
            let records = self.records.read().await;
            records.iter().find(|r| r.email_matches(email)).cloned()
        };

        // Verification is CPU bound, run it on the blocking pool. Unknown
        // emails verify against the decoy so a miss costs the same.
        let hasher = Arc::clone(&self.hasher);
        let secret = secret.to_owned();
        let found = tokio::task::spawn_blocking(move || match candidate {
            Some(record) => hasher
                .verify(&secret, record.secret_hash())
                .then_some(record),
            None => {
                hasher.verify_decoy(&secret);
                None
            }
        })
        .await
        .map_err(|err| ScholarsError::Internal(format!("verify secret: {}", err)))?;

        Ok(found)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        self.simulate_latency().await;

        let records = self.records.read().await;
        Ok(records.iter().any(|r| r.email_matches(email)))
    }

    async fn append(&self, record: DirectoryRecord) -> Result<()> {
        let mut records = self.records.write().await;
        debug!(id = %record.id, "Append directory record");
        records.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::directory::cheap_hasher;
    use crate::core::Role;

    fn entry(email: &str, password: &str, role: Role) -> UserEntry {
        UserEntry::new("Test User", email, password, role)
    }

    fn directory(users: &[UserEntry]) -> MemoryDirectory {
        MemoryDirectory::from_users(users, Arc::new(cheap_hasher())).unwrap()
    }

    #[tokio::test]
    async fn find_matches_email_case_insensitively() {
        let directory = directory(&[entry("a@x.com", "p1", Role::Student)]);

        let record = directory
            .find_by_email_and_secret("A@X.com", "p1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.id, "user-1");
        assert_eq!(record.role, Role::Student);
    }

    #[tokio::test]
    async fn find_requires_exact_secret() {
        let directory = directory(&[entry("a@x.com", "p1", Role::Student)]);

        assert!(directory
            .find_by_email_and_secret("a@x.com", "wrong")
            .await
            .unwrap()
            .is_none());
        assert!(directory
            .find_by_email_and_secret("a@x.com", "P1")
            .await
            .unwrap()
            .is_none());
        assert!(directory
            .find_by_email_and_secret("nobody@x.com", "p1")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn append_is_visible_to_clones() {
        let directory = directory(&[]);
        let shared = directory.clone();
        assert!(!shared.exists_by_email("new@x.com").await.unwrap());

        let hash = cheap_hasher().hash("abc123").unwrap();
        directory
            .append(DirectoryRecord::new(
                "user-new",
                "Acme",
                "new@x.com",
                Role::Organization,
                hash,
            ))
            .await
            .unwrap();

        assert!(shared.exists_by_email("NEW@x.com").await.unwrap());
        assert_eq!(shared.len().await, 1);
    }

    #[tokio::test]
    async fn seed_keeps_explicit_ids() {
        let mut first = entry("a@x.com", "p1", Role::Student);
        first.id = Some("student-7".into());
        let directory = directory(&[first, entry("b@x.com", "p2", Role::University)]);

        let ids: Vec<String> = directory.records().await.into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["student-7".to_owned(), "user-2".to_owned()]);
    }

    #[tokio::test(start_paused = true)]
    async fn lookup_waits_for_latency() {
        let directory = directory(&[entry("a@x.com", "p1", Role::Student)])
            .with_latency(Duration::from_millis(800));

        let start = tokio::time::Instant::now();
        directory.exists_by_email("a@x.com").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(800));
    }
}
