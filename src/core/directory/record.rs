use crate::common::Time;
use crate::core::directory::SecretHash;
use crate::core::{Profile, Role};

/// Stored user entry, the source of truth for authentication.
#[derive(Debug, Clone)]
pub struct DirectoryRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub profile: Profile,
    pub created_at: Option<Time>,
    pub(crate) secret_hash: SecretHash,
}

impl DirectoryRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        secret_hash: SecretHash,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            profile: Profile::default(),
            created_at: None,
            secret_hash,
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_created_at(mut self, created_at: Time) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn secret_hash(&self) -> &SecretHash {
        &self.secret_hash
    }

    /// Emails are compared case-insensitively.
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}
