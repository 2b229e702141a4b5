use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::common::{info, warn, Result};
use crate::core::directory::{Directory, DirectoryRecord, SecretHasher};
use crate::core::middleware::Middleware;
use crate::core::{Credential, Identity, Registration, UnitOfWork};
use crate::ScholarsError;

/// Resolves logins and registrations against the directory.
///
/// A successful attempt continues down the chain as `Establish`, a failed one
/// is answered right here and leaves the session untouched.
pub(crate) struct Authenticator<MW> {
    directory: Arc<dyn Directory>,
    hasher: Arc<SecretHasher>,
    next: MW,
}

impl<MW> Authenticator<MW> {
    pub(crate) fn new(directory: Arc<dyn Directory>, hasher: Arc<SecretHasher>, next: MW) -> Self {
        Self {
            directory,
            hasher,
            next,
        }
    }

    async fn authenticate(&self, credential: &Credential) -> crate::Result<Identity> {
        credential.validate()?;

        info!(email=%credential.email(), "Try authenticate");

        match self
            .directory
            .find_by_email_and_secret(&credential.email, &credential.secret)
            .await?
        {
            Some(record) => Ok(Identity::from(record)),
            None => {
                warn!(email=%credential.email(), "Authentication failed");
                Err(ScholarsError::InvalidCredentials)
            }
        }
    }

    async fn enroll(&self, registration: &Registration) -> crate::Result<Identity> {
        let role = registration.validate()?;

        if self.directory.exists_by_email(&registration.email).await? {
            warn!(email=%registration.email, "Registration rejected, email in use");
            return Err(ScholarsError::EmailAlreadyExists {
                email: registration.email.clone(),
            });
        }

        let hasher = Arc::clone(&self.hasher);
        let secret = registration.secret.clone();
        let secret_hash = tokio::task::spawn_blocking(move || hasher.hash(&secret))
            .await
            .map_err(|err| ScholarsError::Internal(format!("hash secret: {}", err)))??;

        let record = DirectoryRecord::new(
            format!("user-{}", Uuid::new_v4()),
            &registration.name,
            &registration.email,
            role,
            secret_hash,
        )
        .with_profile(registration.profile.clone())
        .with_created_at(Utc::now());
        let identity = Identity::from(record.clone());

        self.directory.append(record).await?;

        info!(id=%identity.id, role=%identity.role, "Registered");

        Ok(identity)
    }
}

#[async_trait]
impl<MW> Middleware for Authenticator<MW>
where
    MW: Middleware + Send + Sync + 'static,
{
    async fn apply(&mut self, uow: UnitOfWork) -> Result<()> {
        match uow {
            UnitOfWork::Login(mut login) => match self.authenticate(&login.request).await {
                Ok(identity) => {
                    let establish =
                        UnitOfWork::establish(identity, login.response_sender.take());
                    self.next.apply(establish).await
                }
                Err(err) => login.send_response(Err(err)),
            },
            UnitOfWork::Register(mut register) => match self.enroll(&register.request).await {
                Ok(identity) => {
                    let establish =
                        UnitOfWork::establish(identity, register.response_sender.take());
                    self.next.apply(establish).await
                }
                Err(err) => register.send_response(Err(err)),
            },
            uow => self.next.apply(uow).await,
        }
    }
}
