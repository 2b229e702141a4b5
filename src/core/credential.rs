use std::fmt;

use crate::core::{Profile, Role};
use crate::ScholarsError;

/// Minimum number of characters a new secret must have.
pub const MIN_SECRET_CHARS: usize = 6;

/// Email and secret pair submitted on login.
#[derive(Clone)]
pub struct Credential {
    pub(crate) email: String,
    pub(crate) secret: String,
}

impl Credential {
    pub fn new<S1, S2>(email: S1, secret: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self {
            email: email.into(),
            secret: secret.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub(crate) fn validate(&self) -> Result<(), ScholarsError> {
        require("email", &self.email)?;
        require("password", &self.secret)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("secret", &"***")
            .finish()
    }
}

/// Profile data submitted on sign up.
///
/// `role` stays a plain string until validation so a malformed value is
/// reported as `InvalidRole` instead of being silently coerced.
#[derive(Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub secret: String,
    pub confirm_secret: Option<String>,
    pub role: String,
    pub profile: Profile,
}

impl Registration {
    pub fn new<S1, S2, S3, S4>(name: S1, email: S2, secret: S3, role: S4) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
        S4: Into<String>,
    {
        Self {
            name: name.into(),
            email: email.into(),
            secret: secret.into(),
            confirm_secret: None,
            role: role.into(),
            profile: Profile::default(),
        }
    }

    pub fn with_confirmation(mut self, confirm_secret: impl Into<String>) -> Self {
        self.confirm_secret = Some(confirm_secret.into());
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Check the submitted fields and resolve the role.
    pub(crate) fn validate(&self) -> Result<Role, ScholarsError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("password", &self.secret)?;

        if let Some(confirm) = self.confirm_secret.as_ref() {
            if confirm != &self.secret {
                return Err(ScholarsError::SecretMismatch);
            }
        }
        if self.secret.chars().count() < MIN_SECRET_CHARS {
            return Err(ScholarsError::SecretTooShort {
                min_chars: MIN_SECRET_CHARS,
            });
        }

        self.role.parse::<Role>()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("secret", &"***")
            .field("role", &self.role)
            .field("profile", &self.profile)
            .finish()
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ScholarsError> {
    if value.trim().is_empty() {
        Err(ScholarsError::MissingField { field })
    } else {
        Ok(())
    }
}
