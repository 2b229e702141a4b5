use crate::core::access::AccessPolicy;
use crate::core::Principal;

/// Outcome of a navigation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(Redirect),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: String,
    // Requested location, kept on login redirects so login can
    // forward there afterwards.
    pub from: Option<String>,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            Decision::Redirect(redirect) => Some(redirect),
            Decision::Allow => None,
        }
    }
}

/// Enforces an `AccessPolicy` against the current principal.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    login_path: String,
    landing_path: String,
}

impl Default for AccessGuard {
    fn default() -> Self {
        AccessGuard::new(AccessGuard::DEFAULT_LOGIN_PATH, AccessGuard::DEFAULT_LANDING_PATH)
    }
}

impl AccessGuard {
    pub const DEFAULT_LOGIN_PATH: &'static str = "/login";
    pub const DEFAULT_LANDING_PATH: &'static str = "/";

    pub fn new(login_path: impl Into<String>, landing_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            landing_path: landing_path.into(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn landing_path(&self) -> &str {
        &self.landing_path
    }

    /// Decide whether `principal` may view `requested`.
    ///
    /// Anonymous users go to the login view with the requested location
    /// remembered. Authenticated users whose role the policy does not admit
    /// are sent to the landing view without any error.
    pub fn check(&self, principal: &Principal, requested: &str, policy: &AccessPolicy) -> Decision {
        match principal {
            Principal::AnonymousUser => Decision::Redirect(Redirect {
                to: self.login_path.clone(),
                from: Some(requested.to_owned()),
            }),
            Principal::User(identity) if policy.permits(identity.role) => Decision::Allow,
            Principal::User(_) => Decision::Redirect(Redirect {
                to: self.landing_path.clone(),
                from: None,
            }),
        }
    }
}
