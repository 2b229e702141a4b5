use serde::Deserialize;

use crate::common::{debug, info};
use crate::core::access::{Access, AccessGuard, Decision, RouteTable};
use crate::core::{Identity, Principal, Registration, SessionHandle};

/// Where to go once login or registration succeeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostLoginRedirect {
    /// Always the role's dashboard, the remembered origin is ignored.
    #[default]
    ByRole,
    /// The remembered origin when the new identity may view it,
    /// otherwise the role's dashboard.
    RememberedOrigin,
}

/// Drives navigation for one client: resolves the route, asks the guard,
/// and remembers where a login redirect came from.
pub struct Navigator {
    session: SessionHandle,
    routes: RouteTable,
    guard: AccessGuard,
    post_login: PostLoginRedirect,
    remembered_origin: Option<String>,
}

impl Navigator {
    pub fn new(session: SessionHandle, routes: RouteTable, guard: AccessGuard) -> Self {
        Self {
            session,
            routes,
            guard,
            post_login: PostLoginRedirect::default(),
            remembered_origin: None,
        }
    }

    pub fn with_post_login(mut self, post_login: PostLoginRedirect) -> Self {
        self.post_login = post_login;
        self
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn guard(&self) -> &AccessGuard {
        &self.guard
    }

    /// Decision for `path` given `principal`. Pure, nothing is remembered.
    pub fn decide(&self, principal: &Principal, path: &str) -> Decision {
        match self.routes.resolve(path) {
            Access::Public => Decision::Allow,
            Access::Protected(policy) => self.guard.check(principal, path, policy),
        }
    }

    /// Evaluate a navigation against the current session.
    ///
    /// Waits for the session to finish restoring, then decides. The origin
    /// of a login redirect is remembered for `post_login_target`.
    pub async fn navigate(&mut self, path: &str) -> crate::Result<Decision> {
        let snapshot = self.session.ready().await?;
        let decision = self.decide(snapshot.principal(), path);

        match &decision {
            Decision::Allow => debug!(path = %path, "Navigation allowed"),
            Decision::Redirect(redirect) => {
                info!(path = %path, to = %redirect.to, "Navigation redirected");
                if let Some(from) = redirect.from.as_ref() {
                    self.remembered_origin = Some(from.clone());
                }
            }
        }

        Ok(decision)
    }

    pub fn remembered_origin(&self) -> Option<&str> {
        self.remembered_origin.as_deref()
    }

    /// Target after a successful login, consuming the remembered origin.
    pub fn post_login_target(&mut self, identity: &Identity) -> String {
        let remembered = self.remembered_origin.take();

        match (self.post_login, remembered) {
            (PostLoginRedirect::RememberedOrigin, Some(origin))
                if self
                    .decide(&Principal::User(identity.clone()), &origin)
                    .is_allowed() =>
            {
                origin
            }
            _ => identity.role.dashboard_path().to_owned(),
        }
    }

    /// Log in and resolve where to go next.
    pub async fn login<S1, S2>(&mut self, email: S1, secret: S2) -> crate::Result<(Identity, String)>
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        let identity = self.session.login(email, secret).await?;
        let target = self.post_login_target(&identity);
        Ok((identity, target))
    }

    /// Register, which also logs in, and resolve where to go next.
    pub async fn register(&mut self, registration: Registration) -> crate::Result<(Identity, String)> {
        let identity = self.session.register(registration).await?;
        let target = self.post_login_target(&identity);
        Ok((identity, target))
    }

    pub async fn logout(&mut self) -> crate::Result<()> {
        self.remembered_origin = None;
        self.session.logout().await
    }
}
