use serde::Deserialize;

use crate::core::access::{AccessGuard, PostLoginRedirect, RouteEntry, RouteTable};
use crate::core::Role;

/// Navigation and access control configuration.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    // Where anonymous users are sent.
    login_path: Option<String>,
    // Where users with the wrong role are sent.
    landing_path: Option<String>,
    post_login: Option<PostLoginRedirect>,
    // Roles admitted to the shared university list.
    shared_route_roles: Option<Vec<Role>>,
    // Replaces the built in route table when present.
    routes: Option<Vec<RouteEntry>>,
}

impl Config {
    const DEFAULT_SHARED_ROUTE_ROLES: [Role; 2] = [Role::Student, Role::Organization];

    pub fn set_login_path(&mut self, val: &mut Option<String>) {
        if let Some(val) = val.take() {
            self.login_path = Some(val)
        }
    }
    pub fn set_landing_path(&mut self, val: &mut Option<String>) {
        if let Some(val) = val.take() {
            self.landing_path = Some(val)
        }
    }
    pub fn set_post_login(&mut self, val: Option<PostLoginRedirect>) {
        if let Some(val) = val {
            self.post_login = Some(val)
        }
    }
    pub fn set_shared_route_roles(&mut self, val: &mut Option<Vec<Role>>) {
        if let Some(val) = val.take() {
            self.shared_route_roles = Some(val)
        }
    }

    pub fn post_login(&self) -> PostLoginRedirect {
        self.post_login.unwrap_or_default()
    }

    pub fn shared_route_roles(&self) -> &[Role] {
        self.shared_route_roles
            .as_deref()
            .unwrap_or(&Config::DEFAULT_SHARED_ROUTE_ROLES)
    }

    pub fn guard(&self) -> AccessGuard {
        AccessGuard::new(
            self.login_path
                .as_deref()
                .unwrap_or(AccessGuard::DEFAULT_LOGIN_PATH),
            self.landing_path
                .as_deref()
                .unwrap_or(AccessGuard::DEFAULT_LANDING_PATH),
        )
    }

    pub fn route_table(&self) -> RouteTable {
        match self.routes.as_ref() {
            Some(entries) => RouteTable::from_entries(entries),
            None => RouteTable::default_table(self.shared_route_roles()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::access::{Access, AccessPolicy};

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.post_login(), PostLoginRedirect::ByRole);
        assert_eq!(config.guard().login_path(), "/login");
        assert_eq!(config.guard().landing_path(), "/");
        assert_eq!(
            config.route_table().resolve("/universities"),
            &Access::Protected(AccessPolicy::roles([Role::Student, Role::Organization]))
        );
    }

    #[test]
    fn include_university_in_shared_routes() {
        let yaml = r#"
post_login: remembered_origin
shared_route_roles: [student, organization, university]
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.post_login(), PostLoginRedirect::RememberedOrigin);
        assert_eq!(
            config.route_table().resolve("/universities"),
            &Access::Protected(AccessPolicy::roles(Role::ALL))
        );
    }

    #[test]
    fn custom_routes_replace_defaults() {
        let yaml = r#"
routes:
  - path: /admin
    roles: [university]
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let table = config.route_table();
        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve("/student/dashboard"), &Access::Public);
    }
}
