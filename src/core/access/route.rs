use serde::Deserialize;

use crate::core::access::AccessPolicy;
use crate::core::Role;

/// How a route is guarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected(AccessPolicy),
}

static PUBLIC: Access = Access::Public;

/// Route declaration as written in configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteEntry {
    pub path: String,
    #[serde(default)]
    pub public: bool,
    // Empty means any authenticated role.
    #[serde(default)]
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    // `:name`, matches any single non-empty segment.
    Param,
}

#[derive(Debug, Clone)]
struct Route {
    path: String,
    segments: Vec<Segment>,
    access: Access,
}

impl Route {
    fn new(path: &str, access: Access) -> Self {
        let segments = split(path)
            .map(|segment| {
                if segment.starts_with(':') {
                    Segment::Param
                } else {
                    Segment::Static(segment.to_owned())
                }
            })
            .collect();

        Self {
            path: path.to_owned(),
            segments,
            access,
        }
    }

    fn matches(&self, requested: &[&str]) -> bool {
        self.segments.len() == requested.len()
            && self
                .segments
                .iter()
                .zip(requested)
                .all(|(segment, requested)| match segment {
                    Segment::Static(s) => s == requested,
                    Segment::Param => true,
                })
    }
}

// Path segments without query, fragment, or empty parts.
fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or_default()
        .split('/')
        .filter(|segment| !segment.is_empty())
}

/// Static mapping from navigable paths to their access rules.
///
/// Routes are tried in declaration order. Paths matching no route are
/// public, the table only guards what it knows about.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn public(mut self, path: &str) -> Self {
        self.routes.push(Route::new(path, Access::Public));
        self
    }

    pub fn protected(mut self, path: &str, policy: AccessPolicy) -> Self {
        self.routes
            .push(Route::new(path, Access::Protected(policy)));
        self
    }

    pub fn from_entries(entries: &[RouteEntry]) -> Self {
        entries.iter().fold(RouteTable::new(), |table, entry| {
            if entry.public {
                table.public(&entry.path)
            } else {
                table.protected(&entry.path, AccessPolicy::roles(entry.roles.iter().copied()))
            }
        })
    }

    /// The platform's routes. `shared_route_roles` decides who may open the
    /// university list; an empty slice admits any authenticated role.
    pub fn default_table(shared_route_roles: &[Role]) -> Self {
        let student = || AccessPolicy::roles([Role::Student]);
        let organization = || AccessPolicy::roles([Role::Organization]);
        let university = || AccessPolicy::roles([Role::University]);

        RouteTable::new()
            .public("/")
            .public("/login")
            .public("/register")
            .protected("/student/dashboard", student())
            .protected("/student/profile", student())
            .protected("/student/profile/edit", student())
            .protected("/student/internships", student())
            .protected("/student/internships/:id", student())
            .protected("/student/internships/:id/apply", student())
            .protected("/organization/dashboard", organization())
            .protected("/organization/profile", organization())
            .protected("/organization/profile/edit", organization())
            .protected("/university/dashboard", university())
            .protected("/university/profile", university())
            .protected(
                "/universities",
                AccessPolicy::roles(shared_route_roles.iter().copied()),
            )
    }

    pub fn resolve(&self, path: &str) -> &Access {
        let requested: Vec<&str> = split(path).collect();

        self.routes
            .iter()
            .find(|route| route.matches(&requested))
            .map(|route| &route.access)
            .unwrap_or(&PUBLIC)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|route| route.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::default_table(&[Role::Student, Role::Organization])
    }

    #[test]
    fn public_routes() {
        let table = table();
        for path in ["/", "/login", "/register", "", "/login?next=1"] {
            assert_eq!(table.resolve(path), &Access::Public, "{}", path);
        }
    }

    #[test]
    fn role_routes() {
        let table = table();

        assert_eq!(
            table.resolve("/student/dashboard"),
            &Access::Protected(AccessPolicy::roles([Role::Student]))
        );
        assert_eq!(
            table.resolve("/organization/profile/edit/"),
            &Access::Protected(AccessPolicy::roles([Role::Organization]))
        );
        assert_eq!(
            table.resolve("/university/profile#top"),
            &Access::Protected(AccessPolicy::roles([Role::University]))
        );
    }

    #[test]
    fn param_segments() {
        let table = table();
        let student = Access::Protected(AccessPolicy::roles([Role::Student]));

        assert_eq!(table.resolve("/student/internships/internship-3"), &student);
        assert_eq!(table.resolve("/student/internships/internship-3/apply"), &student);
        // A parameter never spans more than one segment.
        assert_eq!(
            table.resolve("/student/internships/a/b/apply"),
            &Access::Public
        );
    }

    #[test]
    fn shared_route_roles_are_configurable() {
        let excluding = table();
        assert_eq!(
            excluding.resolve("/universities"),
            &Access::Protected(AccessPolicy::roles([Role::Student, Role::Organization]))
        );

        let any = RouteTable::default_table(&[]);
        assert_eq!(
            any.resolve("/universities"),
            &Access::Protected(AccessPolicy::any_authenticated())
        );
    }

    #[test]
    fn entries_from_yaml() {
        let yaml = r#"
- path: /
  public: true
- path: /reports/:id
  roles: [university]
- path: /inbox
"#;
        let entries: Vec<RouteEntry> = serde_yaml::from_str(yaml).unwrap();
        let table = RouteTable::from_entries(&entries);

        assert_eq!(table.len(), 3);
        assert_eq!(table.resolve("/"), &Access::Public);
        assert_eq!(
            table.resolve("/reports/7"),
            &Access::Protected(AccessPolicy::roles([Role::University]))
        );
        assert_eq!(
            table.resolve("/inbox"),
            &Access::Protected(AccessPolicy::any_authenticated())
        );
        assert_eq!(
            table.paths().collect::<Vec<_>>(),
            vec!["/", "/reports/:id", "/inbox"]
        );
    }
}
