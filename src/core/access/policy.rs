use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::Role;

/// Roles allowed to view a protected route.
/// An empty set admits any authenticated role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    #[serde(default)]
    required_roles: BTreeSet<Role>,
}

impl AccessPolicy {
    pub fn any_authenticated() -> Self {
        Self::default()
    }

    pub fn roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            required_roles: roles.into_iter().collect(),
        }
    }

    pub fn required_roles(&self) -> &BTreeSet<Role> {
        &self.required_roles
    }

    pub fn permits(&self, role: Role) -> bool {
        self.required_roles.is_empty() || self.required_roles.contains(&role)
    }
}
