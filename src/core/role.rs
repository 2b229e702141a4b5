use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ScholarsError;

/// The closed set of platform roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Organization,
    University,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Organization, Role::University];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Organization => "organization",
            Role::University => "university",
        }
    }

    /// Landing view for a freshly logged in user of this role.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Student => "/student/dashboard",
            Role::Organization => "/organization/dashboard",
            Role::University => "/university/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ScholarsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .find(|role| role.as_str() == s)
            .copied()
            .ok_or_else(|| ScholarsError::InvalidRole { role: s.to_owned() })
    }
}
