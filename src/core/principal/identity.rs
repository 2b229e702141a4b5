use serde::{Deserialize, Serialize};

use crate::common::Time;
use crate::core::directory::DirectoryRecord;
use crate::core::{Profile, Role};

/// Public record of the authenticated user.
///
/// An `Identity` has no secret field. The only way to get one from the
/// directory is the `From<DirectoryRecord>` conversion, which drops the
/// secret hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Time>,
    #[serde(flatten)]
    pub profile: Profile,
}

impl From<DirectoryRecord> for Identity {
    fn from(record: DirectoryRecord) -> Self {
        let DirectoryRecord {
            id,
            name,
            email,
            role,
            profile,
            created_at,
            secret_hash: _,
        } = record;

        Identity {
            id,
            name,
            email,
            role,
            created_at,
            profile,
        }
    }
}
