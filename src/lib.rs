#![allow(clippy::module_inception)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;

pub use crate::error::ScholarsError;
pub type Result<T, E = crate::error::ScholarsError> = std::result::Result<T, E>;

pub use crate::core::access::{AccessGuard, AccessPolicy, Decision, Navigator, RouteTable};
pub use crate::core::{Identity, Principal, Profile, Registration, Role, SessionHandle};

pub(crate) mod common {
    pub(crate) type Result<T, E = crate::error::internal::Error> = std::result::Result<T, E>;

    pub(crate) type Error = crate::error::internal::Error;
    pub(crate) type ErrorKind = crate::error::internal::ErrorKind;

    pub type Time = chrono::DateTime<chrono::Utc>;

    pub use tracing::{debug, error, info, trace, warn};
}
