mod config;
pub use self::config::Config;

mod guard;
pub use self::guard::{AccessGuard, Decision, Redirect};

mod navigator;
pub use self::navigator::{Navigator, PostLoginRedirect};

mod policy;
pub use self::policy::AccessPolicy;

mod route;
pub use self::route::{Access, RouteEntry, RouteTable};
