mod session;
pub use self::session::{Builder, Session, SessionHandle, SessionSnapshot};

mod config;
pub use self::config::{Config, UserEntry};

mod principal;
pub use self::principal::{Identity, Principal, Profile};

mod role;
pub use self::role::Role;

mod uow;
pub(crate) use self::uow::UnitOfWork;

mod credential;
pub use self::credential::{Credential, Registration, MIN_SECRET_CHARS};

mod middleware;

pub mod access;
pub mod directory;
pub mod storage;
