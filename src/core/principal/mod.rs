mod identity;
pub use self::identity::Identity;

mod profile;
pub use self::profile::Profile;

/// Who is behind the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    AnonymousUser,
    User(Identity),
}

impl Principal {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Principal::User(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Principal::User(identity) => Some(identity),
            Principal::AnonymousUser => None,
        }
    }
}

impl From<Option<Identity>> for Principal {
    fn from(identity: Option<Identity>) -> Self {
        match identity {
            Some(identity) => Principal::User(identity),
            None => Principal::AnonymousUser,
        }
    }
}
