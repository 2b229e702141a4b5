pub(crate) mod internal;

use std::fmt;
use std::io;

use self::internal::{Error, ErrorKind};

#[derive(Debug)]
pub enum ScholarsError {
    // No directory record matched the email and secret pair. Unknown emails
    // and wrong secrets are not told apart.
    InvalidCredentials,
    EmailAlreadyExists { email: String },
    InvalidRole { role: String },
    MissingField { field: &'static str },
    SecretMismatch,
    SecretTooShort { min_chars: usize },
    Storage(String),
    Config(String),
    // The session task is gone, every request after that fails with this.
    SessionClosed,
    Internal(String),
}

impl ScholarsError {
    /// Whether the error came from rejected credentials or registration input,
    /// as opposed to an environment failure.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            ScholarsError::InvalidCredentials
                | ScholarsError::EmailAlreadyExists { .. }
                | ScholarsError::InvalidRole { .. }
                | ScholarsError::MissingField { .. }
                | ScholarsError::SecretMismatch
                | ScholarsError::SecretTooShort { .. }
        )
    }
}

impl fmt::Display for ScholarsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScholarsError::InvalidCredentials => write!(f, "invalid email or password"),
            ScholarsError::EmailAlreadyExists { email } => {
                write!(f, "email already in use: {}", email)
            }
            ScholarsError::InvalidRole { role } => {
                write!(
                    f,
                    "invalid role {:?}, expected one of student, organization, university",
                    role
                )
            }
            ScholarsError::MissingField { field } => write!(f, "{} is required", field),
            ScholarsError::SecretMismatch => write!(f, "passwords do not match"),
            ScholarsError::SecretTooShort { min_chars } => {
                write!(f, "password must be at least {} characters", min_chars)
            }
            ScholarsError::Storage(description) => write!(f, "storage error: {}", description),
            ScholarsError::Config(description) => write!(f, "config error: {}", description),
            ScholarsError::SessionClosed => write!(f, "session closed"),
            ScholarsError::Internal(description) => write!(f, "internal error: {}", description),
        }
    }
}

impl std::error::Error for ScholarsError {}

impl From<Error> for ScholarsError {
    fn from(err: Error) -> Self {
        match err.kind() {
            ErrorKind::Io(_) | ErrorKind::Json(_) | ErrorKind::StorageCorrupt { .. } => {
                ScholarsError::Storage(err.to_string())
            }
            ErrorKind::Yaml(_) => ScholarsError::Config(err.to_string()),
            ErrorKind::Hash { .. } | ErrorKind::Internal(_) => {
                ScholarsError::Internal(err.to_string())
            }
        }
    }
}

impl From<io::Error> for ScholarsError {
    fn from(err: io::Error) -> Self {
        ScholarsError::from(Error::from(err))
    }
}
