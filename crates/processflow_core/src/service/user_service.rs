//! Account use-case service.
//!
//! # Responsibility
//! - Provide register/update/login/logout entry points.
//! - Validate required fields and password length before the directory is
//!   touched.
//!
//! # Invariants
//! - A validation failure aborts the operation with no state change.
//! - Directory-level conflicts (`EmailTaken`) pass through unchanged.

use crate::model::user::{SessionUser, User, MIN_PASSWORD_LEN};
use crate::repo::user_repo::{DirectoryError, UserDirectory, UserUpdate};
use crate::storage::KeyValueStore;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// Account service error.
#[derive(Debug)]
pub enum UserServiceError {
    /// One or more required fields are empty.
    MissingFields,
    /// Password shorter than the accepted minimum.
    PasswordTooShort { min: usize },
    /// Directory-layer failure (conflict, credentials, storage).
    Directory(DirectoryError),
}

impl Display for UserServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields => write!(f, "all fields are required"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must have at least {min} characters")
            }
            Self::Directory(err) => write!(f, "{err}"),
        }
    }
}

impl Error for UserServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Directory(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DirectoryError> for UserServiceError {
    fn from(value: DirectoryError) -> Self {
        Self::Directory(value)
    }
}

/// Use-case wrapper over the user directory.
pub struct UserService<S: KeyValueStore> {
    directory: UserDirectory<S>,
}

impl<S: KeyValueStore> UserService<S> {
    pub fn new(directory: UserDirectory<S>) -> Self {
        Self { directory }
    }

    /// Registers a new account after field and password checks.
    pub fn register(&self, name: &str, email: &str, password: &str) -> UserServiceResult<User> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(UserServiceError::MissingFields);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(UserServiceError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        Ok(self.directory.register(name, email, password)?)
    }

    /// Updates an existing account.
    ///
    /// An empty replacement password is treated as "keep current", matching
    /// the edit form behavior; a non-empty one must meet the minimum length.
    pub fn update_user(&self, mut update: UserUpdate) -> UserServiceResult<User> {
        if update.name.trim().is_empty() || update.email.trim().is_empty() {
            return Err(UserServiceError::MissingFields);
        }
        if let Some(password) = update.password.as_deref() {
            if password.is_empty() {
                update.password = None;
            } else if password.chars().count() < MIN_PASSWORD_LEN {
                return Err(UserServiceError::PasswordTooShort {
                    min: MIN_PASSWORD_LEN,
                });
            }
        }
        Ok(self.directory.update_user(&update)?)
    }

    /// Authenticates and persists the session marker.
    pub fn login(&self, email: &str, password: &str) -> UserServiceResult<SessionUser> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(UserServiceError::MissingFields);
        }
        Ok(self.directory.login(email, password)?)
    }

    /// Clears the persisted session marker.
    pub fn logout(&self) -> UserServiceResult<()> {
        Ok(self.directory.clear_session()?)
    }

    /// Returns the persisted session marker, if any.
    pub fn current_session(&self) -> UserServiceResult<Option<SessionUser>> {
        Ok(self.directory.current_session()?)
    }

    /// Returns all registered users.
    pub fn users(&self) -> UserServiceResult<Vec<User>> {
        Ok(self.directory.users()?)
    }
}
