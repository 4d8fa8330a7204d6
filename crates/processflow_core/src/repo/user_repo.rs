//! User directory: account records and the session marker.
//!
//! # Responsibility
//! - Keep the user list as one JSON array under its own key.
//! - Keep the current-session marker under a separate key, read at startup
//!   and cleared on logout.
//!
//! # Invariants
//! - `email` is unique across the directory (case-sensitive exact match).
//! - Credentials are stored salted and hashed, never in plaintext.
//! - The demo login fallback is off unless explicitly enabled.

use crate::model::generate_id;
use crate::model::user::{SessionUser, User, MIN_PASSWORD_LEN};
use crate::storage::{KeyValueStore, StorageError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key holding the JSON array of all users.
const USERS_KEY: &str = "processflow_users_v1";
/// Key holding the current-session marker.
const SESSION_KEY: &str = "processflow_user";

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// User directory error.
#[derive(Debug)]
pub enum DirectoryError {
    Storage(StorageError),
    /// Persisted JSON under the users or session key failed to decode.
    Corrupt(serde_json::Error),
    /// Another user already owns this email.
    EmailTaken(String),
    /// No user matches the given id.
    UserNotFound(String),
    /// Unknown email or wrong password. Deliberately indistinguishable.
    InvalidCredentials,
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Corrupt(err) => write!(f, "corrupt persisted user data: {err}"),
            Self::EmailTaken(email) => write!(f, "email already registered: {email}"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::InvalidCredentials => write!(f, "invalid email or password"),
        }
    }
}

impl Error for DirectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Corrupt(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for DirectoryError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for DirectoryError {
    fn from(value: serde_json::Error) -> Self {
        Self::Corrupt(value)
    }
}

/// Update request for an existing user.
///
/// `password: None` keeps the stored credentials unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: Option<String>,
}

/// Account directory over an injected key-value store.
pub struct UserDirectory<S: KeyValueStore> {
    store: S,
    demo_login: bool,
}

impl<S: KeyValueStore> UserDirectory<S> {
    /// Creates a directory with the demo login fallback disabled.
    pub fn new(store: S) -> Self {
        Self {
            store,
            demo_login: false,
        }
    }

    /// Enables or disables the empty-directory demo login fallback.
    ///
    /// The fallback lets any password of at least [`MIN_PASSWORD_LEN`]
    /// characters log in with a synthesized identity while no user exists.
    /// It exists for demo environments only and defaults to off.
    pub fn with_demo_login(mut self, enabled: bool) -> Self {
        self.demo_login = enabled;
        self
    }

    /// Returns all registered users.
    pub fn users(&self) -> DirectoryResult<Vec<User>> {
        match self.store.read(USERS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Registers a new account.
    ///
    /// Fails with `EmailTaken` when the email is already present. Field
    /// presence and password length are the service layer's concern.
    pub fn register(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        password: &str,
    ) -> DirectoryResult<User> {
        let email = email.into();
        let mut users = self.users()?;
        if users.iter().any(|user| user.email == email) {
            return Err(DirectoryError::EmailTaken(email));
        }

        let user = User::create(name, email, password);
        users.push(user.clone());
        self.write_all(&users)?;
        info!(
            "event=user_register module=repo status=ok user_id={}",
            user.id
        );
        Ok(user)
    }

    /// Overwrites an existing user by id.
    ///
    /// Fails with `EmailTaken` when the new email collides with a different
    /// user's email, and `UserNotFound` when the id is unknown.
    pub fn update_user(&self, update: &UserUpdate) -> DirectoryResult<User> {
        let mut users = self.users()?;
        if users
            .iter()
            .any(|user| user.email == update.email && user.id != update.id)
        {
            return Err(DirectoryError::EmailTaken(update.email.clone()));
        }

        let user = users
            .iter_mut()
            .find(|user| user.id == update.id)
            .ok_or_else(|| DirectoryError::UserNotFound(update.id.clone()))?;

        user.name = update.name.clone();
        user.email = update.email.clone();
        if let Some(password) = update.password.as_deref() {
            user.set_password(password);
        }
        let updated = user.clone();

        self.write_all(&users)?;
        Ok(updated)
    }

    /// Authenticates by exact email and password match.
    ///
    /// Persists the session marker on success. When the directory is empty
    /// and the demo fallback is enabled, any password meeting the minimum
    /// length logs in with a synthesized identity.
    pub fn login(&self, email: &str, password: &str) -> DirectoryResult<SessionUser> {
        let users = self.users()?;

        if users.is_empty() {
            if self.demo_login && password.chars().count() >= MIN_PASSWORD_LEN {
                let session = SessionUser {
                    id: generate_id(),
                    email: email.to_string(),
                    name: "Demo".to_string(),
                };
                self.write_session(&session)?;
                warn!("event=user_login module=repo status=ok mode=demo_fallback");
                return Ok(session);
            }
            return Err(DirectoryError::InvalidCredentials);
        }

        let user = users
            .iter()
            .find(|user| user.email == email)
            .filter(|user| user.verify_password(password))
            .ok_or(DirectoryError::InvalidCredentials)?;

        let session = user.session();
        self.write_session(&session)?;
        info!(
            "event=user_login module=repo status=ok user_id={}",
            session.id
        );
        Ok(session)
    }

    /// Returns the persisted session marker, if any.
    pub fn current_session(&self) -> DirectoryResult<Option<SessionUser>> {
        match self.store.read(SESSION_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Clears the persisted session marker.
    pub fn clear_session(&self) -> DirectoryResult<()> {
        self.store.delete(SESSION_KEY)?;
        Ok(())
    }

    fn write_all(&self, users: &[User]) -> DirectoryResult<()> {
        let raw = serde_json::to_string(users)?;
        self.store.write(USERS_KEY, &raw)?;
        Ok(())
    }

    fn write_session(&self, session: &SessionUser) -> DirectoryResult<()> {
        let raw = serde_json::to_string(session)?;
        self.store.write(SESSION_KEY, &raw)?;
        Ok(())
    }
}
