//! User accounts and session identity.
//!
//! # Responsibility
//! - Define the persisted user record and the lightweight session marker.
//! - Own credential hashing so no caller ever handles stored secrets.
//!
//! # Invariants
//! - Passwords are never persisted in plaintext: each user carries a random
//!   salt and the hex SHA-256 digest of `salt || password`.
//! - `email` is unique across the directory (case-sensitive exact match).

use crate::model::generate_id;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Persisted user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    /// Per-user random salt.
    pub password_salt: String,
    /// Hex SHA-256 of `salt || password`.
    pub password_hash: String,
}

/// Identity marker persisted for the current logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl User {
    /// Creates a user with a fresh id and hashed credentials.
    pub fn create(
        name: impl Into<String>,
        email: impl Into<String>,
        password: &str,
    ) -> Self {
        let salt = generate_id();
        let hash = hash_password(&salt, password);
        Self {
            id: generate_id(),
            email: email.into(),
            name: name.into(),
            password_salt: salt,
            password_hash: hash,
        }
    }

    /// Checks a candidate password against the stored digest.
    pub fn verify_password(&self, password: &str) -> bool {
        hash_password(&self.password_salt, password) == self.password_hash
    }

    /// Replaces the stored credentials with a new salt and digest.
    pub fn set_password(&mut self, password: &str) {
        self.password_salt = generate_id();
        self.password_hash = hash_password(&self.password_salt, password);
    }

    /// Projects this record into a session marker.
    pub fn session(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::User;

    #[test]
    fn verify_accepts_original_password_only() {
        let user = User::create("Ana", "ana@empresa.com", "segredo-1");
        assert!(user.verify_password("segredo-1"));
        assert!(!user.verify_password("segredo-2"));
    }

    #[test]
    fn set_password_rotates_salt_and_hash() {
        let mut user = User::create("Ana", "ana@empresa.com", "segredo-1");
        let old_salt = user.password_salt.clone();
        let old_hash = user.password_hash.clone();

        user.set_password("segredo-2");
        assert_ne!(user.password_salt, old_salt);
        assert_ne!(user.password_hash, old_hash);
        assert!(user.verify_password("segredo-2"));
        assert!(!user.verify_password("segredo-1"));
    }

    #[test]
    fn plaintext_password_never_appears_in_record() {
        let user = User::create("Ana", "ana@empresa.com", "segredo-1");
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("segredo-1"));
    }
}
