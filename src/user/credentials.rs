use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use std::collections::HashMap;
use thiserror::Error;

use super::store::UserStore;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),
}

/// Hashes a plaintext password with Argon2id under a random salt.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(CredentialError::Hash)?;

    Ok(hash.to_string())
}

/// Checks a plaintext password against a stored hash string. A hash that
/// does not parse verifies as false.
pub fn check_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Credential verification as an injected capability.
///
/// The service operations take this trait, never a concrete credential
/// source, so callers decide where credentials live.
pub trait CredentialVerifier {
    fn verify(&self, username: &str, password: &str) -> bool;
}

impl CredentialVerifier for UserStore {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.by_username(username)
            .map(|user| check_password(&user.password, password))
            .unwrap_or(false)
    }
}

/// A point-in-time copy of usernames and password hashes.
///
/// Stands in as the verifier while the store it was taken from is being
/// mutated.
#[derive(Debug, Clone, Default)]
pub struct CredentialSnapshot {
    hashes: HashMap<String, String>,
}

impl CredentialSnapshot {
    pub fn of(store: &UserStore) -> Self {
        CredentialSnapshot {
            hashes: store
                .iter()
                .map(|user| (user.username.clone(), user.password.clone()))
                .collect(),
        }
    }
}

impl CredentialVerifier for CredentialSnapshot {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.hashes
            .get(username)
            .map(|hash| check_password(hash, password))
            .unwrap_or(false)
    }
}
