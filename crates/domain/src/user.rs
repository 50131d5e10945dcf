//! User: owns rooms and acts as the authenticated caller of write operations.

use base64::Engine;
use rand::RngCore;
use rand::rngs::OsRng;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{RoomHubError, ValidationError};
use crate::id::UserId;

pub const USERNAME_MAX: usize = 150;

const TOKEN_BYTES: usize = 32;

/// A registered account.
///
/// Only the SHA-256 digest of the API token is kept. The raw token is handed
/// out once, in the [`Registration`] returned by [`User::register`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing)]
    pub token_hash: Vec<u8>,
}

/// A freshly registered user together with its plaintext token.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    pub token: String,
}

/// SHA-256 digest under which a token is stored and looked up.
#[must_use]
pub fn token_digest(token: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().to_vec()
}

fn generate_token() -> Result<String, RoomHubError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|err| RoomHubError::Credential(Box::new(err)))?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
}

impl User {
    /// Register a new user with a freshly generated API token.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::Validation`] when `username` is blank or too long,
    /// [`RoomHubError::Credential`] when the OS random source fails.
    pub fn register(username: impl Into<String>) -> Result<Registration, RoomHubError> {
        let username = username.into();
        ValidationError::check_required("username", &username, USERNAME_MAX)?;
        let token = generate_token()?;
        let user = Self {
            id: UserId::new(),
            username,
            token_hash: token_digest(&token),
        };
        Ok(Registration { user, token })
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::Validation`] when `username` is blank or too long.
    pub fn validate(&self) -> Result<(), RoomHubError> {
        ValidationError::check_required("username", &self.username, USERNAME_MAX)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_issue_distinct_tokens_when_registering_twice() {
        let a = User::register("alice").unwrap();
        let b = User::register("bob").unwrap();
        assert_ne!(a.token, b.token);
        // 32 random bytes, unpadded base64
        assert_eq!(a.token.len(), 43);
    }

    #[test]
    fn should_store_digest_instead_of_token() {
        let registration = User::register("alice").unwrap();
        assert_ne!(registration.user.token_hash, registration.token.as_bytes());
        assert_eq!(registration.user.token_hash, token_digest(&registration.token));
        assert_eq!(registration.user.token_hash.len(), 32);
    }

    #[test]
    fn should_not_serialize_token_hash() {
        let user = User::register("alice").unwrap().user;
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["username"], "alice");
        assert!(json.get("token").is_none());
        assert!(json.get("token_hash").is_none());
    }

    #[test]
    fn should_reject_blank_username() {
        assert!(User::register(" ").is_err());
    }
}
