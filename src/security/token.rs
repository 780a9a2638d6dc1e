//! Per-session anti-forgery token.
//!
//! Nothing server-side verifies this token yet. Real anti-forgery enforcement
//! needs a backend that checks it.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::storage::{KeyValueStore, StorageError};

/// Session-store key holding the token.
pub const TOKEN_KEY: &str = "csrf_token";

/// Random bytes per token.
pub const TOKEN_BYTES: usize = 32;

/// A value that does not have the session token shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("session token must be {} lowercase hex characters", TOKEN_BYTES * 2)]
pub struct MalformedToken;

/// An opaque 64-character lowercase hex token.
///
/// Deserialization goes through [`SessionToken::parse`], so a deserialized
/// token always has the same shape as a generated one.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a token from the OS random source.
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Accept a stored value only if it has the exact token shape.
    pub fn parse(value: &str) -> Option<Self> {
        let well_formed = value.len() == TOKEN_BYTES * 2
            && value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        well_formed.then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SessionToken {
    type Error = MalformedToken;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(MalformedToken)
    }
}

impl From<SessionToken> for String {
    fn from(token: SessionToken) -> Self {
        token.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for SessionToken {
    // Keep full tokens out of logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(8).collect();
        write!(f, "SessionToken({}…)", prefix)
    }
}

/// Issues and rotates the session token.
#[derive(Clone)]
pub struct TokenIssuer {
    store: Arc<dyn KeyValueStore>,
}

impl TokenIssuer {
    /// Create an issuer over the session-scoped store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Return the current token, creating one if none is stored.
    pub fn get_or_create_token(&self) -> Result<SessionToken, StorageError> {
        if let Some(stored) = self.store.get(TOKEN_KEY)? {
            if let Some(token) = SessionToken::parse(&stored) {
                return Ok(token);
            }
            tracing::warn!("Stored session token is malformed, replacing it");
        }
        self.issue()
    }

    /// Replace the current token unconditionally.
    pub fn rotate_token(&self) -> Result<SessionToken, StorageError> {
        let token = self.issue()?;
        tracing::debug!(token = ?token, "Session token rotated");
        Ok(token)
    }

    /// Forget the token. The next read creates a fresh one.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(TOKEN_KEY)
    }

    fn issue(&self) -> Result<SessionToken, StorageError> {
        let token = SessionToken::generate();
        self.store.set(TOKEN_KEY, token.as_str())?;
        Ok(token)
    }
}
