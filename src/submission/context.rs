//! Session-scoped collaborators of the submission controller.

use std::sync::Arc;

use crate::config::FormConfig;
use crate::security::{RateLimiter, SessionToken, TokenIssuer};
use crate::storage::{KeyValueStore, MemoryStore, StorageError};

/// Token issuer and rate limiter for one session.
///
/// Built explicitly and handed to the controller; nothing here is global.
#[derive(Clone)]
pub struct SessionContext {
    tokens: TokenIssuer,
    limiter: RateLimiter,
}

impl SessionContext {
    /// `session` holds the token, `durable` holds the submission history.
    pub fn new(
        session: Arc<dyn KeyValueStore>,
        durable: Arc<dyn KeyValueStore>,
        config: &FormConfig,
    ) -> Self {
        Self {
            tokens: TokenIssuer::new(session),
            limiter: RateLimiter::new(durable, config),
        }
    }

    /// A context whose durable store is in memory as well.
    pub fn ephemeral(config: &FormConfig) -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()), config)
    }

    /// Form initialization: make sure a token exists.
    pub fn init(&self) -> Result<SessionToken, StorageError> {
        self.tokens.get_or_create_token()
    }

    /// End the session's token. Submission history is durable and stays.
    pub fn reset(&self) -> Result<(), StorageError> {
        self.tokens.clear()
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }
}
