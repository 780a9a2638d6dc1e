//! Key/value storage subsystem.
//!
//! # Data Flow
//! ```text
//! TokenIssuer  → session store (MemoryStore)  key `csrf_token`
//! RateLimiter  → durable store (FileStore)    key `form_submissions`
//! ```
//!
//! # Design Decisions
//! - Values are strings; callers own their encoding (hex, JSON)
//! - Session store lives exactly as long as its `SessionContext`
//! - Durable store survives process restarts
//! - Stores are not shared between processes safely; see `security::rate_limit`

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors raised by a key/value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file did not contain a JSON object of strings.
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Minimal string key/value store, shaped after browser web storage.
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace a value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
