//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the pipeline.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the contact pipeline.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    /// Contact form rules (rate limiting, notices).
    pub form: FormConfig,

    /// How submissions leave the client.
    pub transport: TransportConfig,

    /// Where the durable store lives.
    pub storage: StorageConfig,

    /// Content source for the surrounding page.
    pub content: ContentConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Contact form configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FormConfig {
    /// Maximum admitted submissions within the window.
    pub max_submissions: usize,

    /// Trailing window for rate limiting in milliseconds.
    pub window_ms: u64,

    /// Number of submission timestamps kept in the durable store.
    pub history_cap: usize,

    /// How long the success notice stays visible in milliseconds.
    pub success_notice_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_submissions: 3,
            window_ms: 3_600_000, // 1 hour
            history_cap: 10,
            success_notice_ms: 5_000,
        }
    }
}

/// Transport selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// Sleep, then report success. No network request is made.
    Simulated,
    /// JSON POST to `endpoint`.
    Http,
}

/// Transport configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Which transport to build.
    pub kind: TransportKind,

    /// Delay for the simulated transport in milliseconds.
    pub simulated_delay_ms: u64,

    /// Endpoint URL for the HTTP transport.
    pub endpoint: String,

    /// Header carrying the session token.
    pub token_header: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            kind: TransportKind::Simulated,
            simulated_delay_ms: 1_000,
            endpoint: "http://localhost:8080/api/contact".to_string(),
            token_header: "X-CSRF-Token".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the durable key/value file.
    pub durable_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            durable_path: "contact_state.json".to_string(),
        }
    }
}

/// Content source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentConfig {
    /// URL (`http://`, `https://`) or local path of the content JSON.
    pub source: String,

    /// Fetch timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            source: "data/content.json".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
