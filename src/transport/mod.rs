//! Transport subsystem: how a payload leaves the client.
//!
//! # Data Flow
//! ```text
//! SubmissionController (Submitting)
//!     → Transport::submit(&FormPayload)
//!         → simulated.rs (delay, no network)
//!         → http.rs (JSON POST, token in header and body)
//! ```
//!
//! # Design Decisions
//! - The state machine only sees `Result<(), TransportError>`
//! - No retries: a failed attempt is reported and the user retries
//! - Error details are logged, never shown to the user

pub mod http;
pub mod simulated;

pub use http::HttpTransport;
pub use simulated::SimulatedTransport;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::{TransportConfig, TransportKind};
use crate::form::FormPayload;

/// Errors raised while delivering a payload.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection or protocol failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned status {0}")]
    Status(u16),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("invalid token header: {0}")]
    InvalidHeader(String),

    #[error("simulated transport failure")]
    Simulated,
}

/// Delivers one payload.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn submit(&self, payload: &FormPayload) -> Result<(), TransportError>;
}

/// Build the transport selected in config.
pub fn from_config(config: &TransportConfig) -> Result<Arc<dyn Transport>, TransportError> {
    let transport: Arc<dyn Transport> = match config.kind {
        TransportKind::Simulated => Arc::new(SimulatedTransport::new(Duration::from_millis(
            config.simulated_delay_ms,
        ))),
        TransportKind::Http => Arc::new(HttpTransport::new(config)?),
    };
    tracing::info!(kind = ?config.kind, "Transport configured");
    Ok(transport)
}
