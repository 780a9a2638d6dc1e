//! Network-free transport.

use async_trait::async_trait;
use std::time::Duration;

use crate::form::FormPayload;
use crate::transport::{Transport, TransportError};

/// Waits for a fixed delay, then reports success (or failure, if built
/// with [`SimulatedTransport::failing`]). Nothing is sent anywhere.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    delay: Duration,
    fail: bool,
}

impl SimulatedTransport {
    pub fn new(delay: Duration) -> Self {
        Self { delay, fail: false }
    }

    pub fn failing(delay: Duration) -> Self {
        Self { delay, fail: true }
    }
}

#[async_trait]
impl Transport for SimulatedTransport {
    async fn submit(&self, payload: &FormPayload) -> Result<(), TransportError> {
        tracing::debug!(delay = ?self.delay, timestamp = payload.timestamp, "Simulating submission");
        tokio::time::sleep(self.delay).await;
        if self.fail {
            Err(TransportError::Simulated)
        } else {
            Ok(())
        }
    }
}
