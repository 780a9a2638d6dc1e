//! Form input and outgoing payload.

use serde::{Deserialize, Serialize};

use crate::security::SessionToken;

/// Raw values as a user (or a headless driver) would enter them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub name: String,
    pub email: String,
    pub message: String,
    /// Honeypot. Hidden from humans, so it must stay empty.
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub consent: bool,
}

/// Data sent to the transport for one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormPayload {
    pub name: String,
    pub email: String,
    pub message: String,
    pub csrf_token: SessionToken,
    /// Client clock at assembly, epoch milliseconds.
    pub timestamp: u64,
}
