//! Submission subsystem: the contact form state machine.
//!
//! # States
//! - Idle: waiting for a submit event
//! - Checking: consulting the rate limiter
//! - Validating: re-running every field rule and the consent check
//! - Submitting: payload handed to the transport, submit button disabled
//! - Succeeded / Failed / Blocked: outcome of one attempt
//!
//! # State Transitions
//! ```text
//! Idle → Blocked: honeypot filled (silent, no side effects)
//! Idle → Checking → Failed: rate limit denied (retry-after notice)
//! Checking → Validating → Failed: field or consent errors (inline errors kept)
//! Validating → Submitting → Failed: transport error (nothing recorded)
//! Submitting → Succeeded: record, clear form, rotate token, timed notice
//! ```
//!
//! # Design Decisions
//! - Every submit restarts from Idle; no outcome is terminal for the form
//! - Admission is checked at submit time, never cached
//! - One attempt in flight per controller (`submit` takes `&mut self`)

pub mod clock;
pub mod context;
pub mod controller;
pub mod error;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use context::SessionContext;
pub use controller::{SubmissionController, SubmissionReport};
pub use error::SubmissionError;
pub use state::SubmissionState;
