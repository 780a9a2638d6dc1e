//! Contact Form Pipeline Library
//!
//! Headless contact-form submission pipeline for a static website: session
//! token issuance, field validation, honeypot detection, client-side rate
//! limiting, and a pluggable transport, driven by an explicit state machine.

pub mod config;
pub mod content;
pub mod form;
pub mod observability;
pub mod security;
pub mod storage;
pub mod submission;
pub mod transport;

pub use config::schema::PipelineConfig;
pub use form::ContactForm;
pub use submission::{SessionContext, SubmissionController, SubmissionState};
