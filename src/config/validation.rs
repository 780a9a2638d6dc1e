//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (window > 0, limits consistent)
//! - Check the HTTP endpoint parses when the HTTP transport is selected
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PipelineConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use url::Url;

use crate::config::schema::{PipelineConfig, TransportKind};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &PipelineConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let form = &config.form;
    if form.window_ms == 0 {
        errors.push(ValidationError::new("form.window_ms", "must be greater than 0"));
    }
    if form.max_submissions == 0 {
        errors.push(ValidationError::new("form.max_submissions", "must be at least 1"));
    }
    if form.history_cap < form.max_submissions {
        errors.push(ValidationError::new(
            "form.history_cap",
            format!(
                "must be at least max_submissions ({}), got {}",
                form.max_submissions, form.history_cap
            ),
        ));
    }
    if form.success_notice_ms == 0 {
        errors.push(ValidationError::new("form.success_notice_ms", "must be greater than 0"));
    }

    let transport = &config.transport;
    if transport.kind == TransportKind::Http {
        match Url::parse(&transport.endpoint) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(ValidationError::new(
                "transport.endpoint",
                format!("unsupported scheme '{}'", url.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new(
                "transport.endpoint",
                format!("invalid URL: {}", e),
            )),
        }
        if transport.token_header.trim().is_empty() {
            errors.push(ValidationError::new("transport.token_header", "must not be empty"));
        }
        if transport.timeout_secs == 0 {
            errors.push(ValidationError::new("transport.timeout_secs", "must be greater than 0"));
        }
    }

    if config.storage.durable_path.trim().is_empty() {
        errors.push(ValidationError::new("storage.durable_path", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
