//! Metrics collection.
//!
//! # Metrics
//! - `contact_submissions_total` (counter): attempts by final state
//! - `contact_rate_limited_total` (counter): attempts denied admission
//! - `contact_content_fallback_total` (counter): content loads that fell back
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; a no-op until a recorder is installed
//! - Labels are static strings only

use crate::submission::SubmissionState;

/// Record the final state of a submission attempt.
pub fn record_submission(state: SubmissionState) {
    metrics::counter!("contact_submissions_total", "outcome" => state.as_str()).increment(1);
}

/// Record an attempt denied by the rate limiter.
pub fn record_rate_limited() {
    metrics::counter!("contact_rate_limited_total").increment(1);
}

/// Record a content load that used the fallback set.
pub fn record_content_fallback(reason: &'static str) {
    metrics::counter!("contact_content_fallback_total", "reason" => reason).increment(1);
}
