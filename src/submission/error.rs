//! Submission failure taxonomy.

use thiserror::Error;

use crate::form::FieldError;
use crate::storage::StorageError;
use crate::transport::TransportError;

pub const CORRECT_ERRORS_MESSAGE: &str = "Please correct the errors in the form.";
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Sorry, there was an error sending your message. Please try again later.";

/// Why a submission attempt did not succeed.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// One or more fields failed their rules.
    #[error("{} field(s) failed validation", .0.len())]
    Validation(Vec<FieldError>),

    /// Too many recent submissions.
    #[error("rate limited, retry after {retry_after_ms} ms")]
    RateLimited { retry_after_ms: u64 },

    /// Honeypot filled. Never shown to the user.
    #[error("bot detected")]
    BotDetected,

    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    #[error("storage failed: {0}")]
    Storage(#[from] StorageError),
}

impl SubmissionError {
    /// Text for the notice banner. `None` means show nothing.
    ///
    /// Transport and storage details stay in the logs.
    pub fn user_message(&self) -> Option<String> {
        match self {
            SubmissionError::Validation(_) => Some(CORRECT_ERRORS_MESSAGE.to_string()),
            SubmissionError::RateLimited { retry_after_ms } => {
                let minutes = retry_after_ms.div_ceil(60_000);
                Some(format!(
                    "Too many submissions. Please try again in {} minute{}.",
                    minutes,
                    if minutes == 1 { "" } else { "s" }
                ))
            }
            SubmissionError::BotDetected => None,
            SubmissionError::Transport(_) | SubmissionError::Storage(_) => {
                Some(GENERIC_FAILURE_MESSAGE.to_string())
            }
        }
    }
}
