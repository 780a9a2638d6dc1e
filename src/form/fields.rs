//! Per-field validation rules.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

static NAME_CHARS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L} '-]+$").expect("name regex should compile")
});

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex should compile")
});

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const MESSAGE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 2000;

pub const NAME_LENGTH_MESSAGE: &str = "Name must be between 2 and 100 characters";
pub const NAME_CHARS_MESSAGE: &str =
    "Name can only contain letters, spaces, hyphens, and apostrophes";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const MESSAGE_LENGTH_MESSAGE: &str = "Message must be between 10 and 2000 characters";
pub const CONSENT_MESSAGE: &str = "You must agree to the privacy policy";

/// Identity of a validated form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Name,
    Email,
    Message,
    /// Privacy-consent checkbox.
    Consent,
}

impl FieldId {
    /// Every field in display order.
    pub const ALL: [FieldId; 4] = [FieldId::Name, FieldId::Email, FieldId::Message, FieldId::Consent];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Email => "email",
            FieldId::Message => "message",
            FieldId::Consent => "consent",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed field rule, with the message shown next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: FieldId,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: FieldId, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Validate one field value.
///
/// For `Consent` the value is the checkbox's form encoding: `"on"` or
/// `"true"` means checked.
pub fn validate(field: FieldId, value: &str) -> Result<(), FieldError> {
    let trimmed = value.trim();
    match field {
        FieldId::Name => {
            let len = trimmed.chars().count();
            if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
                return Err(FieldError::new(field, NAME_LENGTH_MESSAGE));
            }
            if !NAME_CHARS_REGEX.is_match(trimmed) {
                return Err(FieldError::new(field, NAME_CHARS_MESSAGE));
            }
            Ok(())
        }
        FieldId::Email => {
            if EMAIL_REGEX.is_match(trimmed) {
                Ok(())
            } else {
                Err(FieldError::new(field, EMAIL_MESSAGE))
            }
        }
        FieldId::Message => {
            let len = trimmed.chars().count();
            if (MESSAGE_MIN_CHARS..=MESSAGE_MAX_CHARS).contains(&len) {
                Ok(())
            } else {
                Err(FieldError::new(field, MESSAGE_LENGTH_MESSAGE))
            }
        }
        FieldId::Consent => validate_consent(is_checked(trimmed)),
    }
}

/// Validate the privacy-consent flag.
pub fn validate_consent(checked: bool) -> Result<(), FieldError> {
    if checked {
        Ok(())
    } else {
        Err(FieldError::new(FieldId::Consent, CONSENT_MESSAGE))
    }
}

pub(crate) fn is_checked(value: &str) -> bool {
    value.eq_ignore_ascii_case("on") || value.eq_ignore_ascii_case("true")
}
