//! Presentation adapter for the contact form.
//!
//! `ContactForm` holds what a renderer would draw: field values, per-field
//! validity and error text, the submit button's enabled flag, and the notice
//! banner. A front-end mirrors this state; tests assert on it directly.

use crate::form::fields::{self, is_checked, FieldError, FieldId};
use crate::form::payload::{FormInput, FormPayload};
use crate::security::sanitize::sanitize_on_input;
use crate::security::SessionToken;

/// Validity of one field as last computed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    /// `None` until the field is first validated.
    pub valid: Option<bool>,
    /// Inline error text, present only while invalid.
    pub error: Option<&'static str>,
}

impl FieldState {
    pub fn is_invalid(&self) -> bool {
        self.valid == Some(false)
    }

    fn apply(&mut self, result: &Result<(), FieldError>) {
        match result {
            Ok(()) => {
                self.valid = Some(true);
                self.error = None;
            }
            Err(e) => {
                self.valid = Some(false);
                self.error = Some(e.message);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Banner shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    /// Epoch milliseconds after which the notice hides itself.
    pub dismiss_at_ms: Option<u64>,
}

impl Notice {
    pub fn success(message: impl Into<String>, dismiss_at_ms: u64) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
            dismiss_at_ms: Some(dismiss_at_ms),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            dismiss_at_ms: None,
        }
    }
}

/// State of one contact form instance.
#[derive(Debug, Clone)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
    website: String,
    consent: bool,
    states: [FieldState; 4],
    submit_enabled: bool,
    notice: Option<Notice>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    /// An empty form with the submit button enabled.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            website: String::new(),
            consent: false,
            states: Default::default(),
            submit_enabled: true,
            notice: None,
        }
    }

    /// A form filled as if each value had been typed in.
    pub fn from_input(input: &FormInput) -> Self {
        let mut form = Self::new();
        form.input(FieldId::Name, &input.name);
        form.input(FieldId::Email, &input.email);
        form.input(FieldId::Message, &input.message);
        form.set_consent(input.consent);
        form.set_honeypot(&input.website);
        form
    }

    /// Handle a keystroke: cleanse the raw value, and re-check a field that is
    /// already showing an error so it clears as soon as it becomes valid.
    pub fn input(&mut self, field: FieldId, raw: &str) {
        match field {
            FieldId::Name => self.name = sanitize_on_input(raw),
            FieldId::Email => self.email = sanitize_on_input(raw),
            FieldId::Message => self.message = sanitize_on_input(raw),
            FieldId::Consent => self.consent = is_checked(raw.trim()),
        }
        self.revalidate_if_invalid(field);
    }

    /// Handle focus leaving a field.
    pub fn blur(&mut self, field: FieldId) -> Result<(), FieldError> {
        let result = match field {
            FieldId::Consent => fields::validate_consent(self.consent),
            _ => fields::validate(field, self.value(field)),
        };
        self.states[field.index()].apply(&result);
        result
    }

    pub fn set_consent(&mut self, checked: bool) {
        self.consent = checked;
        self.revalidate_if_invalid(FieldId::Consent);
    }

    /// Fill the hidden honeypot field. Only automated submitters do this.
    pub fn set_honeypot(&mut self, raw: &str) {
        self.website = raw.to_string();
    }

    /// Validate every field, reporting all failures rather than the first.
    pub fn validate_all(&mut self) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = FieldId::ALL
            .into_iter()
            .filter_map(|field| self.blur(field).err())
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Current value of a text field. `Consent` reads as `"on"` or `""`.
    pub fn value(&self, field: FieldId) -> &str {
        match field {
            FieldId::Name => &self.name,
            FieldId::Email => &self.email,
            FieldId::Message => &self.message,
            FieldId::Consent if self.consent => "on",
            FieldId::Consent => "",
        }
    }

    pub fn field_state(&self, field: FieldId) -> &FieldState {
        &self.states[field.index()]
    }

    pub fn consent(&self) -> bool {
        self.consent
    }

    pub fn honeypot(&self) -> &str {
        &self.website
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Hide a notice whose display time has run out.
    pub fn tick(&mut self, now_ms: u64) {
        let expired = self
            .notice
            .as_ref()
            .and_then(|n| n.dismiss_at_ms)
            .is_some_and(|at| now_ms >= at);
        if expired {
            self.notice = None;
        }
    }

    /// Clear every value and validity marker.
    pub fn reset(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
        self.website.clear();
        self.consent = false;
        self.states = Default::default();
    }

    /// Re-check a field already showing an error. The outcome lands in its
    /// field state.
    fn revalidate_if_invalid(&mut self, field: FieldId) {
        if self.states[field.index()].is_invalid() {
            self.blur(field).ok();
        }
    }

    pub(crate) fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    pub(crate) fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub(crate) fn payload(&self, csrf_token: SessionToken, timestamp: u64) -> FormPayload {
        FormPayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
            csrf_token,
            timestamp,
        }
    }
}
