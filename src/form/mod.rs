//! Contact form subsystem.
//!
//! # Data Flow
//! ```text
//! keystroke → ContactForm::input (sanitize, re-validate if already invalid)
//! blur      → ContactForm::blur  (fields::validate → FieldState)
//! submit    → ContactForm::validate_all → FormPayload (submission controller)
//! ```
//!
//! # Design Decisions
//! - Rules in fields.rs are pure; view.rs only reflects their results
//! - Field state is transient and never persisted

pub mod fields;
pub mod payload;
pub mod view;

pub use fields::{validate, validate_consent, FieldError, FieldId};
pub use payload::{FormInput, FormPayload};
pub use view::{ContactForm, FieldState, Notice, NoticeKind};
