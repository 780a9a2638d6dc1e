//! Contact Form Pipeline (headless driver)
//!
//! Runs one contact form submission through the full pipeline without a
//! browser, using the same state machine a front-end would drive.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │               SUBMISSION CONTROLLER               │
//!   Form values       │                                                   │
//!   ──────────────────┼─▶ honeypot ─▶ rate limit ─▶ validate ─▶ transport ─┼──▶ endpoint
//!                     │      │            │             │           │     │
//!                     │   Blocked      Failed        Failed    Succeeded  │
//!                     │                   │                        │      │
//!                     │           ┌───────▼────────┐      ┌────────▼────┐ │
//!                     │           │ durable store  │      │session store│ │
//!                     │           │form_submissions│      │ csrf_token  │ │
//!                     │           └────────────────┘      └─────────────┘ │
//!                     └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use contact_pipeline::config::{load_config, PipelineConfig};
use contact_pipeline::form::{ContactForm, FieldId, FormInput};
use contact_pipeline::observability::logging;
use contact_pipeline::storage::{FileStore, MemoryStore};
use contact_pipeline::submission::{SessionContext, SubmissionController, SystemClock};
use contact_pipeline::transport;

#[derive(Parser)]
#[command(name = "contact-pipeline")]
#[command(about = "Run one contact form submission headlessly", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON file with name, email, message, website and consent.
    #[arg(short, long, conflicts_with_all = ["name", "email", "message", "website", "consent"])]
    input: Option<PathBuf>,

    #[arg(long, default_value = "")]
    name: String,

    #[arg(long, default_value = "")]
    email: String,

    #[arg(long, default_value = "")]
    message: String,

    /// Honeypot value. Anything here marks the submission as automated.
    #[arg(long, default_value = "")]
    website: String,

    /// Agree to the privacy policy.
    #[arg(long)]
    consent: bool,
}

impl Cli {
    fn form_input(&self) -> Result<FormInput, Box<dyn std::error::Error>> {
        match &self.input {
            Some(path) => Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?),
            None => Ok(FormInput {
                name: self.name.clone(),
                email: self.email.clone(),
                message: self.message.clone(),
                website: self.website.clone(),
                consent: self.consent,
            }),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };
    logging::init(&config.observability.log_level);

    tracing::info!(
        transport = ?config.transport.kind,
        durable_path = %config.storage.durable_path,
        max_submissions = config.form.max_submissions,
        window_ms = config.form.window_ms,
        "Configuration loaded"
    );

    let durable = FileStore::open(&config.storage.durable_path)?;
    let context = SessionContext::new(
        Arc::new(MemoryStore::new()),
        Arc::new(durable),
        &config.form,
    );
    context.init()?;

    let mut controller = SubmissionController::new(
        context,
        transport::from_config(&config.transport)?,
        Arc::new(SystemClock),
        &config.form,
    );

    let mut form = ContactForm::from_input(&cli.form_input()?);
    let report = controller.submit(&mut form).await;

    let field_errors: serde_json::Map<String, serde_json::Value> = FieldId::ALL
        .into_iter()
        .filter_map(|field| {
            form.field_state(field)
                .error
                .map(|message| (field.to_string(), message.into()))
        })
        .collect();

    let summary = serde_json::json!({
        "attempt_id": report.attempt_id,
        "state": report.state,
        "trail": report.trail,
        "notice": form.notice().map(|n| n.message.clone()),
        "field_errors": field_errors,
        "history": controller.context().rate_limiter().history()?,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
