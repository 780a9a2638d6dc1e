//! Drives one contact form through a submission attempt.

use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::FormConfig;
use crate::form::{ContactForm, Notice};
use crate::observability::metrics;
use crate::security::Admission;
use crate::submission::clock::Clock;
use crate::submission::context::SessionContext;
use crate::submission::error::SubmissionError;
use crate::submission::state::SubmissionState;
use crate::transport::Transport;

pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";

/// What happened during one `submit` call.
#[derive(Debug)]
pub struct SubmissionReport {
    /// Correlates the attempt's log lines.
    pub attempt_id: Uuid,
    /// Final state: Succeeded, Failed or Blocked.
    pub state: SubmissionState,
    /// Every state entered, starting with Idle.
    pub trail: Vec<SubmissionState>,
    /// Cause, for Failed and Blocked.
    pub error: Option<SubmissionError>,
}

impl SubmissionReport {
    pub fn succeeded(&self) -> bool {
        self.state == SubmissionState::Succeeded
    }
}

/// The contact form state machine.
pub struct SubmissionController {
    context: SessionContext,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    success_notice_ms: u64,
    state: SubmissionState,
}

impl SubmissionController {
    pub fn new(
        context: SessionContext,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
        config: &FormConfig,
    ) -> Self {
        Self {
            context,
            transport,
            clock,
            success_notice_ms: config.success_notice_ms,
            state: SubmissionState::Idle,
        }
    }

    /// State after the last transition.
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Run one submit event from Idle to an outcome.
    pub async fn submit(&mut self, form: &mut ContactForm) -> SubmissionReport {
        let attempt_id = Uuid::new_v4();
        let span = tracing::info_span!("submission", %attempt_id);

        async move {
            self.state = SubmissionState::Idle;
            let mut trail = vec![SubmissionState::Idle];

            let result = self.drive(form, &mut trail).await;
            let outcome = match &result {
                Ok(()) => SubmissionState::Succeeded,
                Err(SubmissionError::BotDetected) => SubmissionState::Blocked,
                Err(_) => SubmissionState::Failed,
            };
            self.enter(outcome, &mut trail);

            if let Err(e) = &result {
                if let Some(message) = e.user_message() {
                    form.show_notice(Notice::error(message));
                }
                match e {
                    SubmissionError::BotDetected | SubmissionError::Validation(_) => {}
                    SubmissionError::RateLimited { retry_after_ms } => {
                        tracing::info!(retry_after_ms, "Submission rate limited");
                    }
                    SubmissionError::Transport(_) | SubmissionError::Storage(_) => {
                        tracing::error!(error = %e, "Submission failed");
                    }
                }
            }
            metrics::record_submission(outcome);

            SubmissionReport {
                attempt_id,
                state: outcome,
                trail,
                error: result.err(),
            }
        }
        .instrument(span)
        .await
    }

    async fn drive(
        &mut self,
        form: &mut ContactForm,
        trail: &mut Vec<SubmissionState>,
    ) -> Result<(), SubmissionError> {
        // Honeypot contents are attacker-controlled; do not log them.
        if !form.honeypot().is_empty() {
            tracing::warn!("Honeypot field populated, discarding submission");
            return Err(SubmissionError::BotDetected);
        }

        self.enter(SubmissionState::Checking, trail);
        let now = self.clock.now_ms();
        if let Admission::Denied { retry_after_ms } =
            self.context.rate_limiter().check_admission(now)?
        {
            metrics::record_rate_limited();
            return Err(SubmissionError::RateLimited { retry_after_ms });
        }

        self.enter(SubmissionState::Validating, trail);
        form.validate_all().map_err(|errors| {
            tracing::debug!(
                fields = ?errors.iter().map(|e| e.field.as_str()).collect::<Vec<_>>(),
                "Validation failed"
            );
            SubmissionError::Validation(errors)
        })?;

        let token = self.context.tokens().get_or_create_token()?;
        let payload = form.payload(token, self.clock.now_ms());

        self.enter(SubmissionState::Submitting, trail);
        form.set_submit_enabled(false);
        let sent = self.transport.submit(&payload).await;
        form.set_submit_enabled(true);
        sent?;

        // The message is out; bookkeeping failures below must not turn it
        // into a failed attempt.
        let now = self.clock.now_ms();
        if let Err(e) = self.context.rate_limiter().record_submission(now) {
            tracing::warn!(error = %e, "Failed to record submission");
        }
        form.reset();
        if let Err(e) = self.context.tokens().rotate_token() {
            tracing::warn!(error = %e, "Failed to rotate session token");
        }
        form.show_notice(Notice::success(
            SUCCESS_MESSAGE,
            now.saturating_add(self.success_notice_ms),
        ));

        tracing::info!("Submission sent");
        Ok(())
    }

    fn enter(&mut self, next: SubmissionState, trail: &mut Vec<SubmissionState>) {
        tracing::debug!(from = %self.state, to = %next, "Submission transition");
        self.state = next;
        trail.push(next);
    }
}
