use std::time::Duration;

use tokio::time::{sleep_until, Instant};

use crate::domain::{ContactDraft, Field, SubmissionRequest};
use crate::transport::{Transport, TransportError};

/// How long the success confirmation stays up before the form resets itself
pub const AUTO_CLOSE_DELAY: Duration = Duration::from_millis(2000);

/// Where a contact form is in its submission lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    /// Editable, submit enabled
    #[default]
    Idle,
    /// A submission is in flight, submit disabled
    Submitting,
    /// The transport accepted the submission, waiting for auto-close
    Success,
    /// The transport failed, editable again and submit re-enabled
    Error,
}

/// Interactive contact form: holds what the visitor typed and drives a single submission at a time
#[derive(Debug, Default)]
pub struct ContactForm {
    draft: ContactDraft,
    state: FormState,
    error: Option<String>,
    closes_at: Option<Instant>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn state(&self) -> FormState {
        self.state
    }

    pub const fn draft(&self) -> &ContactDraft {
        &self.draft
    }

    /// Message currently shown above the form, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// When the success confirmation will close, if one is showing
    pub const fn closes_at(&self) -> Option<Instant> {
        self.closes_at
    }

    /// Whether the submit control is enabled
    pub const fn can_submit(&self) -> bool {
        matches!(self.state, FormState::Idle | FormState::Error)
    }

    /// Update a field; ignored while the success confirmation is showing
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        if self.state != FormState::Success {
            self.draft.set(field, value.into());
        }
    }

    /// Press submit: validate the draft and, if it passes, move to `Submitting`
    ///
    /// Returns the submission to hand to a transport, or `None` when nothing should be sent
    /// (submit disabled, or validation failed and an error message was set).
    pub fn begin_submit(&mut self) -> Option<SubmissionRequest> {
        if !self.can_submit() {
            tracing::debug!(state = ?self.state, "Ignoring submit while it is disabled");
            return None;
        }

        self.error = None;
        match SubmissionRequest::try_from(self.draft.clone()) {
            Ok(submission) => {
                self.state = FormState::Submitting;
                Some(submission)
            }
            Err(e) => {
                self.state = FormState::Idle;
                self.error = Some(e.form_message().to_owned());
                None
            }
        }
    }

    /// Record the transport outcome of the submission in flight
    pub fn finish_submit(&mut self, outcome: Result<(), TransportError>, now: Instant) {
        if self.state != FormState::Submitting {
            return;
        }

        match outcome {
            Ok(()) => {
                self.draft = ContactDraft::default();
                self.state = FormState::Success;
                self.closes_at = Some(now + AUTO_CLOSE_DELAY);
            }
            Err(e) => {
                tracing::warn!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Contact form submission failed"
                );
                self.state = FormState::Error;
                self.error = Some(e.user_message().to_owned());
            }
        }
    }

    /// Submit the form through a transport and return the resulting state
    pub async fn submit<T: Transport>(&mut self, transport: &T) -> FormState {
        if let Some(submission) = self.begin_submit() {
            let outcome = transport.deliver(&submission).await;
            self.finish_submit(outcome, Instant::now());
        }
        self.state
    }

    /// Reset to a fresh form if the auto-close deadline has passed
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.closes_at {
            Some(deadline) if now >= deadline => {
                *self = Self::default();
                true
            }
            _ => false,
        }
    }

    /// Wait for the auto-close deadline, if armed, and reset the form
    pub async fn wait_for_auto_close(&mut self) {
        if let Some(deadline) = self.closes_at {
            sleep_until(deadline).await;
            self.tick(deadline);
        }
    }
}
