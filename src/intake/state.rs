use crate::domain::{FieldError, SubmissionResult};
use crate::intake::{ContactForm, QuoteRequestClient, SubmissionOutcome};
use std::time::{Duration, Instant};

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// How long a notification stays on screen before the form goes back to `Idle`.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub field_errors: Vec<FieldError>,
    pub shown_at: Instant,
}

impl Notification {
    fn success(description: String) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Success!".into(),
            description,
            field_errors: Vec::new(),
            shown_at: Instant::now(),
        }
    }

    fn error(description: String, field_errors: Vec<FieldError>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Error".into(),
            description,
            field_errors,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= NOTIFICATION_TTL
    }
}

/// ```text
///            submit                 success: true
///   Idle ───────────▶ Submitting ─────────────────▶ Succeeded ─┐
///    ▲                    │                                      │ dismiss / expire
///    │                    │ success: false, no response          │
///    │                    └──────────────────────▶ Failed ───────┤
///    └────────────────────────────────────────────────────────────┘
/// ```
/// `Succeeded` and `Failed` accept a new submit directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Succeeded(Notification),
    Failed(Notification),
}

impl FormState {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            FormState::Succeeded(notification) | FormState::Failed(notification) => {
                Some(notification)
            }
            FormState::Idle | FormState::Submitting => None,
        }
    }
}

/// The contact form and where it stands in its submission lifecycle.
#[derive(Debug, Clone)]
pub struct FormIntake {
    form: ContactForm,
    state: FormState,
}

impl Default for FormIntake {
    fn default() -> Self {
        Self::new()
    }
}

impl FormIntake {
    pub fn new() -> Self {
        Self {
            form: ContactForm::default(),
            state: FormState::Idle,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Inputs and the submit button are disabled while this is `true`.
    pub fn is_busy(&self) -> bool {
        self.state == FormState::Submitting
    }

    /// Mutable access to the fields, refused while a submission is in flight.
    pub fn edit(&mut self) -> Option<&mut ContactForm> {
        if self.is_busy() {
            None
        } else {
            Some(&mut self.form)
        }
    }

    /// Moves to `Submitting` and hands out the values to post. Returns `None` if a submission is
    /// already in flight: a second click must not trigger a second request.
    pub fn begin_submit(&mut self) -> Option<ContactForm> {
        if self.is_busy() {
            return None;
        }
        self.state = FormState::Submitting;
        Some(self.form.clone())
    }

    /// Applies the outcome of the request started by `begin_submit`. Ignored in any other state.
    pub fn resolve(&mut self, outcome: SubmissionOutcome) -> &FormState {
        if !self.is_busy() {
            tracing::debug!("Ignoring a submission outcome with no submission in flight");
            return &self.state;
        }
        self.state = match outcome {
            SubmissionOutcome::Responded(result) if result.success => {
                self.form.clear();
                FormState::Succeeded(Notification::success(result.message))
            }
            SubmissionOutcome::Responded(SubmissionResult {
                message, errors, ..
            }) => FormState::Failed(Notification::error(message, errors.unwrap_or_default())),
            SubmissionOutcome::NoResponse => FormState::Failed(Notification::error(
                UNEXPECTED_ERROR_MESSAGE.into(),
                Vec::new(),
            )),
        };
        &self.state
    }

    /// Runs a whole submission: exactly one request, whatever its outcome. Does nothing if a
    /// submission is already in flight.
    ///
    /// If the returned future is dropped before the request completes (timeout, `select!`, the
    /// page going away), the form ends up `Failed` with the generic notification instead of
    /// staying `Submitting`.
    pub async fn submit(&mut self, client: &QuoteRequestClient) -> &FormState {
        let Some(form) = self.begin_submit() else {
            return &self.state;
        };
        let mut in_flight = InFlight {
            intake: &mut *self,
            settled: false,
        };
        let outcome = client.submit(&form).await;
        in_flight.settled = true;
        drop(in_flight);
        self.resolve(outcome)
    }

    /// Hides the current notification.
    pub fn dismiss(&mut self) {
        if self.state.notification().is_some() {
            self.state = FormState::Idle;
        }
    }

    /// Hides the current notification if it has been displayed for `NOTIFICATION_TTL` already.
    pub fn expire(&mut self, now: Instant) {
        if let Some(notification) = self.state.notification() {
            if notification.is_expired(now) {
                self.state = FormState::Idle;
            }
        }
    }
}

/// Resolves an abandoned submission as `NoResponse` when dropped unsettled.
struct InFlight<'a> {
    intake: &'a mut FormIntake,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("The submission was abandoned before the endpoint answered");
            self.intake.resolve(SubmissionOutcome::NoResponse);
        }
    }
}
