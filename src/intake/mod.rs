//! Client side of the contact form: collects the fields, posts them once to
//! `/api/send-email` and turns the outcome into a notification.
//!
//! Nothing here depends on a UI toolkit. A front end renders `FormIntake::state` and forwards
//! user actions (`edit`, `submit`, `dismiss`) to it.
mod client;
mod form;
mod state;

pub use client::{QuoteRequestClient, SubmissionOutcome};
pub use form::{ContactForm, UnknownField};
pub use state::{
    FormIntake, FormState, Notification, NotificationKind, NOTIFICATION_TTL,
    UNEXPECTED_ERROR_MESSAGE,
};
