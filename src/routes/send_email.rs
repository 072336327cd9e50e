use crate::domain::{FieldError, QuoteRequest, QuoteRequestPayload, SubmissionResult};
use crate::mail_transport::MailTransport;
use crate::notification::NotificationComposer;
use crate::utils::error_chain_fmt;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;

/// Largest body accepted on `/api/send-email`, in bytes.
pub const MAX_BODY_SIZE: usize = 256 * 1024;
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Payload too large";

#[derive(thiserror::Error)]
pub enum SendQuoteError {
    #[error("{} field(s) of the quote request failed validation.", .0.len())]
    ValidationError(Vec<FieldError>),
    #[error("The request body is larger than the accepted size.")]
    PayloadTooLarge,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SendQuoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// The caller always gets a `SubmissionResult` back. What went wrong with the delivery stays in
/// our logs: the response only carries the fixed, generic message.
impl ResponseError for SendQuoteError {
    fn status_code(&self) -> StatusCode {
        match self {
            SendQuoteError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SendQuoteError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            SendQuoteError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            SendQuoteError::ValidationError(errors) => SubmissionResult::rejected(errors.clone()),
            SendQuoteError::PayloadTooLarge => SubmissionResult::rejected(vec![FieldError::new(
                "",
                PAYLOAD_TOO_LARGE_MESSAGE,
            )]),
            SendQuoteError::UnexpectedError(_) => SubmissionResult::delivery_failed(),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// The body is read from the raw `web::Payload` rather than through `web::Json` or `web::Bytes`:
/// a payload of the wrong shape or size must still be answered with a `SubmissionResult`, not with
/// the extractor's plain-text 400 or 413.
///
/// There is no deduplication: posting the same payload twice sends two emails.
#[tracing::instrument(
    name = "Relaying a quote request",
    skip(payload, composer, transport),
    fields(
        customer_email = tracing::field::Empty,
        customer_name = tracing::field::Empty
    )
)]
pub async fn send_quote_request(
    payload: web::Payload,
    composer: web::Data<NotificationComposer>,
    transport: web::Data<dyn MailTransport>,
) -> Result<HttpResponse, SendQuoteError> {
    let body = read_body(payload).await?;
    let quote_request = QuoteRequestPayload::from_slice(&body)
        .map_err(|e| vec![e])
        .and_then(QuoteRequest::try_from)
        .map_err(|errors| {
            tracing::info!(
                rejected_fields = errors.len(),
                "Quote request rejected by validation"
            );
            SendQuoteError::ValidationError(errors)
        })?;

    let span = tracing::Span::current();
    span.record(
        "customer_email",
        &tracing::field::display(&quote_request.email),
    );
    span.record(
        "customer_name",
        &tracing::field::display(quote_request.full_name()),
    );

    let email = composer
        .compose(&quote_request)
        .context("Failed to compose the quote request notification.")?;

    if let Err(e) = transport.send(&email).await {
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "Failed to deliver the quote request notification"
        );
        return Err(SendQuoteError::UnexpectedError(
            e.context("Failed to deliver the quote request notification."),
        ));
    }

    Ok(HttpResponse::Ok().json(SubmissionResult::sent()))
}

#[tracing::instrument(name = "Reading the quote request body", skip(payload))]
async fn read_body(payload: web::Payload) -> Result<web::Bytes, SendQuoteError> {
    match payload.to_bytes_limited(MAX_BODY_SIZE).await {
        Ok(body) => body
            .map_err(|e| anyhow::anyhow!("Failed to read the request body: {e}"))
            .map_err(SendQuoteError::UnexpectedError),
        Err(_) => {
            tracing::info!(
                limit = MAX_BODY_SIZE,
                "Quote request rejected: body too large"
            );
            Err(SendQuoteError::PayloadTooLarge)
        }
    }
}
