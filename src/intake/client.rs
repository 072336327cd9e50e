use crate::domain::SubmissionResult;
use crate::intake::ContactForm;
use reqwest::Client;

/// How a submission attempt ended, from the browser's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The backend answered with a `SubmissionResult`, whatever the status code.
    Responded(SubmissionResult),
    /// No usable answer: connection failure, aborted request or a body we could not decode.
    NoResponse,
}

/// Posts contact forms to the quote request endpoint. One call, no retry.
#[derive(Debug, Clone)]
pub struct QuoteRequestClient {
    http_client: Client,
    endpoint: String,
}

impl QuoteRequestClient {
    /// `base_url` is the site origin, e.g. `https://browwraps.com`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http_client: Client, base_url: &str) -> Self {
        Self {
            http_client,
            endpoint: format!("{}/api/send-email", base_url.trim_end_matches('/')),
        }
    }

    #[tracing::instrument(name = "Submitting the contact form", skip(self, form))]
    pub async fn submit(&self, form: &ContactForm) -> SubmissionOutcome {
        let response = match self.http_client.post(&self.endpoint).json(form).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error.message = %e, "The quote request endpoint is unreachable");
                return SubmissionOutcome::NoResponse;
            }
        };
        let status = response.status();
        match response.json::<SubmissionResult>().await {
            Ok(result) => SubmissionOutcome::Responded(result),
            Err(e) => {
                tracing::warn!(
                    error.message = %e,
                    %status,
                    "The quote request endpoint sent back an unexpected body"
                );
                SubmissionOutcome::NoResponse
            }
        }
    }
}
