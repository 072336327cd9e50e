use crate::mail_transport::{Email, MailTransport};
use anyhow::Context;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

/// Talks to a transactional email HTTP API (Postmark's `POST /email` contract).
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    authorization_token: Secret<String>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        authorization_token: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        // A request that hangs forever would keep the customer's form spinning.
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            authorization_token,
        })
    }
}

#[async_trait::async_trait]
impl MailTransport for EmailClient {
    #[tracing::instrument(
        name = "Sending an email through the HTTP API",
        skip(self, email),
        fields(subject = %email.subject)
    )]
    async fn send(&self, email: &Email) -> Result<(), anyhow::Error> {
        let url = format!("{}/email", self.base_url);
        let from = email.sender_mailbox();
        let request_body = SendEmailRequest {
            from: &from,
            to: email.recipient.as_ref(),
            reply_to: email.reply_to.as_ref().map(|r| r.as_ref()),
            subject: &email.subject,
            html_body: &email.html_body,
            text_body: &email.text_body,
        };
        self.http_client
            .post(&url)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await
            .context("Failed to reach the email API")?
            .error_for_status()
            .context("The email API refused the message")?;
        Ok(())
    }
}
