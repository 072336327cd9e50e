use crate::mail_transport::{Email, MailTransport};
use anyhow::Context;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

/// How the connection to the relay gets encrypted.
#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SmtpTls {
    /// Implicit TLS from the first byte, usually on port 465.
    Wrapper,
    /// Plain connection upgraded with `STARTTLS`, usually on port 587.
    StartTls,
    /// No encryption at all. Only meant for local relays such as MailHog.
    None,
}

#[derive(Debug)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: Secret<String>,
}

pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailSender {
    pub fn new(
        host: &str,
        port: u16,
        tls: SmtpTls,
        credentials: Option<SmtpCredentials>,
        timeout: Duration,
    ) -> Result<Self, lettre::transport::smtp::Error> {
        let builder = match tls {
            SmtpTls::Wrapper => AsyncSmtpTransport::<Tokio1Executor>::relay(host)?,
            SmtpTls::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?,
            SmtpTls::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host),
        };
        let mut builder = builder.port(port).timeout(Some(timeout));
        if let Some(credentials) = credentials {
            builder = builder.credentials(Credentials::new(
                credentials.username,
                credentials.password.expose_secret().to_owned(),
            ));
        }
        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait::async_trait]
impl MailTransport for SmtpEmailSender {
    #[tracing::instrument(
        name = "Sending an email through the SMTP relay",
        skip(self, email),
        fields(subject = %email.subject)
    )]
    async fn send(&self, email: &Email) -> Result<(), anyhow::Error> {
        let message = build_message(email)?;
        let response = self
            .transport
            .send(message)
            .await
            .context("The SMTP relay did not accept the message")?;
        tracing::debug!(code = %response.code(), "SMTP relay accepted the message");
        Ok(())
    }
}

fn build_message(email: &Email) -> Result<Message, anyhow::Error> {
    let sender = Mailbox::new(
        Some(email.sender_name.clone()),
        email
            .sender
            .as_ref()
            .parse()
            .context("Invalid sender address")?,
    );
    let recipient = Mailbox::new(
        None,
        email
            .recipient
            .as_ref()
            .parse()
            .context("Invalid recipient address")?,
    );
    let mut builder = Message::builder()
        .from(sender)
        .to(recipient)
        .subject(email.subject.clone());
    if let Some(reply_to) = &email.reply_to {
        builder = builder.reply_to(Mailbox::new(
            None,
            reply_to
                .as_ref()
                .parse()
                .context("Invalid reply-to address")?,
        ));
    }
    builder
        .multipart(MultiPart::alternative_plain_html(
            email.text_body.clone(),
            email.html_body.clone(),
        ))
        .context("Failed to build the email message")
}
