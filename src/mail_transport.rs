use crate::domain::EmailAddress;

/// A fully formed message: who sends it, who gets it and what it says.
#[derive(Debug, Clone)]
pub struct Email {
    pub sender_name: String,
    pub sender: EmailAddress,
    pub recipient: EmailAddress,
    pub reply_to: Option<EmailAddress>,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

impl Email {
    /// `"Name" <address>`, as expected in a `From` header.
    pub fn sender_mailbox(&self) -> String {
        format!("\"{}\" <{}>", self.sender_name.replace('"', "'"), self.sender)
    }
}

/// The outbound delivery mechanism. Implementations make a single attempt: they either hand
/// the message over to the upstream relay or fail, whatever the reason.
///
/// The handler receives it as `web::Data<dyn MailTransport>`, which is why the trait has to be
/// object safe - hence `async_trait`.
#[async_trait::async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &Email) -> Result<(), anyhow::Error>;
}
