use crate::domain::{EmailAddress, QuoteRequest};
use crate::mail_transport::Email;
use tera::{Context, Tera};

const HTML_TEMPLATE: &str = "quote_request.html";
const TEXT_TEMPLATE: &str = "quote_request.txt";

pub const PHONE_NOT_PROVIDED: &str = "Not provided";
pub const NO_ADDITIONAL_DETAILS: &str = "None";

/// Turns a validated `QuoteRequest` into the email the business receives.
///
/// Templates are embedded in the binary: rendering does not depend on the working directory the
/// server was launched from. Tera escapes every value rendered into the `.html` template.
pub struct NotificationComposer {
    templates: Tera,
    sender_name: String,
    sender: EmailAddress,
    recipient: EmailAddress,
}

impl NotificationComposer {
    pub fn new(
        sender_name: String,
        sender: EmailAddress,
        recipient: EmailAddress,
    ) -> Result<Self, tera::Error> {
        let mut templates = Tera::default();
        templates.add_raw_templates(vec![
            (
                HTML_TEMPLATE,
                include_str!("../templates/quote_request.html"),
            ),
            (TEXT_TEMPLATE, include_str!("../templates/quote_request.txt")),
        ])?;
        Ok(Self {
            templates,
            sender_name,
            sender,
            recipient,
        })
    }

    #[tracing::instrument(name = "Composing the quote request notification", skip_all)]
    pub fn compose(&self, request: &QuoteRequest) -> Result<Email, tera::Error> {
        let mut context = Context::new();
        context.insert("first_name", request.first_name.as_ref());
        context.insert("last_name", request.last_name.as_ref());
        context.insert("email", request.email.as_ref());
        context.insert(
            "phone",
            request.phone.as_deref().unwrap_or(PHONE_NOT_PROVIDED),
        );
        context.insert("location", request.location.as_ref());
        context.insert("boat_details", request.boat_details.as_ref());
        context.insert(
            "message",
            request.message.as_deref().unwrap_or(NO_ADDITIONAL_DETAILS),
        );

        Ok(Email {
            sender_name: self.sender_name.clone(),
            sender: self.sender.clone(),
            recipient: self.recipient.clone(),
            reply_to: Some(request.email.clone()),
            subject: format!("New Quote Request from {}", request.full_name()),
            html_body: self.templates.render(HTML_TEMPLATE, &context)?,
            text_body: self.templates.render(TEXT_TEMPLATE, &context)?,
        })
    }
}
