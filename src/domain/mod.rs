mod customer_name;
mod email_address;
mod quote_request;
mod submission_result;
mod vessel;

pub use customer_name::CustomerName;
pub use email_address::EmailAddress;
pub use quote_request::{QuoteRequest, QuoteRequestPayload};
pub use submission_result::{
    FieldError, SubmissionResult, DELIVERY_FAILED_MESSAGE, INVALID_INPUT_MESSAGE,
    QUOTE_SENT_MESSAGE,
};
pub use vessel::{BoatDetails, MarinaLocation};
