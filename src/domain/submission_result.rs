pub const QUOTE_SENT_MESSAGE: &str = "Your quote request has been sent successfully!";
pub const INVALID_INPUT_MESSAGE: &str = "Please check your form inputs and try again.";
pub const DELIVERY_FAILED_MESSAGE: &str = "Failed to send your request. Please try again later.";

/// A single violated constraint, `path` being the name of the offending field in the payload.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// What the caller gets back from `POST /api/send-email`, whatever the outcome.
///
/// `errors` is only ever populated when the payload was rejected: a delivery failure carries no
/// detail on purpose, the cause stays in the server logs.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmissionResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl SubmissionResult {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: QUOTE_SENT_MESSAGE.into(),
            errors: None,
        }
    }

    pub fn rejected(errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            message: INVALID_INPUT_MESSAGE.into(),
            errors: Some(errors),
        }
    }

    pub fn delivery_failed() -> Self {
        Self {
            success: false,
            message: DELIVERY_FAILED_MESSAGE.into(),
            errors: None,
        }
    }
}
