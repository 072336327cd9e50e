use crate::domain::{BoatDetails, CustomerName, EmailAddress, FieldError, MarinaLocation};
use serde_json::{Map, Value};

pub const FIRST_NAME_REQUIRED: &str = "First name is required";
pub const LAST_NAME_REQUIRED: &str = "Last name is required";
pub const INVALID_EMAIL: &str = "Invalid email address";
pub const LOCATION_REQUIRED: &str = "Location is required";
pub const BOAT_DETAILS_REQUIRED: &str = "Boat details are required";

/// # Type Driven Development
/// A `QuoteRequest` can only be obtained through `TryFrom<QuoteRequestPayload>`: holding one means
/// every required field is present and well-formed. Optional fields that were left blank are
/// `None`, never an empty string.
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub first_name: CustomerName,
    pub last_name: CustomerName,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub location: MarinaLocation,
    pub boat_details: BoatDetails,
    pub message: Option<String>,
}

impl QuoteRequest {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The untyped JSON object posted by the contact form, before any validation took place.
#[derive(Debug, Clone, Default)]
pub struct QuoteRequestPayload(Map<String, Value>);

impl QuoteRequestPayload {
    /// Anything that is not a JSON object is rejected as a whole, with an error on the root path.
    pub fn from_slice(body: &[u8]) -> Result<Self, FieldError> {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => Ok(Self(fields)),
            _ => Err(FieldError::new("", "Expected object")),
        }
    }
}

impl From<Map<String, Value>> for QuoteRequestPayload {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl TryFrom<QuoteRequestPayload> for QuoteRequest {
    type Error = Vec<FieldError>;

    /// Every field is checked, even after a failure, so that the caller can fix the whole form in
    /// one go. Errors come out in field order.
    fn try_from(payload: QuoteRequestPayload) -> Result<Self, Self::Error> {
        let mut checks = FieldChecks::new(&payload.0);

        let first_name = checks.required("firstName", CustomerName::parse, FIRST_NAME_REQUIRED);
        let last_name = checks.required("lastName", CustomerName::parse, LAST_NAME_REQUIRED);
        let email = checks.required("email", EmailAddress::parse, INVALID_EMAIL);
        let phone = checks.optional("phone");
        let location = checks.required("location", MarinaLocation::parse, LOCATION_REQUIRED);
        let boat_details =
            checks.required("boatDetails", BoatDetails::parse, BOAT_DETAILS_REQUIRED);
        let message = checks.optional("message");

        match (
            first_name,
            last_name,
            email,
            phone,
            location,
            boat_details,
            message,
        ) {
            (
                Some(first_name),
                Some(last_name),
                Some(email),
                Some(phone),
                Some(location),
                Some(boat_details),
                Some(message),
            ) => Ok(Self {
                first_name,
                last_name,
                email,
                phone,
                location,
                boat_details,
                message,
            }),
            _ => Err(checks.errors),
        }
    }
}

struct FieldChecks<'a> {
    fields: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> FieldChecks<'a> {
    fn new(fields: &'a Map<String, Value>) -> Self {
        Self {
            fields,
            errors: Vec::new(),
        }
    }

    /// Returns `None` if the field is missing, is not a string or does not pass `parse`; the
    /// reason is recorded in `errors`.
    fn required<T>(
        &mut self,
        path: &str,
        parse: impl FnOnce(String) -> Result<T, String>,
        message: &str,
    ) -> Option<T> {
        match self.fields.get(path) {
            None | Some(Value::Null) => {
                self.errors.push(FieldError::new(path, "Required"));
                None
            }
            Some(Value::String(s)) => match parse(s.trim().to_string()) {
                Ok(value) => Some(value),
                Err(reason) => {
                    tracing::debug!(field = path, %reason, "Rejecting quote request field");
                    self.errors.push(FieldError::new(path, message));
                    None
                }
            },
            Some(other) => {
                self.errors.push(type_mismatch(path, other));
                None
            }
        }
    }

    /// The outer `Option` is `None` when the field holds something other than a string; the inner
    /// one is `None` when the customer left the field blank.
    fn optional(&mut self, path: &str) -> Option<Option<String>> {
        match self.fields.get(path) {
            None | Some(Value::Null) => Some(None),
            Some(Value::String(s)) if s.trim().is_empty() => Some(None),
            Some(Value::String(s)) => Some(Some(s.trim().to_string())),
            Some(other) => {
                self.errors.push(type_mismatch(path, other));
                None
            }
        }
    }
}

fn type_mismatch(path: &str, value: &Value) -> FieldError {
    let received = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    FieldError::new(path, format!("Expected string, received {received}"))
}
