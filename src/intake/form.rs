/// What the customer typed, keyed by the `name` attribute of each input.
///
/// Serializes exactly like the page's form data: every field is sent, blank optional ones as
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub boat_details: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("The contact form has no field named `{0}`.")]
pub struct UnknownField(pub String);

impl ContactForm {
    /// Sets a field from its form name (`firstName`, `boatDetails`, ...).
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        let field = match name {
            "firstName" => &mut self.first_name,
            "lastName" => &mut self.last_name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "location" => &mut self.location,
            "boatDetails" => &mut self.boat_details,
            "message" => &mut self.message,
            other => return Err(UnknownField(other.to_string())),
        };
        *field = value.into();
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_blank(&self) -> bool {
        self == &Self::default()
    }
}
