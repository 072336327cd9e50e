#[derive(Debug, Clone)]
pub struct CustomerName(String);

impl CustomerName {
    /// Returns an instance of `CustomerName` if the input satisfies all our validation constraints
    /// on customer names, the reason of the rejection otherwise.
    pub fn parse(s: String) -> Result<CustomerName, String> {
        // `.trim()` returns a view over the input `s` without trailing whitespace-like characters.
        // `.is_empty` checks if the view contains any character.
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Err(format!("'{s}' is not a valid customer name."))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }
}

/// The caller gets a shared reference to the inner string. This gives the caller **read-only**
/// access, they have no way to compromise our invariants!
impl AsRef<str> for CustomerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
