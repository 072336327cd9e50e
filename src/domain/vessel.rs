/// Where the boat is moored, as typed by the customer (e.g. `Stuart, FL`).
#[derive(Debug, Clone)]
pub struct MarinaLocation(String);

/// Free-text description of the vessel (e.g. `2024 Viking 54`).
#[derive(Debug, Clone)]
pub struct BoatDetails(String);

impl MarinaLocation {
    pub fn parse(s: String) -> Result<MarinaLocation, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Err(format!("'{s}' is not a valid marina location."))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }
}

impl BoatDetails {
    pub fn parse(s: String) -> Result<BoatDetails, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Err(format!("'{s}' is not a valid boat description."))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }
}

impl AsRef<str> for MarinaLocation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BoatDetails {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
