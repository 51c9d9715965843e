use serde::Deserialize;

use crate::errors::ServiceError;

/// Customer fields as posted by the admin UI, either as form parts or JSON.
/// Every field is optional so the same shape serves create and partial update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "phonenumber", alias = "phoneNumber")]
    pub phone_number: Option<String>,
    #[serde(default, alias = "alternatePhoneNumber", alias = "alternatephonenumber")]
    pub alternate_phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "maritalstatus", alias = "maritalStatus")]
    pub marital_status: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, alias = "townOrVillage")]
    pub town_or_village: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, alias = "customerSince")]
    pub customer_since: Option<String>,
}

impl CustomerInput {
    pub fn has_address(&self) -> bool {
        [&self.town_or_village, &self.district, &self.state]
            .iter()
            .any(|p| p.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }
}

/// Field a customer search runs against.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchField {
    /// name, phone or alternate phone
    Any,
    Name,
    Phone,
}

impl SearchField {
    pub fn parse(kind: Option<&str>) -> Result<Self, ServiceError> {
        match kind.map(|k| k.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") => Ok(SearchField::Any),
            Some("name") => Ok(SearchField::Name),
            Some("phonenumber") | Some("phone") => Ok(SearchField::Phone),
            Some(other) => Err(ServiceError::validation(format!(
                "invalid search type: {other}; use name or phonenumber"
            ))),
        }
    }
}
