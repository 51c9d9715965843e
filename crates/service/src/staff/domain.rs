use serde::Serialize;
use uuid::Uuid;

/// Raw create-staff form values; the service validates them.
#[derive(Debug, Clone, Default)]
pub struct CreateStaffInput {
    pub name: String,
    pub username: String,
    pub phone_number: String,
    pub alternate_phone_number: Option<String>,
    pub email: String,
    pub date_of_birth: Option<String>,
    pub sex: String,
    pub marital_status: String,
    pub role: String,
    pub security_pin: String,
    pub joined_date: String,
    pub document_type: String,
    pub address: Option<String>,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateStaffInput {
    pub name: Option<String>,
    pub username: Option<String>,
    pub phone_number: Option<String>,
    /// Empty or bare `+91` clears the alternate number.
    pub alternate_phone_number: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<String>,
    pub sex: Option<String>,
    pub marital_status: Option<String>,
    pub role: Option<String>,
    pub security_pin: Option<String>,
    pub joined_date: Option<String>,
    pub document_type: Option<String>,
    pub address: Option<String>,
}

/// Row of the staff list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StaffSummary {
    pub id: Uuid,
    pub name: String,
    pub role: String,
}

impl From<models::staff::Model> for StaffSummary {
    fn from(m: models::staff::Model) -> Self { Self { id: m.id, name: m.name, role: m.role } }
}
