use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub phone_number: String,
    pub alternate_phone_number: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    pub date_of_birth: Option<Date>,
    pub age: Option<i32>,
    pub sex: String,
    pub marital_status: String,
    pub joined_date: Date,
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,
    pub role: String,
    #[serde(skip_serializing)]
    pub security_pin_hash: String,
    pub document_type: String,
    pub photo_id: Option<Uuid>,
    pub document_photo_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn role(&self) -> Option<StaffRole> { self.role.parse().ok() }
}

/// Roles a staff account can hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffRole {
    Admin,
    Manager,
    Tailor,
    CuttingMaster,
    Assistant,
}

impl StaffRole {
    pub const ALL: [StaffRole; 5] = [
        StaffRole::Admin,
        StaffRole::Manager,
        StaffRole::Tailor,
        StaffRole::CuttingMaster,
        StaffRole::Assistant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Admin => "ADMIN",
            StaffRole::Manager => "MANAGER",
            StaffRole::Tailor => "TAILOR",
            StaffRole::CuttingMaster => "CUTTING_MASTER",
            StaffRole::Assistant => "ASSISTANT",
        }
    }

    /// ADMIN and MANAGER run the shop floor.
    pub fn is_supervisor(&self) -> bool { matches!(self, StaffRole::Admin | StaffRole::Manager) }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for StaffRole {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let up = s.trim().to_ascii_uppercase();
        StaffRole::ALL
            .into_iter()
            .find(|r| r.as_str() == up)
            .ok_or_else(|| ModelError::validation(format!("invalid role: {s}")))
    }
}

/// Fields of a new staff record after validation and pin hashing.
#[derive(Clone, Debug)]
pub struct NewStaff {
    pub name: String,
    pub username: String,
    pub phone_number: String,
    pub alternate_phone_number: Option<String>,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    pub age: Option<i32>,
    pub sex: String,
    pub marital_status: String,
    pub joined_date: NaiveDate,
    pub address: Option<String>,
    pub role: StaffRole,
    pub security_pin_hash: String,
    pub document_type: String,
    pub photo_id: Option<Uuid>,
    pub document_photo_id: Option<Uuid>,
}

impl NewStaff {
    /// Build the full row with a fresh id and timestamps.
    pub fn into_model(self) -> Model {
        let now = Utc::now().into();
        Model {
            id: Uuid::new_v4(),
            name: self.name,
            username: self.username.to_lowercase(),
            phone_number: self.phone_number,
            alternate_phone_number: self.alternate_phone_number,
            email: self.email,
            date_of_birth: self.date_of_birth,
            age: self.age,
            sex: self.sex,
            marital_status: self.marital_status,
            joined_date: self.joined_date,
            address: self.address,
            role: self.role.as_str().to_string(),
            security_pin_hash: self.security_pin_hash,
            document_type: self.document_type,
            photo_id: self.photo_id,
            document_photo_id: self.document_photo_id,
            created_at: now,
            updated_at: now,
        }
    }
}

pub async fn create(db: &DatabaseConnection, new: NewStaff) -> Result<Model, ModelError> {
    let m = new.into_model();
    let am: ActiveModel = m.into();
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_username(db: &DatabaseConnection, username: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Username.eq(username.to_lowercase()))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("cutting_master".parse::<StaffRole>().unwrap(), StaffRole::CuttingMaster);
        assert_eq!("ADMIN".parse::<StaffRole>().unwrap(), StaffRole::Admin);
        assert!("OWNER".parse::<StaffRole>().is_err());
    }

    #[test]
    fn role_serializes_as_upper_snake() {
        let json = serde_json::to_string(&StaffRole::CuttingMaster).unwrap();
        assert_eq!(json, "\"CUTTING_MASTER\"");
    }

    #[test]
    fn pin_hash_is_never_serialized() {
        let m = NewStaff {
            name: "Asha".into(),
            username: "Asha".into(),
            phone_number: "+919876543210".into(),
            alternate_phone_number: None,
            email: "asha@example.com".into(),
            date_of_birth: None,
            age: None,
            sex: "F".into(),
            marital_status: "Single".into(),
            joined_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            address: None,
            role: StaffRole::Tailor,
            security_pin_hash: "hash".into(),
            document_type: "Aadhaar".into(),
            photo_id: None,
            document_photo_id: None,
        }
        .into_model();
        assert_eq!(m.username, "asha");
        let json = serde_json::to_value(&m).unwrap();
        assert!(json.get("security_pin_hash").is_none());
    }
}
