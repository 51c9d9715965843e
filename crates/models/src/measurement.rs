use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "measurement")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_type: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub values: MeasurementValues,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id",
        on_delete = "Cascade"
    )]
    Customer,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Customer.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Named body measurements, stored as one JSONB object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct MeasurementValues(pub BTreeMap<String, f64>);

impl MeasurementValues {
    /// Non-empty, names non-blank, every value finite and positive.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.0.is_empty() {
            return Err(ModelError::validation("measurements must not be empty"));
        }
        for (name, value) in &self.0 {
            if name.trim().is_empty() {
                return Err(ModelError::validation("measurement name must not be blank"));
            }
            if !value.is_finite() || *value <= 0.0 {
                return Err(ModelError::validation(format!("measurement {name} must be a positive number")));
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementServiceType {
    Blouse,
    Churidar,
}

impl MeasurementServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blouse => "Blouse",
            Self::Churidar => "Churidar",
        }
    }
}

impl fmt::Display for MeasurementServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for MeasurementServiceType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Blouse" => Ok(Self::Blouse),
            "Churidar" => Ok(Self::Churidar),
            other => Err(ModelError::validation(format!("invalid service type: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, f64)]) -> MeasurementValues {
        MeasurementValues(pairs.iter().map(|(k, v)| (ToString::to_string(k), *v)).collect())
    }

    #[test]
    fn rejects_empty_and_non_positive_values() {
        assert!(values(&[]).validate().is_err());
        assert!(values(&[("bust", 0.0)]).validate().is_err());
        assert!(values(&[("bust", f64::NAN)]).validate().is_err());
        assert!(values(&[(" ", 30.0)]).validate().is_err());
        assert!(values(&[("bust", 34.5), ("waist", 28.0)]).validate().is_ok());
    }

    #[test]
    fn service_type_is_exact() {
        assert_eq!("Churidar".parse::<MeasurementServiceType>().unwrap(), MeasurementServiceType::Churidar);
        assert!("Saree".parse::<MeasurementServiceType>().is_err());
    }

    #[test]
    fn values_serialize_as_plain_object() {
        let v = values(&[("waist", 28.0)]);
        assert_eq!(serde_json::to_string(&v).unwrap(), r#"{"waist":28.0}"#);
    }
}
