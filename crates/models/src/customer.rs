use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub phone_number: String,
    pub alternate_phone_number: Option<String>,
    pub email: Option<String>,
    pub marital_status: String,
    pub gender: String,
    pub town_or_village: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub customer_since: Date,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::measurement::Entity")]
    Measurement,
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
}

impl Related<super::measurement::Entity> for Entity {
    fn to() -> RelationDef { Relation::Measurement.def() }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef { Relation::Order.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Postal address parts; all optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub town_or_village: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.town_or_village.is_none() && self.district.is_none() && self.state.is_none()
    }
}

impl Model {
    pub fn address(&self) -> Option<Address> {
        let a = Address {
            town_or_village: self.town_or_village.clone(),
            district: self.district.clone(),
            state: self.state.clone(),
        };
        (!a.is_empty()).then_some(a)
    }

    pub fn set_address(&mut self, a: Address) {
        self.town_or_village = a.town_or_village;
        self.district = a.district;
        self.state = a.state;
    }
}
