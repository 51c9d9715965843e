use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// One garment order. Items and image ids are embedded JSONB documents.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub order_number: String,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub staff_id: Uuid,
    pub staff_name: String,
    pub measurement_id: Option<Uuid>,
    pub order_date: Date,
    pub due_date: Date,
    #[sea_orm(column_type = "JsonBinary")]
    pub items: OrderItems,
    pub status: String,
    #[sea_orm(column_type = "Double")]
    pub total_price: f64,
    #[sea_orm(column_type = "JsonBinary")]
    pub image_ids: ImageIds,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    /// Bumped on every write; a stale copy cannot overwrite a newer row.
    pub version: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Customer.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn item(&self, item_id: Uuid) -> Option<&OrderItem> {
        self.items.0.iter().find(|i| i.item_id == item_id)
    }

    pub fn item_mut(&mut self, item_id: Uuid) -> Option<&mut OrderItem> {
        self.items.0.iter_mut().find(|i| i.item_id == item_id)
    }

    /// True when `staff_id` is the cutting master or tailor of any item.
    pub fn is_assigned_to(&self, staff_id: Uuid) -> bool {
        self.items
            .0
            .iter()
            .any(|i| i.cutting_master_id == Some(staff_id) || i.tailor_id == Some(staff_id))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct OrderItems(pub Vec<OrderItem>);

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct ImageIds(pub Vec<Uuid>);

/// A garment line within an order, tracked through the production workflow on its own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub item_id: Uuid,
    pub service_type: String,
    #[serde(default)]
    pub sub_service: Option<String>,
    pub customization: Customization,
    pub status: ItemStatus,
    #[serde(default)]
    pub cutting_master_id: Option<Uuid>,
    #[serde(default)]
    pub tailor_id: Option<Uuid>,
    #[serde(default)]
    pub cutting_completed_at: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub stitching_completed_at: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub additional_work_completed_at: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub ironing_completed_at: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub quality_check_completed_at: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub cloth_image_id: Option<Uuid>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl OrderItem {
    /// Slot recording when `stage` was left, if that stage has one.
    pub fn completed_at_mut(&mut self, stage: ItemStatus) -> Option<&mut Option<DateTimeWithTimeZone>> {
        match stage {
            ItemStatus::Cutting => Some(&mut self.cutting_completed_at),
            ItemStatus::Stitching => Some(&mut self.stitching_completed_at),
            ItemStatus::AdditionalWork => Some(&mut self.additional_work_completed_at),
            ItemStatus::Ironing => Some(&mut self.ironing_completed_at),
            ItemStatus::QualityCheck => Some(&mut self.quality_check_completed_at),
            ItemStatus::Pending | ItemStatus::Completed => None,
        }
    }
}

/// Customization type plus free-form detail fields (`neckShape`, `handType`, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Customization {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub details: BTreeMap<String, serde_json::Value>,
}

impl Customization {
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).and_then(|v| v.as_str())
    }
}

/// Production stages in workflow order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    Pending,
    Cutting,
    Stitching,
    AdditionalWork,
    Ironing,
    QualityCheck,
    Completed,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 7] = [
        ItemStatus::Pending,
        ItemStatus::Cutting,
        ItemStatus::Stitching,
        ItemStatus::AdditionalWork,
        ItemStatus::Ironing,
        ItemStatus::QualityCheck,
        ItemStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "Pending",
            ItemStatus::Cutting => "Cutting",
            ItemStatus::Stitching => "Stitching",
            ItemStatus::AdditionalWork => "AdditionalWork",
            ItemStatus::Ironing => "Ironing",
            ItemStatus::QualityCheck => "QualityCheck",
            ItemStatus::Completed => "Completed",
        }
    }

    /// The stage that follows in the full workflow.
    pub fn next(&self) -> Option<ItemStatus> {
        let idx = ItemStatus::ALL.iter().position(|s| s == self)?;
        ItemStatus::ALL.get(idx + 1).copied()
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ItemStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s.chars().filter(|c| !c.is_whitespace() && *c != '_').collect::<String>().to_lowercase();
        ItemStatus::ALL
            .into_iter()
            .find(|st| st.as_str().to_lowercase() == key)
            .ok_or_else(|| ModelError::validation(format!("invalid item status: {s}")))
    }
}

/// Order-level status derived from its items.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::InProgress => "InProgress",
            OrderStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for OrderStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s.chars().filter(|c| !c.is_whitespace() && *c != '_').collect::<String>().to_lowercase();
        match key.as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "inprogress" => Ok(OrderStatus::InProgress),
            "completed" => Ok(OrderStatus::Completed),
            _ => Err(ModelError::validation(format!("invalid order status: {s}"))),
        }
    }
}

/// `ORD-YYYYMMDD-XXXXXXXX`, the suffix being the first eight hex digits of the order id.
pub fn order_number(order_date: NaiveDate, id: Uuid) -> String {
    let simple = id.simple().to_string().to_uppercase();
    format!("ORD-{}-{}", order_date.format("%Y%m%d"), &simple[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_workflow_order() {
        assert_eq!(ItemStatus::Pending.next(), Some(ItemStatus::Cutting));
        assert_eq!(ItemStatus::Stitching.next(), Some(ItemStatus::AdditionalWork));
        assert_eq!(ItemStatus::Completed.next(), None);
        assert!(ItemStatus::Cutting < ItemStatus::Ironing);
    }

    #[test]
    fn status_parsing_accepts_spaced_names() {
        assert_eq!("Additional Work".parse::<ItemStatus>().unwrap(), ItemStatus::AdditionalWork);
        assert_eq!("quality_check".parse::<ItemStatus>().unwrap(), ItemStatus::QualityCheck);
        assert_eq!("In Progress".parse::<OrderStatus>().unwrap(), OrderStatus::InProgress);
        assert!("Shipped".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn order_number_has_date_and_suffix() {
        let id = Uuid::parse_str("1a2b3c4d-0000-4000-8000-000000000000").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(order_number(date, id), "ORD-20240309-1A2B3C4D");
    }

    #[test]
    fn customization_reads_type_field() {
        let c: Customization = serde_json::from_str(r#"{"type":"Pattern","details":{"neckShape":"V"}}"#).unwrap();
        assert_eq!(c.kind, "Pattern");
        assert_eq!(c.detail("neckShape"), Some("V"));
        assert_eq!(c.detail("handType"), None);
    }
}
