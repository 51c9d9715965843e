use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use models::order::Customization;

/// One line of a new order.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemInput {
    #[serde(alias = "serviceType")]
    pub service_type: String,
    #[serde(default, alias = "subService")]
    pub sub_service: Option<String>,
    #[serde(default)]
    pub customization: Customization,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// The `order` JSON part of a create request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderInput {
    #[serde(alias = "customerId")]
    pub customer_id: Uuid,
    #[serde(default, alias = "measurementId")]
    pub measurement_id: Option<Uuid>,
    #[serde(alias = "orderDate")]
    pub order_date: NaiveDate,
    #[serde(alias = "dueDate")]
    pub due_date: NaiveDate,
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Editable order header fields; `notes: Some("")` clears the notes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrderInput {
    #[serde(default, alias = "dueDate")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, alias = "measurementId")]
    pub measurement_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignStaffInput {
    #[serde(default, alias = "cuttingMasterId")]
    pub cutting_master_id: Option<Uuid>,
    #[serde(default, alias = "tailorId")]
    pub tailor_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemStatusInput {
    pub status: String,
}
