use std::collections::BTreeMap;

use serde::Deserialize;
use uuid::Uuid;

/// Create or partial-update payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeasurementInput {
    #[serde(default, alias = "customerId")]
    pub customer_id: Option<Uuid>,
    #[serde(default, alias = "serviceType")]
    pub service_type: Option<String>,
    #[serde(default, alias = "measurements")]
    pub values: Option<BTreeMap<String, f64>>,
}
