use async_trait::async_trait;
use uuid::Uuid;

use models::measurement::Model as Measurement;

use crate::errors::ServiceError;

#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    async fn insert(&self, m: Measurement) -> Result<Measurement, ServiceError>;
    async fn update(&self, m: Measurement) -> Result<Measurement, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Measurement>, ServiceError>;
    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Measurement>, ServiceError>;
    /// Returns the number of rows removed.
    async fn delete_by_customer(&self, customer_id: Uuid) -> Result<u64, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Mutex;

    use chrono::Utc;
    use models::measurement::MeasurementValues;

    #[derive(Default)]
    pub struct MockMeasurementRepository {
        rows: Mutex<HashMap<Uuid, Measurement>>,
    }

    impl MockMeasurementRepository {
        /// Insert a minimal measurement for `customer_id`.
        pub fn seed(&self, customer_id: Uuid, service_type: &str) -> Measurement {
            let now = Utc::now().into();
            let m = Measurement {
                id: Uuid::new_v4(),
                customer_id,
                service_type: service_type.to_string(),
                values: MeasurementValues(BTreeMap::from([("length".to_string(), 40.0)])),
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().unwrap().insert(m.id, m.clone());
            m
        }

        pub fn count_for(&self, customer_id: Uuid) -> usize {
            self.rows.lock().unwrap().values().filter(|m| m.customer_id == customer_id).count()
        }
    }

    #[async_trait]
    impl MeasurementRepository for MockMeasurementRepository {
        async fn insert(&self, m: Measurement) -> Result<Measurement, ServiceError> {
            self.rows.lock().unwrap().insert(m.id, m.clone());
            Ok(m)
        }

        async fn update(&self, m: Measurement) -> Result<Measurement, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            if !rows.contains_key(&m.id) {
                return Err(ServiceError::not_found("measurement"));
            }
            rows.insert(m.id, m.clone());
            Ok(m)
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
            Ok(self.rows.lock().unwrap().remove(&id).is_some())
        }

        async fn get(&self, id: Uuid) -> Result<Option<Measurement>, ServiceError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Measurement>, ServiceError> {
            let mut found: Vec<Measurement> =
                self.rows.lock().unwrap().values().filter(|m| m.customer_id == customer_id).cloned().collect();
            found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(found)
        }

        async fn delete_by_customer(&self, customer_id: Uuid) -> Result<u64, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|_, m| m.customer_id != customer_id);
            Ok((before - rows.len()) as u64)
        }
    }
}
