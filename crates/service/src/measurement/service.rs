use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use models::measurement::{MeasurementServiceType, MeasurementValues, Model as Measurement};

use crate::customer::repository::CustomerRepository;
use crate::errors::ServiceError;
use crate::measurement::domain::MeasurementInput;
use crate::measurement::repository::MeasurementRepository;

#[derive(Clone)]
pub struct MeasurementService {
    repo: Arc<dyn MeasurementRepository>,
    customers: Arc<dyn CustomerRepository>,
}

impl MeasurementService {
    pub fn new(repo: Arc<dyn MeasurementRepository>, customers: Arc<dyn CustomerRepository>) -> Self {
        Self { repo, customers }
    }

    async fn ensure_customer(&self, id: Uuid) -> Result<(), ServiceError> {
        match self.customers.get(id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found("customer")),
        }
    }

    #[instrument(skip(self, input), fields(customer_id = ?input.customer_id))]
    pub async fn create(&self, input: MeasurementInput) -> Result<Measurement, ServiceError> {
        let customer_id = input.customer_id.ok_or_else(|| ServiceError::validation("customer id is required"))?;
        let service_type: MeasurementServiceType = input
            .service_type
            .as_deref()
            .ok_or_else(|| ServiceError::validation("service type is required"))?
            .parse()?;
        let values = MeasurementValues(input.values.unwrap_or_default());
        values.validate()?;
        self.ensure_customer(customer_id).await?;

        let now = Utc::now().into();
        let saved = self
            .repo
            .insert(Measurement {
                id: Uuid::new_v4(),
                customer_id,
                service_type: service_type.to_string(),
                values,
                created_at: now,
                updated_at: now,
            })
            .await?;
        info!(measurement_id = %saved.id, "measurement_created");
        Ok(saved)
    }

    pub async fn get(&self, id: Uuid) -> Result<Measurement, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("measurement"))
    }

    pub async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Measurement>, ServiceError> {
        self.ensure_customer(customer_id).await?;
        self.repo.list_by_customer(customer_id).await
    }

    #[instrument(skip(self, input), fields(measurement_id = %id))]
    pub async fn update(&self, id: Uuid, input: MeasurementInput) -> Result<Measurement, ServiceError> {
        let mut row = self.get(id).await?;
        if let Some(customer_id) = input.customer_id {
            if customer_id != row.customer_id {
                self.ensure_customer(customer_id).await?;
                row.customer_id = customer_id;
            }
        }
        if let Some(st) = input.service_type {
            row.service_type = st.parse::<MeasurementServiceType>()?.to_string();
        }
        if let Some(values) = input.values {
            let values = MeasurementValues(values);
            values.validate()?;
            row.values = values;
        }
        row.updated_at = Utc::now().into();
        let saved = self.repo.update(row).await?;
        info!(measurement_id = %saved.id, "measurement_updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("measurement"));
        }
        info!(measurement_id = %id, "measurement_deleted");
        Ok(())
    }
}
