use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use models::measurement::{self, Model as Measurement};

use crate::errors::ServiceError;
use crate::measurement::repository::MeasurementRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmMeasurementRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl MeasurementRepository for SeaOrmMeasurementRepository {
    async fn insert(&self, m: Measurement) -> Result<Measurement, ServiceError> {
        let am: measurement::ActiveModel = m.into();
        Ok(am.insert(&self.db).await?)
    }

    async fn update(&self, m: Measurement) -> Result<Measurement, ServiceError> {
        let am = measurement::ActiveModel::from(m).reset_all();
        Ok(am.update(&self.db).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = measurement::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Measurement>, ServiceError> {
        Ok(measurement::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Measurement>, ServiceError> {
        Ok(measurement::Entity::find()
            .filter(measurement::Column::CustomerId.eq(customer_id))
            .order_by_desc(measurement::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn delete_by_customer(&self, customer_id: Uuid) -> Result<u64, ServiceError> {
        let res = measurement::Entity::delete_many()
            .filter(measurement::Column::CustomerId.eq(customer_id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected)
    }
}
