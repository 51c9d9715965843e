use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use models::staff::{self, Model as Staff, StaffRole};

use crate::errors::ServiceError;
use crate::staff::repository::StaffRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmStaffRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl StaffRepository for SeaOrmStaffRepository {
    async fn insert(&self, s: Staff) -> Result<Staff, ServiceError> {
        let am: staff::ActiveModel = s.into();
        Ok(am.insert(&self.db).await?)
    }

    async fn update(&self, s: Staff) -> Result<Staff, ServiceError> {
        let am = staff::ActiveModel::from(s).reset_all();
        Ok(am.update(&self.db).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = staff::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Staff>, ServiceError> {
        Ok(staff::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Staff>, ServiceError> {
        Ok(staff::find_by_username(&self.db, username).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Staff>, ServiceError> {
        Ok(staff::Entity::find()
            .filter(staff::Column::Email.eq(email.to_string()))
            .one(&self.db)
            .await?)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Staff>, ServiceError> {
        Ok(staff::Entity::find()
            .filter(
                Condition::any()
                    .add(staff::Column::PhoneNumber.eq(phone.to_string()))
                    .add(staff::Column::AlternatePhoneNumber.eq(phone.to_string())),
            )
            .one(&self.db)
            .await?)
    }

    async fn list(&self, role: Option<StaffRole>) -> Result<Vec<Staff>, ServiceError> {
        let mut q = staff::Entity::find().order_by_asc(staff::Column::Name);
        if let Some(r) = role {
            q = q.filter(staff::Column::Role.eq(r.as_str()));
        }
        Ok(q.all(&self.db).await?)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(staff::Entity::find().count(&self.db).await?)
    }
}
