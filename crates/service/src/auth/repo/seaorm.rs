use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::warn;

use crate::auth::domain::{AuthIdentity, StaffCredentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_credentials(&self, username: &str) -> Result<Option<StaffCredentials>, AuthError> {
        let res = models::staff::Entity::find()
            .filter(models::staff::Column::Username.eq(username.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        let Some(s) = res else { return Ok(None) };
        let Some(role) = s.role() else {
            warn!(staff_id = %s.id, role = %s.role, "staff_has_unknown_role");
            return Ok(None);
        };
        Ok(Some(StaffCredentials {
            identity: AuthIdentity { id: s.id, username: s.username, role },
            pin_hash: s.security_pin_hash,
        }))
    }
}
