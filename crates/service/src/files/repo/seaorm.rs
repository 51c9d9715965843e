use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use models::stored_file;

use crate::errors::ServiceError;
use crate::files::repository::{BlobRepository, StoredBlob};

pub struct SeaOrmBlobRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl BlobRepository for SeaOrmBlobRepository {
    async fn insert(&self, blob: StoredBlob) -> Result<(), ServiceError> {
        let am = stored_file::ActiveModel {
            id: Set(blob.id),
            owner_id: Set(blob.owner_id),
            file_name: Set(blob.file_name),
            content_type: Set(blob.content_type),
            size_bytes: Set(blob.data.len() as i64),
            data: Set(blob.data),
            created_at: Set(Utc::now().into()),
        };
        am.insert(&self.db).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<StoredBlob>, ServiceError> {
        let found = stored_file::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(found.map(|f| StoredBlob {
            id: f.id,
            owner_id: f.owner_id,
            file_name: f.file_name,
            content_type: f.content_type,
            data: f.data,
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = stored_file::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}
