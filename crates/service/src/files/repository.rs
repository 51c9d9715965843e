use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::ServiceError;

/// A persisted blob row.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredBlob {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub file_name: Option<String>,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[async_trait]
pub trait BlobRepository: Send + Sync {
    async fn insert(&self, blob: StoredBlob) -> Result<(), ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<StoredBlob>, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockBlobRepository {
        blobs: Mutex<HashMap<Uuid, StoredBlob>>,
    }

    impl MockBlobRepository {
        pub fn len(&self) -> usize { self.blobs.lock().unwrap().len() }
        pub fn is_empty(&self) -> bool { self.len() == 0 }
    }

    #[async_trait]
    impl BlobRepository for MockBlobRepository {
        async fn insert(&self, blob: StoredBlob) -> Result<(), ServiceError> {
            self.blobs.lock().unwrap().insert(blob.id, blob);
            Ok(())
        }

        async fn get(&self, id: Uuid) -> Result<Option<StoredBlob>, ServiceError> {
            Ok(self.blobs.lock().unwrap().get(&id).cloned())
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
            Ok(self.blobs.lock().unwrap().remove(&id).is_some())
        }
    }
}
