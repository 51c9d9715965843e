use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::files::repository::{BlobRepository, StoredBlob};

pub const ALLOWED_CONTENT_TYPES: [&str; 2] = ["image/jpeg", "image/png"];
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// An uploaded file as received from a multipart part.
#[derive(Clone, Debug)]
pub struct FileUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Bytes plus the content type to serve them with.
#[derive(Clone, Debug)]
pub struct FileContent {
    pub id: Uuid,
    pub file_name: Option<String>,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Validating front of the blob repository.
#[derive(Clone)]
pub struct FileStore {
    repo: Arc<dyn BlobRepository>,
    max_file_bytes: usize,
}

impl FileStore {
    pub fn new(repo: Arc<dyn BlobRepository>, max_file_bytes: usize) -> Self { Self { repo, max_file_bytes } }

    pub fn max_file_bytes(&self) -> usize { self.max_file_bytes }

    /// Size must be within `1..=max_file_bytes` and the type JPEG or PNG.
    pub fn validate(&self, upload: &FileUpload) -> Result<(), ServiceError> {
        if upload.data.is_empty() {
            return Err(ServiceError::validation("file is empty"));
        }
        if upload.data.len() > self.max_file_bytes {
            return Err(ServiceError::validation(format!(
                "file size exceeds {} bytes",
                self.max_file_bytes
            )));
        }
        match upload.content_type.as_deref() {
            Some(ct) if ALLOWED_CONTENT_TYPES.contains(&ct) => Ok(()),
            other => Err(ServiceError::validation(format!(
                "invalid content type: {}",
                other.unwrap_or("none")
            ))),
        }
    }

    #[instrument(skip(self, upload), fields(size = upload.data.len()))]
    pub async fn store(&self, upload: FileUpload, owner_id: Option<Uuid>) -> Result<Uuid, ServiceError> {
        self.validate(&upload)?;
        let id = Uuid::new_v4();
        let blob = StoredBlob {
            id,
            owner_id,
            file_name: upload.file_name,
            content_type: upload.content_type.unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string()),
            data: upload.data,
        };
        self.repo.insert(blob).await?;
        info!(file_id = %id, "file_stored");
        Ok(id)
    }

    pub async fn fetch(&self, id: Uuid) -> Result<FileContent, ServiceError> {
        let blob = self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("file"))?;
        let content_type = if blob.content_type.trim().is_empty() {
            FALLBACK_CONTENT_TYPE.to_string()
        } else {
            blob.content_type
        };
        Ok(FileContent { id: blob.id, file_name: blob.file_name, content_type, data: blob.data })
    }

    /// Removing a missing blob is not an error.
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            debug!(file_id = %id, "file_already_absent");
        }
        Ok(())
    }

    /// Best-effort cleanup once the owning record is gone.
    pub async fn delete_quietly(&self, ids: impl IntoIterator<Item = Uuid>) {
        for id in ids {
            if let Err(e) = self.delete(id).await {
                warn!(file_id = %id, error = %e, "file_cleanup_failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::repository::mock::MockBlobRepository;

    fn store(limit: usize) -> (FileStore, Arc<MockBlobRepository>) {
        let repo = Arc::new(MockBlobRepository::default());
        (FileStore::new(repo.clone(), limit), repo)
    }

    fn png(n: usize) -> FileUpload {
        FileUpload { file_name: Some("a.png".into()), content_type: Some("image/png".into()), data: vec![7; n] }
    }

    #[tokio::test]
    async fn stores_and_fetches_png() {
        let (fs, repo) = store(16);
        let id = fs.store(png(16), None).await.unwrap();
        let got = fs.fetch(id).await.unwrap();
        assert_eq!(got.content_type, "image/png");
        assert_eq!(got.data.len(), 16);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn rejects_oversized_empty_and_wrong_type() {
        let (fs, repo) = store(16);
        assert!(matches!(fs.store(png(17), None).await, Err(ServiceError::Validation(_))));
        assert!(matches!(fs.store(png(0), None).await, Err(ServiceError::Validation(_))));
        let gif = FileUpload { content_type: Some("image/gif".into()), ..png(4) };
        assert!(matches!(fs.store(gif, None).await, Err(ServiceError::Validation(_))));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn missing_content_type_falls_back_on_fetch() {
        let (fs, repo) = store(16);
        let id = Uuid::new_v4();
        repo.insert(StoredBlob { id, owner_id: None, file_name: None, content_type: String::new(), data: vec![1] })
            .await
            .unwrap();
        assert_eq!(fs.fetch(id).await.unwrap().content_type, FALLBACK_CONTENT_TYPE);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (fs, _) = store(16);
        let id = fs.store(png(2), None).await.unwrap();
        fs.delete(id).await.unwrap();
        fs.delete(id).await.unwrap();
        assert!(matches!(fs.fetch(id).await, Err(ServiceError::NotFound(_))));
    }
}
