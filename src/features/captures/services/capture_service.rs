use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::captures::models::CaptureRecord;
use crate::features::captures::services::CaptureStore;
use crate::modules::storage::LocalDiskStorage;

/// Service for snapshot captures
///
/// Owns the disk storage and the in-memory record store. A record is
/// appended if and only if the file write fully succeeded.
pub struct CaptureService {
    storage: LocalDiskStorage,
    store: CaptureStore,
}

impl CaptureService {
    pub fn new(storage: LocalDiskStorage) -> Self {
        Self {
            storage,
            store: CaptureStore::new(),
        }
    }

    /// Write the uploaded bytes to disk, then record the capture.
    pub async fn store_capture(
        &self,
        data: Vec<u8>,
        original_filename: &str,
        content_type: String,
        age: i64,
        gender: String,
        mood: String,
    ) -> Result<Arc<CaptureRecord>> {
        let file_size = data.len();

        // The write must fully succeed before anything is recorded; a
        // failed upload leaves the store untouched.
        let file_location = self.storage.write(original_filename, &data).await?;

        debug!("Snapshot written to {}", file_location);

        let record = self
            .store
            .append(CaptureRecord {
                id: Uuid::new_v4(),
                age,
                gender,
                mood,
                content_type,
                file_location,
                uploaded_at: Utc::now(),
            })
            .await;

        info!(
            "Capture recorded: id={}, location={}, size={}",
            record.id, record.file_location, file_size
        );

        Ok(record)
    }

    /// Most recent capture, or `None` while nothing has been uploaded.
    pub async fn latest(&self) -> Option<Arc<CaptureRecord>> {
        self.store.latest().await
    }

    /// Most recent capture together with its stored bytes.
    pub async fn latest_file(&self) -> Result<(Arc<CaptureRecord>, Vec<u8>)> {
        let record = self
            .latest()
            .await
            .ok_or_else(|| AppError::NotFound("No data available".to_string()))?;

        let data = self.storage.read(&record.file_location).await?;

        Ok((record, data))
    }

    /// Number of captures recorded since startup.
    #[allow(dead_code)]
    pub async fn capture_count(&self) -> usize {
        self.store.len().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_service() -> (CaptureService, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = LocalDiskStorage::new(dir.path().join("uploads"));
        (CaptureService::new(storage), dir)
    }

    async fn store(
        service: &CaptureService,
        data: &[u8],
        name: &str,
        age: i64,
        mood: &str,
    ) -> Result<Arc<CaptureRecord>> {
        service
            .store_capture(
                data.to_vec(),
                name,
                "image/jpeg".to_string(),
                age,
                "female".to_string(),
                mood.to_string(),
            )
            .await
    }

    #[tokio::test]
    async fn store_then_latest_round_trips() {
        let (service, _dir) = test_service();

        let record = store(&service, b"jpeg bytes", "photo.jpg", 30, "happy")
            .await
            .unwrap();
        assert!(record.file_location.ends_with("photo.jpg"));

        let latest = service.latest().await.unwrap();
        assert_eq!(latest.age, 30);
        assert_eq!(latest.mood, "happy");
        assert_eq!(latest.file_location, record.file_location);

        let (latest, data) = service.latest_file().await.unwrap();
        assert_eq!(latest.file_name(), "photo.jpg");
        assert_eq!(data, b"jpeg bytes");
    }

    #[tokio::test]
    async fn latest_file_on_empty_store_is_not_found() {
        let (service, _dir) = test_service();

        assert!(service.latest().await.is_none());

        let err = service.latest_file().await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn failed_write_appends_nothing() {
        let (service, _dir) = test_service();

        let err = store(&service, b"x", "..", 30, "happy").await.unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(service.capture_count().await, 0);
        assert!(service.latest().await.is_none());
    }

    #[tokio::test]
    async fn externally_removed_file_is_io_error() {
        let (service, _dir) = test_service();

        let record = store(&service, b"jpeg bytes", "photo.jpg", 30, "happy")
            .await
            .unwrap();
        tokio::fs::remove_file(&record.file_location).await.unwrap();

        let err = service.latest_file().await.unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[tokio::test]
    async fn same_filename_overwrites_file_but_appends_record() {
        let (service, _dir) = test_service();

        let first = store(&service, b"first", "photo.jpg", 30, "happy")
            .await
            .unwrap();
        let second = store(&service, b"second", "photo.jpg", 31, "sad")
            .await
            .unwrap();

        assert_eq!(first.file_location, second.file_location);
        assert_eq!(service.capture_count().await, 2);

        let (latest, data) = service.latest_file().await.unwrap();
        assert_eq!(latest.age, 31);
        assert_eq!(latest.mood, "sad");
        assert_eq!(data, b"second");
    }
}
