use std::sync::Arc;

use tokio::sync::RwLock;

use crate::features::captures::models::CaptureRecord;

/// Append-only, process-lifetime store of accepted captures.
///
/// A single lock serializes appends against latest-reads: "latest" always
/// reflects the most recently completed append, and concurrent uploads can
/// neither lose nor duplicate entries. Lock scopes never cross an await.
#[derive(Default)]
pub struct CaptureStore {
    records: RwLock<Vec<Arc<CaptureRecord>>>,
}

impl CaptureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return its shared handle.
    pub async fn append(&self, record: CaptureRecord) -> Arc<CaptureRecord> {
        let record = Arc::new(record);
        self.records.write().await.push(Arc::clone(&record));
        record
    }

    /// Last-appended record, or `None` while the store is empty.
    pub async fn latest(&self) -> Option<Arc<CaptureRecord>> {
        self.records.read().await.last().cloned()
    }

    /// Number of records appended so far.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn record(age: i64, mood: &str) -> CaptureRecord {
        CaptureRecord {
            id: Uuid::new_v4(),
            age,
            gender: "female".to_string(),
            mood: mood.to_string(),
            content_type: "image/jpeg".to_string(),
            file_location: "uploads/photo.jpg".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn latest_is_none_on_empty_store() {
        let store = CaptureStore::new();

        assert!(store.latest().await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn latest_returns_last_appended() {
        let store = CaptureStore::new();
        store.append(record(30, "happy")).await;
        store.append(record(31, "sad")).await;

        let latest = store.latest().await.unwrap();
        assert_eq!(latest.age, 31);
        assert_eq!(latest.mood, "sad");
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn concurrent_appends_lose_nothing() {
        let store = Arc::new(CaptureStore::new());

        let mut tasks = Vec::new();
        for age in 0..32 {
            let store = Arc::clone(&store);
            tasks.push(tokio::spawn(async move {
                store.append(record(age, "happy")).await;
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(store.len().await, 32);
        assert!(store.latest().await.is_some());
    }
}
