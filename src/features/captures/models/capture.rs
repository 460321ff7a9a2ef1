use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One accepted snapshot upload.
///
/// Records are immutable once appended; the store never updates or removes
/// them. `file_location` is the path the bytes were written to and may be
/// shared by several records when uploads reuse a filename.
#[derive(Debug, Clone)]
pub struct CaptureRecord {
    pub id: Uuid,
    pub age: i64,
    pub gender: String,
    pub mood: String,
    pub content_type: String,
    pub file_location: String,
    pub uploaded_at: DateTime<Utc>,
}

impl CaptureRecord {
    /// Base name of the stored file, used as the download attachment name.
    pub fn file_name(&self) -> &str {
        self.file_location
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.file_location)
    }
}
