use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::captures::models::CaptureRecord;

/// Upload form DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadCaptureDto {
    /// The snapshot to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// Detected age
    #[schema(example = 30)]
    pub age: i64,
    /// Detected gender
    #[schema(example = "female")]
    pub gender: String,
    /// Detected mood
    #[schema(example = "happy")]
    pub mood: String,
}

/// Response body for a successful upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CaptureResponseDto {
    pub age: i64,
    pub gender: String,
    pub mood: String,
    /// Path the uploaded bytes were written to
    pub file_location: String,
}

impl From<&CaptureRecord> for CaptureResponseDto {
    fn from(record: &CaptureRecord) -> Self {
        Self {
            age: record.age,
            gender: record.gender.clone(),
            mood: record.mood.clone(),
            file_location: record.file_location.clone(),
        }
    }
}

/// Response body for the latest-capture metadata read
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LatestCaptureDto {
    pub age: i64,
    pub mood: String,
    /// Path of the most recently uploaded file
    pub file: String,
}

impl From<&CaptureRecord> for LatestCaptureDto {
    fn from(record: &CaptureRecord) -> Self {
        Self {
            age: record.age,
            mood: record.mood.clone(),
            file: record.file_location.clone(),
        }
    }
}
