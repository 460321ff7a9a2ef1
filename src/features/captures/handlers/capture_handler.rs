use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::features::captures::dtos::{CaptureResponseDto, LatestCaptureDto, UploadCaptureDto};
use crate::features::captures::services::CaptureService;
use crate::shared::types::ErrorResponse;

/// Upload a snapshot
///
/// Accepts multipart/form-data with:
/// - `file`: the snapshot to store (required)
/// - `age`: detected age as an integer (required)
/// - `gender`: detected gender (required)
/// - `mood`: detected mood (required)
#[utoipa::path(
    post,
    path = "/upload/",
    tag = "captures",
    request_body(
        content = UploadCaptureDto,
        content_type = "multipart/form-data",
        description = "Snapshot upload form with detected age, gender and mood",
    ),
    responses(
        (status = 200, description = "Capture stored", body = CaptureResponseDto),
        (status = 400, description = "Missing or unparseable form field", body = ErrorResponse),
        (status = 500, description = "Failed to write the file to disk", body = ErrorResponse)
    )
)]
pub async fn upload_capture(
    State(service): State<Arc<CaptureService>>,
    mut multipart: Multipart,
) -> Result<Json<CaptureResponseDto>, AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut age: Option<i64> = None;
    let mut gender: Option<String> = None;
    let mut mood: Option<String> = None;

    // Process multipart fields
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let ct = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let fname = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                file_data = Some(data.to_vec());
                file_name = Some(fname);
                content_type = Some(ct);
            }
            "age" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read age field: {}", e))
                })?;
                let parsed = text.trim().parse::<i64>().map_err(|_| {
                    AppError::BadRequest(format!("age must be an integer, got '{}'", text))
                })?;
                age = Some(parsed);
            }
            "gender" => {
                gender = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read gender field: {}", e))
                })?);
            }
            "mood" => {
                mood = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read mood field: {}", e))
                })?);
            }
            _ => {
                // Ignore unknown fields
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    // Validate required fields
    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("file field is required".to_string()))?;
    let file_name =
        file_name.ok_or_else(|| AppError::BadRequest("file field is required".to_string()))?;
    let content_type = content_type
        .ok_or_else(|| AppError::BadRequest("file field is required".to_string()))?;
    let age = age.ok_or_else(|| AppError::BadRequest("age field is required".to_string()))?;
    let gender =
        gender.ok_or_else(|| AppError::BadRequest("gender field is required".to_string()))?;
    let mood = mood.ok_or_else(|| AppError::BadRequest("mood field is required".to_string()))?;

    let record = service
        .store_capture(file_data, &file_name, content_type, age, gender, mood)
        .await?;

    Ok(Json(CaptureResponseDto::from(record.as_ref())))
}

/// Metadata of the most recent capture
#[utoipa::path(
    get,
    path = "/data/",
    tag = "captures",
    responses(
        (status = 200, description = "Latest capture metadata", body = LatestCaptureDto),
        (status = 404, description = "No capture uploaded yet", body = ErrorResponse)
    )
)]
pub async fn get_latest_data(
    State(service): State<Arc<CaptureService>>,
) -> Result<Json<LatestCaptureDto>, AppError> {
    let record = service
        .latest()
        .await
        .ok_or_else(|| AppError::NotFound("No data available".to_string()))?;

    Ok(Json(LatestCaptureDto::from(record.as_ref())))
}

/// Download the most recently uploaded file
#[utoipa::path(
    get,
    path = "/file/",
    tag = "captures",
    responses(
        (status = 200, description = "Raw bytes of the latest uploaded file"),
        (status = 404, description = "No capture uploaded yet", body = ErrorResponse),
        (status = 500, description = "Recorded file is missing on disk", body = ErrorResponse)
    )
)]
pub async fn download_latest_file(
    State(service): State<Arc<CaptureService>>,
) -> Result<Response, AppError> {
    let (record, data) = service.latest_file().await?;

    let headers = [
        (header::CONTENT_TYPE, record.content_type.clone()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", record.file_name()),
        ),
    ];

    Ok((headers, data).into_response())
}
