//! CSV export download and import upload.

use axum::extract::{Multipart, Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use checklist_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::response;
use crate::services::input::CsvUpload;
use crate::state::AppState;

/// GET /api/v1/checklists/{id}/export
///
/// Responds with the raw CSV as an attachment, not the JSON envelope.
pub async fn export(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let export = state.checklists().export_csv(id).await?;

    tracing::info!(checklist_id = id, filename = %export.filename, "Checklist exported");

    let headers = [
        (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.filename),
        ),
    ];
    Ok((headers, export.content))
}

/// POST /api/v1/checklists/import
///
/// Multipart fields: `file` (required), `title`, `description`,
/// `category_id`. Without a title the file name (minus extension) is used.
pub async fn import(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut upload = CsvUpload::default();
    let mut has_file = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                upload.filename = field.file_name().unwrap_or_default().to_string();
                upload.content_type = field.content_type().map(str::to_string);
                upload.bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?
                    .to_vec();
                has_file = true;
            }
            "title" => upload.title = Some(field_text(field).await?),
            "description" => {
                let text = field_text(field).await?;
                upload.description = (!text.trim().is_empty()).then_some(text);
            }
            "category_id" => {
                let text = field_text(field).await?;
                let text = text.trim();
                if !text.is_empty() {
                    let id = text
                        .parse::<DbId>()
                        .map_err(|_| AppError::BadRequest(format!("Invalid category_id: {text}")))?;
                    upload.category_id = Some(id);
                }
            }
            other => tracing::debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    if !has_file {
        return Err(AppError::BadRequest("No file uploaded".into()));
    }

    let checklist = state
        .checklists()
        .import_csv(upload, state.config.max_upload_bytes)
        .await?;
    Ok(response::created(checklist))
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))
}
