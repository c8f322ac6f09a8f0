//! Axum route handlers for the analysis session.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::debug;

use crate::analysis::models::Action;
use crate::analysis::session::{SessionController, SessionReport, Selection, UploadedDocument};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/session
///
/// Multipart form with one `file` (PDF), an optional `action`, and an optional
/// `job_role`. Runs one upload lifecycle and reports where it ended.
pub async fn handle_session(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SessionReport>, AppError> {
    let (document, selection) = read_form(multipart).await?;

    let report = SessionController::new(&state.llm, &state.config.temp_dir)
        .run(document, selection)
        .await?;

    Ok(Json(report))
}

async fn read_form(mut multipart: Multipart) -> Result<(UploadedDocument, Selection), AppError> {
    let mut document: Option<UploadedDocument> = None;
    let mut selection = Selection::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                if document.is_some() {
                    return Err(AppError::Validation(
                        "Exactly one file may be uploaded".to_string(),
                    ));
                }
                let filename = field.file_name().unwrap_or("upload.pdf").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;

                if !is_pdf(content_type.as_deref(), &filename, &bytes) {
                    return Err(AppError::Validation(format!(
                        "'{filename}' is not a PDF document"
                    )));
                }
                document = Some(UploadedDocument { filename, bytes });
            }
            "action" => {
                let raw = field.text().await.map_err(multipart_error)?;
                selection.action =
                    Action::parse_selection(&raw).map_err(|e| AppError::Validation(e.to_string()))?;
            }
            "job_role" => {
                let raw = field.text().await.map_err(multipart_error)?;
                selection.job_role = Some(raw);
            }
            other => debug!("Ignoring unexpected form field '{other}'"),
        }
    }

    let document =
        document.ok_or_else(|| AppError::Validation("A PDF file is required".to_string()))?;
    if document.bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    Ok((document, selection))
}

/// Uploads over the body limit keep their 413; anything else is a malformed form.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Malformed upload: {e}"))
    }
}

/// Accepts the upload when any signal says PDF: content type, extension, or `%PDF-` magic.
fn is_pdf(content_type: Option<&str>, filename: &str, bytes: &Bytes) -> bool {
    let ct = content_type.unwrap_or("").to_ascii_lowercase();
    ct.contains("application/pdf")
        || filename.to_ascii_lowercase().ends_with(".pdf")
        || bytes.starts_with(b"%PDF-")
}
