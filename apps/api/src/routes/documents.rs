//! Axum route handlers for document uploads.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::parsing::models::{ParsedDocument, UploadedFile};
use crate::parsing::quality::check_content;
use crate::state::AppState;

const FILE_FIELD: &str = "file";
const AI_ENHANCEMENT_FIELD: &str = "useAiEnhancement";

/// Multipart form as received, before any validation.
struct UploadForm {
    file: Option<UploadedFile>,
    use_ai_enhancement: bool,
}

/// POST /api/v1/documents/parse
///
/// Accepts `file` plus an optional `useAiEnhancement` flag. The flag is
/// recorded for downstream consumers; parsing itself ignores it.
pub async fn handle_parse_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParsedDocument>, AppError> {
    let upload_id = Uuid::new_v4();
    let span = info_span!("document_upload", %upload_id);

    async move {
        let form = read_form(multipart).await?;
        let file = form
            .file
            .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

        info!(
            file_name = %file.name,
            file_size = file.size(),
            use_ai_enhancement = form.use_ai_enhancement,
            "Received document upload"
        );

        let document = state.parser.parse_document(&file).await?;
        check_content(&document.text)?;

        Ok(Json(document))
    }
    .instrument(span)
    .await
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm {
        file: None,
        use_ai_enhancement: false,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some(FILE_FIELD) => {
                let name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(String::from);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))?;
                form.file = Some(UploadedFile::new(name, content_type, bytes));
            }
            Some(AI_ENHANCEMENT_FIELD) => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;
                form.use_ai_enhancement = parse_flag(&value);
            }
            _ => {}
        }
    }

    Ok(form)
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "on" | "yes")
}
