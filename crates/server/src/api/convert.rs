//! Batch image conversion endpoint.

use std::sync::Arc;

use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use pixshift_core::{ConversionForm, ConvertError, FileInput, ResponseEnvelope};
use tracing::{debug, error};

use crate::state::AppState;

/// Multipart field carrying the images.
const FILES_FIELD: &str = "files";
/// Multipart field carrying the target format identifier.
const TARGET_FORMAT_FIELD: &str = "targetFormat";

/// POST /api/convert
///
/// Converts every `files` entry to `targetFormat`. Items that fail are left
/// out of the response; only request-level failures produce an error body.
pub async fn convert_images(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> (StatusCode, Json<ResponseEnvelope>) {
    let form = match multipart {
        Ok(multipart) => read_form(multipart).await,
        Err(rejection) => Err(ConvertError::unexpected(rejection.body_text())),
    };

    let (status, envelope) = match form {
        Ok(form) => state.converter().handle(form).await,
        Err(e) => {
            if let ConvertError::Unexpected { detail } = &e {
                error!("Failed to read conversion request: {}", detail);
            }
            pixshift_core::convert::codec::encode_error(&e)
        }
    };

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(envelope))
}

/// Buffers the whole form so validation can see every field before any
/// item is processed.
async fn read_form(mut multipart: Multipart) -> Result<ConversionForm, ConvertError> {
    let mut form = ConversionForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ConvertError::unexpected(e.body_text()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILES_FIELD) => form.files.push(read_file(field).await?),
            Some(TARGET_FORMAT_FIELD) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ConvertError::unexpected(e.body_text()))?;
                form.target_format = Some(text);
            }
            other => debug!("Ignoring unexpected form field {:?}", other),
        }
    }

    Ok(form)
}

/// Turns one `files` entry into a [`FileInput`]. File parts keep their
/// chunk boundaries; bare values are handed over untouched for raw coercion.
async fn read_file(mut field: Field<'_>) -> Result<FileInput, ConvertError> {
    let name = field.file_name().map(str::to_string);

    if name.is_none() && field.content_type().is_none() {
        let value = field
            .bytes()
            .await
            .map_err(|e| ConvertError::unexpected(e.body_text()))?;
        return Ok(FileInput::from_raw(None, value));
    }

    let mut chunks = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| ConvertError::unexpected(e.body_text()))?
    {
        chunks.push(chunk);
    }
    Ok(FileInput::from_chunks(name, chunks))
}
