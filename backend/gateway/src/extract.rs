//! Image field extractor (`POST /extract`).
//!
//! Saves the `image` upload to a per-request scratch file, runs OCR on it,
//! and returns whichever measurement labels could be read.

use std::time::Instant;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use medrelay_core::{ExtractedFields, RelayError};
use medrelay_logging::{EventLogger, RelayEvent};
use medrelay_ocr::{extract_fields, ScratchFile};

use crate::error::ApiError;
use crate::server::GatewayState;

const ROUTE: &str = "/extract";
const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub extracted: ExtractedFields,
}

struct Upload {
    file_name: String,
    bytes: axum::body::Bytes,
}

/// Handler for `POST /extract`.
pub async fn extract(
    State(state): State<GatewayState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();
    let start = Instant::now();

    run(&state, multipart)
        .await
        .map(|(extracted, text_chars)| {
            EventLogger::log_event(
                &request_id,
                RelayEvent::FieldsExtracted {
                    extractor: state.extractor.name().to_string(),
                    fields_found: extracted.len(),
                    text_chars,
                    latency_ms: start.elapsed().as_millis() as u64,
                },
            );
            Json(ExtractResponse { extracted })
        })
        .map_err(|e| ApiError::logged(ROUTE, &request_id, e))
}

async fn run(
    state: &GatewayState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(ExtractedFields, usize), RelayError> {
    let multipart = multipart.map_err(|e| no_image(e.body_text()))?;
    let upload = read_image(multipart).await?;

    let scratch = ScratchFile::reserve(
        &state.config.scratch_dir,
        "upload",
        &scratch_suffix(&upload.file_name),
    );
    scratch
        .write(&upload.bytes)
        .await
        .map_err(|e| RelayError::UploadUnwritable(e.to_string()))?;

    debug!(path = %scratch.path().display(), bytes = upload.bytes.len(), "Saved upload");

    let text = state.extractor.extract(scratch.path()).await?;
    let text = text.trim();
    if text.is_empty() {
        return Ok((ExtractedFields::new(), 0));
    }

    Ok((extract_fields(text), text.chars().count()))
}

async fn read_image(mut multipart: Multipart) -> Result<Upload, RelayError> {
    loop {
        let field = multipart.next_field().await.map_err(read_failure)?;
        let Some(field) = field else {
            return Err(no_image(format!("missing form field \"{IMAGE_FIELD}\"")));
        };
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let Some(file_name) = field.file_name().map(str::to_string) else {
            return Err(no_image(format!("form field \"{IMAGE_FIELD}\" is not a file")));
        };
        let bytes = field.bytes().await.map_err(read_failure)?;
        return Ok(Upload { file_name, bytes });
    }
}

fn read_failure(err: MultipartError) -> RelayError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        RelayError::UploadTooLarge(err.body_text())
    } else {
        no_image(err.body_text())
    }
}

fn no_image(reason: impl std::fmt::Display) -> RelayError {
    RelayError::BadRequest(format!("No image uploaded: {reason}"))
}

/// Keep a short alphanumeric extension from the client's file name; the OCR
/// engine sniffs the format from content, so anything else becomes `.img`.
fn scratch_suffix(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_else(|| ".img".to_string())
}
