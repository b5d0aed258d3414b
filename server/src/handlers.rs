//! Request handlers.

use std::sync::Arc;

use axum::body::{to_bytes, Bytes};
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// MIME type of a word-processing document.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Suffix appended to the extension-stripped input filename.
const OUTPUT_SUFFIX: &str = "_formatted";

/// Filename assumed when the client sends a raw body or an unnamed field.
const DEFAULT_INPUT_NAME: &str = "input.docx";

/// Health check response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok".
    pub status: String,
    /// ISO-8601 UTC timestamp.
    pub timestamp: String,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    })
}

/// Document processing endpoint.
///
/// Accepts either a multipart form with a `file` field or a raw binary
/// body, formats every table in the document and returns the transformed
/// container as an attachment.
pub async fn process_document(
    State(config): State<Arc<ServerConfig>>,
    request: Request,
) -> AppResult<Response> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
        .unwrap_or(false);

    let (filename, data) = if is_multipart {
        read_multipart_file(request).await?
    } else {
        let body = to_bytes(request.into_body(), config.max_body_size)
            .await
            .map_err(|e| AppError::BadRequest(format!("failed to read request body: {e}")))?;
        (DEFAULT_INPUT_NAME.to_string(), body)
    };

    if data.is_empty() {
        return Err(AppError::BadRequest(
            "no file received; send a multipart form field 'file' or a raw binary DOCX body"
                .to_string(),
        ));
    }

    let output = tablefix::process_bytes(&data)?;
    info!(
        input = %filename,
        bytes_in = data.len(),
        bytes_out = output.len(),
        "processed document"
    );

    let disposition = format!("attachment; filename=\"{}\"", output_filename(&filename));
    let headers = [
        (header::CONTENT_TYPE, DOCX_MIME.to_string()),
        (header::CONTENT_DISPOSITION, disposition),
    ];
    Ok((StatusCode::OK, headers, output).into_response())
}

async fn read_multipart_file(request: Request) -> AppResult<(String, Bytes)> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_INPUT_NAME)
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        return Ok((filename, data));
    }

    Err(AppError::BadRequest(
        "multipart form has no 'file' field".to_string(),
    ))
}

/// Derive the download filename: strip the last extension segment from the
/// input name and append the fixed suffix.
fn output_filename(input: &str) -> String {
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .collect();
    let base = match sanitized.rsplit_once('.') {
        Some((base, _)) => base.to_string(),
        None => sanitized,
    };
    format!("{base}{OUTPUT_SUFFIX}.docx")
}
