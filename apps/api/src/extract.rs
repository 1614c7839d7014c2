//! Résumé upload → plain text. The scoring engine only ever sees text; this is the
//! adapter for the formats users actually upload.

use bytes::Bytes;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UploadKind {
    Pdf,
    PlainText,
}

/// Extracts plain text from an uploaded résumé.
///
/// PDF goes through `pdf-extract`; `text/*`, `.txt` and `.md` are decoded as
/// UTF-8 (lossy). Anything else is rejected. Empty text is returned as-is and
/// simply scores 0 downstream.
///
/// Takes the multipart payload as `Bytes` so it moves into a blocking task
/// without a copy.
pub fn extract_text(
    file_name: Option<&str>,
    content_type: Option<&str>,
    payload: Bytes,
) -> Result<String, AppError> {
    match detect_kind(file_name, content_type) {
        Some(UploadKind::Pdf) => pdf_extract::extract_text_from_mem(&payload).map_err(|e| {
            AppError::UnprocessableEntity(format!("Could not read text from PDF: {e}"))
        }),
        Some(UploadKind::PlainText) => Ok(String::from_utf8_lossy(&payload).into_owned()),
        None => Err(AppError::UnprocessableEntity(format!(
            "Unsupported résumé format (file: {}, type: {}). Upload a PDF or plain text file.",
            file_name.unwrap_or("unknown"),
            content_type.unwrap_or("unknown"),
        ))),
    }
}

fn detect_kind(file_name: Option<&str>, content_type: Option<&str>) -> Option<UploadKind> {
    let content_type = content_type.map(|c| c.to_ascii_lowercase());
    match content_type.as_deref() {
        Some("application/pdf") => return Some(UploadKind::Pdf),
        Some(ct) if ct.starts_with("text/") => return Some(UploadKind::PlainText),
        _ => {}
    }

    // Browsers often send application/octet-stream; fall back to the extension
    let extension = file_name?.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "pdf" => Some(UploadKind::Pdf),
        "txt" | "md" => Some(UploadKind::PlainText),
        _ => None,
    }
}
