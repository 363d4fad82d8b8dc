//! Resume upload gate: MIME allow-list and size cap. File contents are never
//! parsed; only the display name travels downstream.

use serde::Serialize;
use thiserror::Error;

pub const ALLOWED_MIME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No resume file was provided")]
    MissingFile,

    #[error("Please upload a valid PDF or Word document")]
    UnsupportedType(String),

    #[error("Resume is {size} bytes; the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },
}

/// What the rest of the dashboard knows about an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: usize,
}

pub fn check_upload(
    file_name: &str,
    content_type: Option<&str>,
    size_bytes: usize,
    limit: usize,
) -> Result<ResumeFile, UploadError> {
    let content_type = content_type.unwrap_or_default();
    if !ALLOWED_MIME_TYPES.contains(&content_type) {
        return Err(UploadError::UnsupportedType(content_type.to_string()));
    }
    if size_bytes > limit {
        return Err(UploadError::TooLarge {
            size: size_bytes,
            limit,
        });
    }
    Ok(ResumeFile {
        file_name: file_name.to_string(),
        content_type: content_type.to_string(),
        size_bytes,
    })
}
