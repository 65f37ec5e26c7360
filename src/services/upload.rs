//! Upload service: turns a selected local file plus form fields into a
//! catalog record.
//!
//! The only hard requirement is that a file was chosen. Everything else is
//! defaulted: internal category, an `uploaded` tag, generic MIME type.

use std::sync::Arc;

use tracing::info;

use super::catalog::{Catalog, FileCategory, FileItem};

/// Tag applied when the uploader supplies none.
pub const DEFAULT_UPLOAD_TAG: &str = "uploaded";
const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("please select a file to upload")]
    NoFileSelected,
    #[error("selected file has no name")]
    MissingFileName,
}

impl crate::error::ErrorCode for UploadError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoFileSelected => "E_NO_FILE_SELECTED",
            Self::MissingFileName => "E_MISSING_FILE_NAME",
        }
    }
}

/// A file picked by the user.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Everything the upload form collects.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub file: Option<SelectedFile>,
    pub category: FileCategory,
    pub tags: Vec<String>,
    pub ticker: Option<String>,
    pub team: Option<String>,
}

/// Add a tag to a tag list. Trims, and ignores blanks and duplicates.
/// Returns `true` if the list changed.
pub fn add_tag(tags: &mut Vec<String>, candidate: &str) -> bool {
    let tag = candidate.trim();
    if tag.is_empty() || tags.iter().any(|t| t == tag) {
        return false;
    }
    tags.push(tag.to_string());
    true
}

/// Split a comma-separated tag field into tags, dropping blanks.
#[must_use]
pub fn split_tags(raw: &str) -> Vec<String> {
    let mut tags = Vec::new();
    for part in raw.split(',') {
        add_tag(&mut tags, part);
    }
    tags
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validate an upload request and append the resulting record to the catalog.
///
/// # Errors
///
/// Returns `NoFileSelected` when no file was chosen and `MissingFileName`
/// when the chosen file has a blank name.
pub fn upload(catalog: &mut Catalog, request: UploadRequest, author: &str, now_ms: i64) -> Result<FileItem, UploadError> {
    let Some(selected) = request.file else {
        return Err(UploadError::NoFileSelected);
    };
    let name = selected.name.trim();
    if name.is_empty() {
        return Err(UploadError::MissingFileName);
    }

    let tags = if request.tags.is_empty() { vec![DEFAULT_UPLOAD_TAG.to_string()] } else { request.tags };
    let mime_type = non_blank(selected.mime_type).unwrap_or_else(|| FALLBACK_MIME.to_string());

    let item = FileItem {
        id: catalog.next_id(now_ms),
        name: name.to_string(),
        author: author.to_string(),
        tags,
        category: request.category,
        uploaded_at: now_ms,
        size: selected.bytes.len() as u64,
        mime_type,
        ticker: non_blank(request.ticker),
        team: non_blank(request.team),
        url: None,
        content: None,
        data: Some(Arc::from(selected.bytes)),
    };

    info!(
        file_id = %item.id,
        name = %item.name,
        category = %item.category,
        size = item.size,
        "file uploaded"
    );
    Ok(catalog.insert(item))
}

#[cfg(test)]
#[path = "upload_test.rs"]
mod tests;
