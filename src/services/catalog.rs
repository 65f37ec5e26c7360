//! File catalog: records, category filtering, and listing helpers.
//!
//! DESIGN
//! ======
//! The catalog is an ordered, in-memory list. Insertion order is display
//! order; nothing is persisted and a restart reseeds the mock documents.
//! Identifiers are derived from the upload timestamp but forced strictly
//! increasing so two uploads landing in the same millisecond stay distinct.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::format_description;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("file {0} has no stored content")]
    NoContent(String),
}

impl crate::error::ErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_FILE_NOT_FOUND",
            Self::UnknownCategory(_) => "E_UNKNOWN_CATEGORY",
            Self::NoContent(_) => "E_NO_CONTENT",
        }
    }
}

/// Where a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileCategory {
    #[default]
    Internal,
    External,
    AiGenerated,
    /// Internal research note written in the note editor.
    Irn,
}

impl FileCategory {
    pub const ALL: [FileCategory; 4] = [Self::Internal, Self::External, Self::AiGenerated, Self::Irn];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
            Self::AiGenerated => "ai-generated",
            Self::Irn => "irn",
        }
    }

    /// Human label used in headings and chips.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Internal => "Internal",
            Self::External => "External",
            Self::AiGenerated => "AI Generated",
            Self::Irn => "IRN",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "internal" => Ok(Self::Internal),
            "external" => Ok(Self::External),
            "ai-generated" => Ok(Self::AiGenerated),
            "irn" => Ok(Self::Irn),
            other => Err(CatalogError::UnknownCategory(other.to_string())),
        }
    }
}

/// Category selection in the file browser. `All` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(FileCategory),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(self, category: FileCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(Self::All),
            other => other.parse().map(Self::Only),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => category.fmt(f),
        }
    }
}

/// A document in the catalog: uploaded file, seeded mock, or saved note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileItem {
    pub id: String,
    pub name: String,
    pub author: String,
    pub tags: Vec<String>,
    pub category: FileCategory,
    /// Milliseconds since Unix epoch.
    pub uploaded_at: i64,
    /// Size in bytes.
    pub size: u64,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Raw HTML body, only present for notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Uploaded bytes. Lives only as long as the process.
    #[serde(skip)]
    pub data: Option<Arc<[u8]>>,
}

/// Coarse file type used to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Note,
    Pdf,
    Document,
    Spreadsheet,
    Image,
    Video,
    Audio,
    Other,
}

/// Classify a file for display. Notes win over MIME type.
#[must_use]
pub fn file_kind(mime_type: &str, category: FileCategory) -> FileKind {
    if category == FileCategory::Irn {
        return FileKind::Note;
    }
    if mime_type.contains("pdf") {
        FileKind::Pdf
    } else if mime_type.contains("word") || mime_type.contains("document") {
        FileKind::Document
    } else if mime_type.contains("sheet") || mime_type.contains("excel") {
        FileKind::Spreadsheet
    } else if mime_type.contains("image") {
        FileKind::Image
    } else if mime_type.contains("video") {
        FileKind::Video
    } else if mime_type.contains("audio") {
        FileKind::Audio
    } else {
        FileKind::Other
    }
}

/// Per-category totals for the navigation badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub all: usize,
    pub internal: usize,
    pub external: usize,
    pub ai_generated: usize,
    pub irn: usize,
}

impl CategoryCounts {
    #[must_use]
    pub fn get(&self, category: FileCategory) -> usize {
        match category {
            FileCategory::Internal => self.internal,
            FileCategory::External => self.external,
            FileCategory::AiGenerated => self.ai_generated,
            FileCategory::Irn => self.irn,
        }
    }
}

// =============================================================================
// CATALOG
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    files: Vec<FileItem>,
    /// Highest numeric id handed out or inserted.
    last_id: i64,
}

impl Catalog {
    #[must_use]
    pub fn new(files: Vec<FileItem>) -> Self {
        let last_id = files
            .iter()
            .filter_map(|f| f.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        Self { files, last_id }
    }

    #[must_use]
    pub fn files(&self) -> &[FileItem] {
        &self.files
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files in the selected category, in catalog order.
    #[must_use]
    pub fn filter(&self, filter: CategoryFilter) -> Vec<&FileItem> {
        self.files
            .iter()
            .filter(|f| filter.matches(f.category))
            .collect()
    }

    #[must_use]
    pub fn counts(&self) -> CategoryCounts {
        let mut counts = CategoryCounts { all: self.files.len(), ..CategoryCounts::default() };
        for file in &self.files {
            match file.category {
                FileCategory::Internal => counts.internal += 1,
                FileCategory::External => counts.external += 1,
                FileCategory::AiGenerated => counts.ai_generated += 1,
                FileCategory::Irn => counts.irn += 1,
            }
        }
        counts
    }

    /// Look up a file by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no file has this id.
    pub fn get(&self, id: &str) -> Result<&FileItem, CatalogError> {
        self.files
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Allocate a timestamp-derived id, strictly greater than any before it.
    pub fn next_id(&mut self, now_ms: i64) -> String {
        let id = now_ms.max(self.last_id + 1);
        self.last_id = id;
        id.to_string()
    }

    /// Append a file and return the stored copy.
    pub fn insert(&mut self, file: FileItem) -> FileItem {
        if let Ok(numeric) = file.id.parse::<i64>() {
            self.last_id = self.last_id.max(numeric);
        }
        self.files.push(file.clone());
        file
    }

    #[must_use]
    pub fn available_tickers(&self) -> Vec<String> {
        unique_sorted(self.files.iter().filter_map(|f| f.ticker.as_deref()))
    }

    #[must_use]
    pub fn available_teams(&self) -> Vec<String> {
        unique_sorted(self.files.iter().filter_map(|f| f.team.as_deref()))
    }

    #[must_use]
    pub fn existing_tags(&self) -> Vec<String> {
        unique_sorted(self.files.iter().flat_map(|f| f.tags.iter().map(String::as_str)))
    }
}

fn unique_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

// =============================================================================
// LISTING HELPERS
// =============================================================================

/// Heading above the file table, e.g. `All Files (2)` or `Internal (2)`.
#[must_use]
pub fn listing_heading(filter: CategoryFilter, count: usize) -> String {
    match filter {
        CategoryFilter::All => format!("All Files ({count})"),
        CategoryFilter::Only(category) => format!("{} ({count})", category.label()),
    }
}

/// Empty-state text for a filter with no matching files.
#[must_use]
pub fn empty_message(filter: CategoryFilter) -> String {
    match filter {
        CategoryFilter::All => "No files found in any category".to_string(),
        CategoryFilter::Only(category) => format!("No files found in {}", category.label()),
    }
}

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable size using 1024-based units, at most two decimals.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut scaled = bytes;
    while scaled >= 1024 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024;
        unit += 1;
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let value = bytes as f64 / 1024_f64.powi(unit as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", SIZE_UNITS[unit])
}

/// Upload date as `Jan 15, 2024` (UTC). Out-of-range timestamps render empty.
#[must_use]
pub fn format_upload_date(uploaded_at_ms: i64) -> String {
    let nanos = i128::from(uploaded_at_ms) * 1_000_000;
    let Ok(dt) = OffsetDateTime::from_unix_timestamp_nanos(nanos) else {
        return String::new();
    };
    dt.format(format_description!("[month repr:short] [day padding:none], [year]"))
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
