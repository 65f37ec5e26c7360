//! File catalog routes: listing, facets, upload and download.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::services::catalog::{
    CatalogError, CategoryCounts, CategoryFilter, FileCategory, FileItem, FileKind, empty_message, file_kind,
    format_file_size, format_upload_date, listing_heading,
};
use crate::services::now_ms;
use crate::services::upload::{self, SelectedFile, UploadError, UploadRequest, add_tag, split_tags};
use crate::state::AppState;

pub(crate) fn catalog_error_to_status(err: &CatalogError) -> StatusCode {
    match err {
        CatalogError::NotFound(_) | CatalogError::NoContent(_) => StatusCode::NOT_FOUND,
        CatalogError::UnknownCategory(_) => StatusCode::BAD_REQUEST,
    }
}

pub(crate) fn upload_error_to_status(_err: &UploadError) -> StatusCode {
    StatusCode::BAD_REQUEST
}

fn catalog_error(err: &CatalogError) -> ApiError {
    ApiError::from_err(catalog_error_to_status(err), err)
}

// =============================================================================
// RESPONSES
// =============================================================================

/// A catalog record plus its display labels.
#[derive(Debug, Serialize)]
pub struct FileView {
    #[serde(flatten)]
    pub file: FileItem,
    pub kind: FileKind,
    pub size_label: String,
    pub uploaded_label: String,
}

impl From<&FileItem> for FileView {
    fn from(file: &FileItem) -> Self {
        Self {
            kind: file_kind(&file.mime_type, file.category),
            size_label: format_file_size(file.size),
            uploaded_label: format_upload_date(file.uploaded_at),
            file: file.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FileListing {
    pub filter: String,
    pub heading: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    pub counts: CategoryCounts,
    pub files: Vec<FileView>,
}

#[derive(Debug, Serialize)]
pub struct Facets {
    pub tickers: Vec<String>,
    pub teams: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub category: Option<String>,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/files?category=`: list files, optionally filtered by category.
pub async fn list_files(State(state): State<AppState>, Query(query): Query<ListQuery>) -> ApiResult<FileListing> {
    let filter: CategoryFilter = query
        .category
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|e| catalog_error(&e))?;

    let catalog = state.catalog.read().await;
    let files: Vec<FileView> = catalog.filter(filter).into_iter().map(FileView::from).collect();
    Ok(Json(FileListing {
        filter: filter.to_string(),
        heading: listing_heading(filter, files.len()),
        empty_message: files.is_empty().then(|| empty_message(filter)),
        counts: catalog.counts(),
        files,
    }))
}

/// `GET /api/files/facets`: tickers, teams and tags offered by the forms.
pub async fn facets(State(state): State<AppState>) -> Json<Facets> {
    let catalog = state.catalog.read().await;
    Json(Facets {
        tickers: catalog.available_tickers(),
        teams: catalog.available_teams(),
        tags: catalog.existing_tags(),
    })
}

/// `GET /api/files/{id}`: one file's metadata.
pub async fn get_file(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<FileView> {
    let catalog = state.catalog.read().await;
    let file = catalog.get(&id).map_err(|e| catalog_error(&e))?;
    Ok(Json(FileView::from(file)))
}

/// `GET /api/files/{id}/content`: uploaded bytes, or the HTML body of a note.
pub async fn file_content(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let catalog = state.catalog.read().await;
    let file = catalog.get(&id).map_err(|e| catalog_error(&e))?;

    let body = if let Some(data) = &file.data {
        Bytes::copy_from_slice(data)
    } else if let Some(content) = &file.content {
        Bytes::from(content.clone())
    } else {
        return Err(catalog_error(&CatalogError::NoContent(id)));
    };
    Ok(([(header::CONTENT_TYPE, file.mime_type.clone())], body).into_response())
}

/// `POST /api/files`: multipart upload.
///
/// Fields: `file` (required), `category`, `tags` (comma-separated or
/// repeated), `ticker`, `team`.
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<FileView>), ApiError> {
    let request = read_upload_form(multipart).await?;
    let mut catalog = state.catalog.write().await;
    let stored = upload::upload(&mut catalog, request, &state.config.user_name, now_ms())
        .map_err(|e| ApiError::from_err(upload_error_to_status(&e), &e))?;
    Ok((StatusCode::CREATED, Json(FileView::from(&stored))))
}

// =============================================================================
// MULTIPART
// =============================================================================

/// Collects upload form fields in any order.
#[derive(Debug, Default)]
pub(crate) struct UploadForm {
    request: UploadRequest,
}

impl UploadForm {
    /// Record one form field. Unknown fields are ignored.
    pub(crate) fn accept(
        &mut self,
        name: &str,
        file_name: Option<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError> {
        if name == "file" {
            // A file input left empty still submits a part with a blank file name.
            if let Some(file_name) = file_name.filter(|n| !n.trim().is_empty()) {
                self.request.file = Some(SelectedFile { name: file_name, mime_type: content_type, bytes });
            }
            return Ok(());
        }

        let value = String::from_utf8(bytes).map_err(|_| ApiError::bad_request(format!("field {name} is not UTF-8")))?;
        match name {
            "category" => {
                self.request.category = match value.trim() {
                    "" => FileCategory::default(),
                    other => other.parse().map_err(|e| catalog_error(&e))?,
                };
            }
            "tags" => {
                for tag in split_tags(&value) {
                    add_tag(&mut self.request.tags, &tag);
                }
            }
            "ticker" => self.request.ticker = Some(value),
            "team" => self.request.team = Some(value),
            _ => {}
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> UploadRequest {
        self.request
    }
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadRequest, ApiError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read field {name}: {e}")))?;
        form.accept(&name, file_name, content_type, bytes.to_vec())?;
    }
    Ok(form.finish())
}

#[cfg(test)]
#[path = "files_test.rs"]
mod tests;
