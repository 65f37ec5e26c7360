//! IRN editor routes.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::files::FileView;
use crate::error::{ApiError, ApiResult};
use crate::services::note::{self, GeneratedAttributes, NoteDraft, NoteError};
use crate::services::now_ms;
use crate::state::AppState;

pub(crate) fn note_error_to_status(err: &NoteError) -> StatusCode {
    match err {
        NoteError::EmptyContent | NoteError::MissingTitle => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

#[derive(Debug, Deserialize)]
pub struct AttributesBody {
    pub content: String,
}

/// `POST /api/notes/attributes`: suggest title, tags and tickers for a draft.
pub async fn generate_attributes(
    State(state): State<AppState>,
    Json(body): Json<AttributesBody>,
) -> ApiResult<GeneratedAttributes> {
    let tickers = state.catalog.read().await.available_tickers();
    note::generate_attributes(&body.content, &tickers)
        .map(Json)
        .map_err(|e| ApiError::from_err(note_error_to_status(&e), &e))
}

/// `POST /api/notes`: save a draft into the catalog as an IRN.
pub async fn save_note(
    State(state): State<AppState>,
    Json(draft): Json<NoteDraft>,
) -> Result<(StatusCode, Json<FileView>), ApiError> {
    // Reject before the simulated save delay so validation errors come back at once.
    note::save_note(&draft, &state.config.user_name, String::new(), 0)
        .map_err(|e| ApiError::from_err(note_error_to_status(&e), &e))?;

    if !state.config.note_save_delay.is_zero() {
        tokio::time::sleep(state.config.note_save_delay).await;
    }

    let mut catalog = state.catalog.write().await;
    let now = now_ms();
    let id = catalog.next_id(now);
    let item = note::save_note(&draft, &state.config.user_name, id, now)
        .map_err(|e| ApiError::from_err(note_error_to_status(&e), &e))?;
    let stored = catalog.insert(item);
    Ok((StatusCode::CREATED, Json(FileView::from(&stored))))
}

#[cfg(test)]
#[path = "notes_test.rs"]
mod tests;
