//! Research chat routes.
//!
//! The assistant reply is held back by the configured reply delay. The user
//! message is recorded first, so a concurrent `GET .../messages` during the
//! delay sees the question without its answer. The reply is stamped when it
//! is recorded, after the delay.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use super::files::{FileView, catalog_error_to_status};
use crate::error::{ApiError, ApiResult};
use crate::services::analytics;
use crate::services::chat::{CONVERSATION_STARTERS, ChatError, ChatMessage, ChatSession, ConversationStarter, Exchange};
use crate::services::intent::{Classification, classify};
use crate::services::now_ms;
use crate::state::AppState;

pub(crate) fn chat_error_to_status(err: &ChatError) -> StatusCode {
    match err {
        ChatError::EmptyMessage => StatusCode::BAD_REQUEST,
        ChatError::SessionNotFound(_) => StatusCode::NOT_FOUND,
    }
}

fn chat_error(err: &ChatError) -> ApiError {
    ApiError::from_err(chat_error_to_status(err), err)
}

#[derive(Debug, Deserialize)]
pub struct ClassifyBody {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SendBody {
    pub text: String,
    /// Set when the text came from a conversation starter.
    #[serde(default)]
    pub starter: bool,
}

#[derive(Debug, Deserialize)]
pub struct CitationBody {
    #[serde(default)]
    pub session_id: Option<Uuid>,
    pub file_id: String,
    #[serde(default)]
    pub page: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub id: Uuid,
    pub starters: Vec<ConversationStarter>,
}

/// `GET /api/chat/starters`
pub async fn starters() -> Json<Vec<ConversationStarter>> {
    Json(CONVERSATION_STARTERS.to_vec())
}

/// `POST /api/chat/classify`: intent and data source for a piece of text.
pub async fn classify_text(Json(body): Json<ClassifyBody>) -> Json<Classification> {
    Json(classify(&body.text))
}

/// `POST /api/chat/sessions`: open a chat panel. Sessions idle past the
/// configured timeout are dropped first.
pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionCreated>) {
    let session = ChatSession::new();
    let id = session.id;
    {
        let mut chats = state.chats.write().await;
        let before = chats.len();
        let now = now_ms();
        chats.retain(|_, s| !s.is_idle(now, state.config.chat_idle_timeout));
        let pruned = before - chats.len();
        if pruned > 0 {
            debug!(pruned, "idle chat sessions dropped");
        }
        chats.insert(id, session);
    }
    analytics::track(analytics::CHAT_OPENED, json!({ "session_id": id }));
    (StatusCode::CREATED, Json(SessionCreated { id, starters: CONVERSATION_STARTERS.to_vec() }))
}

/// `DELETE /api/chat/sessions/{id}`: close a chat panel and drop its history.
pub async fn close_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    let removed = state
        .chats
        .write()
        .await
        .remove(&id)
        .ok_or_else(|| chat_error(&ChatError::SessionNotFound(id)))?;
    analytics::track(
        analytics::CHAT_CLOSED,
        json!({ "session_id": id, "message_count": removed.messages.len() }),
    );
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/chat/sessions/{id}/messages`
pub async fn list_messages(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Vec<ChatMessage>> {
    let chats = state.chats.read().await;
    let session = chats.get(&id).ok_or_else(|| chat_error(&ChatError::SessionNotFound(id)))?;
    Ok(Json(session.messages.clone()))
}

/// `POST /api/chat/sessions/{id}/messages`: ask a question.
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SendBody>,
) -> ApiResult<Exchange> {
    let files = state.catalog.read().await.files().to_vec();

    let mut exchange = {
        let chats = state.chats.read().await;
        let session = chats.get(&id).ok_or_else(|| chat_error(&ChatError::SessionNotFound(id)))?;
        session
            .prepare(&body.text, &files, &mut rand::rng(), now_ms())
            .map_err(|e| chat_error(&e))?
    };

    if body.starter {
        analytics::track(analytics::STARTER_SELECTED, json!({ "session_id": id, "text": body.text }));
    }

    state
        .chats
        .write()
        .await
        .get_mut(&id)
        .ok_or_else(|| chat_error(&ChatError::SessionNotFound(id)))?
        .push(exchange.user.clone());

    if !state.config.chat_reply_delay.is_zero() {
        tokio::time::sleep(state.config.chat_reply_delay).await;
    }

    exchange.assistant.timestamp = now_ms();
    match state.chats.write().await.get_mut(&id) {
        Some(session) => session.push(exchange.assistant.clone()),
        None => debug!(session_id = %id, "chat closed before the reply was recorded"),
    }
    Ok(Json(exchange))
}

/// `POST /api/chat/citations/open`: record a citation click and resolve the file.
pub async fn open_citation(State(state): State<AppState>, Json(body): Json<CitationBody>) -> ApiResult<FileView> {
    let catalog = state.catalog.read().await;
    let file = catalog
        .get(&body.file_id)
        .map_err(|e| ApiError::from_err(catalog_error_to_status(&e), &e))?;
    analytics::track(
        analytics::CITATION_CLICKED,
        json!({
            "session_id": body.session_id,
            "file_id": file.id,
            "file_name": file.name,
            "page": body.page,
        }),
    );
    Ok(Json(FileView::from(file)))
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
