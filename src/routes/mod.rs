//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every playground feature is a JSON endpoint under `/api`. The upload
//! route carries its own body limit; everything else uses Axum's default.

pub mod chat;
pub mod files;
pub mod notes;
pub mod portal;
pub mod subscriptions;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Largest accepted multipart upload.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Full API router with CORS, compression and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/files",
            get(files::list_files)
                .post(files::upload_file)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/files/facets", get(files::facets))
        .route("/api/files/{id}", get(files::get_file))
        .route("/api/files/{id}/content", get(files::file_content))
        .route("/api/notes", post(notes::save_note))
        .route("/api/notes/attributes", post(notes::generate_attributes))
        .route("/api/chat/starters", get(chat::starters))
        .route("/api/chat/classify", post(chat::classify_text))
        .route("/api/chat/sessions", post(chat::create_session))
        .route("/api/chat/sessions/{id}", delete(chat::close_session))
        .route(
            "/api/chat/sessions/{id}/messages",
            get(chat::list_messages).post(chat::send_message),
        )
        .route("/api/chat/citations/open", post(chat::open_citation))
        .route("/api/subscriptions/{user_id}", get(subscriptions::list_subscriptions))
        .route("/api/subscriptions/{user_id}/sync", post(subscriptions::sync_subscriptions))
        .route(
            "/api/subscriptions/{user_id}/{kind}/{label}",
            put(subscriptions::toggle_subscription),
        )
        .route("/api/portal/departments", get(portal::list_departments))
        .route("/api/portal/departments/{id}", get(portal::get_department))
        .route("/api/portal/best-practices", get(portal::best_practices))
        .route("/api/portal/enablement", get(portal::enablement))
        .route("/api/portal/examples/{section}", get(portal::example))
        .route("/api/portal/generate", post(portal::generate))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_helpers::test_app_state;

    #[tokio::test]
    async fn healthz_is_ok() {
        assert_eq!(healthz().await, StatusCode::OK);
    }

    #[test]
    fn router_builds_without_route_conflicts() {
        let _router = app(test_app_state());
    }
}
