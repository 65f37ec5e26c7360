use super::*;
use crate::services::catalog::{FileCategory, FileKind};
use crate::state::test_helpers::test_app_state;

fn draft(title: &str, content: &str) -> NoteDraft {
    NoteDraft { title: title.into(), content: content.into(), ..NoteDraft::default() }
}

#[tokio::test]
async fn attributes_use_catalog_tickers() {
    let state = test_app_state();
    let body = AttributesBody { content: "<p>Comparing MSFT and NVDA capex plans.</p>".into() };
    let Json(attrs) = generate_attributes(State(state), Json(body)).await.unwrap();
    assert_eq!(attrs.title, "Comparing MSFT and NVDA capex plans");
    assert_eq!(attrs.primary_ticker.as_deref(), Some("MSFT"));
    assert_eq!(attrs.secondary_ticker.as_deref(), Some("NVDA"));
    assert!(attrs.tags.contains(&"irn".to_string()));
}

#[tokio::test]
async fn attributes_reject_empty_content() {
    let state = test_app_state();
    let err = generate_attributes(State(state), Json(AttributesBody { content: "<p></p>".into() }))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err.body.code, "E_NOTE_EMPTY");
}

#[tokio::test]
async fn save_appends_irn_to_catalog() {
    let state = test_app_state();
    let (status, Json(view)) = save_note(State(state.clone()), Json(draft("Bank margins", "<p>NII peaked.</p>")))
        .await
        .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(view.file.category, FileCategory::Irn);
    assert_eq!(view.kind, FileKind::Note);
    assert_eq!(view.file.tags, ["irn"]);
    assert_eq!(view.file.author, state.config.user_name);

    let catalog = state.catalog.read().await;
    assert_eq!(catalog.len(), 10);
    assert_eq!(catalog.get(&view.file.id).unwrap().name, "Bank margins");
}

#[tokio::test]
async fn save_rejects_missing_title_without_touching_catalog() {
    let state = test_app_state();
    let err = save_note(State(state.clone()), Json(draft("  ", "<p>body</p>"))).await.unwrap_err();
    assert_eq!(err.body.code, "E_NOTE_MISSING_TITLE");
    assert_eq!(state.catalog.read().await.len(), 9);
}

#[tokio::test]
async fn consecutive_saves_get_distinct_ids() {
    let state = test_app_state();
    let (_, Json(a)) = save_note(State(state.clone()), Json(draft("A", "a"))).await.unwrap();
    let (_, Json(b)) = save_note(State(state.clone()), Json(draft("B", "b"))).await.unwrap();
    assert_ne!(a.file.id, b.file.id);
}
