use std::time::Duration;

use super::*;
use crate::config::PlaygroundConfig;
use crate::services::chat::Sender;
use crate::services::intent::{DataSource, Intent};
use crate::state::AppState;
use crate::state::test_helpers::{seed_chat, test_app_state};

fn send_body(text: &str) -> Json<SendBody> {
    Json(SendBody { text: text.into(), starter: false })
}

#[test]
fn chat_errors_map_to_statuses() {
    assert_eq!(chat_error_to_status(&ChatError::EmptyMessage), StatusCode::BAD_REQUEST);
    assert_eq!(chat_error_to_status(&ChatError::SessionNotFound(Uuid::nil())), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn starters_lists_six_prompts() {
    let Json(list) = starters().await;
    assert_eq!(list.len(), 6);
}

#[tokio::test]
async fn classify_returns_intent_and_source() {
    let Json(result) = classify_text(Json(ClassifyBody { text: "What are recent analyst views on AAPL?".into() })).await;
    assert_eq!(result.intent, Intent::AnalystOpinion);
    assert_eq!(result.data_source, DataSource::Files);
}

#[tokio::test]
async fn create_session_registers_it() {
    let state = test_app_state();
    let (status, Json(created)) = create_session(State(state.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.starters.len(), 6);
    assert!(state.chats.read().await.contains_key(&created.id));
}

#[tokio::test]
async fn send_records_both_messages() {
    let state = test_app_state();
    let id = seed_chat(&state).await;

    let Json(exchange) = send_message(State(state.clone()), Path(id), send_body("Has the price target for JPM moved?"))
        .await
        .unwrap();
    assert_eq!(exchange.assistant.intent, Intent::PriceTargets);
    assert_eq!(exchange.assistant.citations[0].file_id, "4");

    let Json(messages) = list_messages(State(state), Path(id)).await.unwrap();
    let senders: Vec<Sender> = messages.iter().map(|m| m.sender).collect();
    assert_eq!(senders, [Sender::User, Sender::Assistant]);
}

#[tokio::test]
async fn send_cites_uploaded_files() {
    let state = test_app_state();
    let id = seed_chat(&state).await;
    {
        let mut catalog = state.catalog.write().await;
        let mut file = catalog.get("8").unwrap().clone();
        file.id = catalog.next_id(now_ms());
        file.name = "GME Squeeze Recap.pdf".into();
        file.ticker = Some("GME".into());
        catalog.insert(file);
    }
    let Json(exchange) = send_message(State(state), Path(id), send_body("anything on gme?")).await.unwrap();
    let names: Vec<&str> = exchange.assistant.citations.iter().map(|c| c.file_name.as_str()).collect();
    assert_eq!(names, ["GME Squeeze Recap.pdf"]);
}

#[tokio::test]
async fn send_rejects_blank_text() {
    let state = test_app_state();
    let id = seed_chat(&state).await;
    let err = send_message(State(state.clone()), Path(id), send_body("  ")).await.unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.body.code, "E_EMPTY_MESSAGE");
    assert!(state.chats.read().await[&id].messages.is_empty());
}

#[tokio::test]
async fn send_to_unknown_session_is_not_found() {
    let state = test_app_state();
    let err = send_message(State(state), Path(Uuid::new_v4()), send_body("hi")).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn starter_flag_is_accepted() {
    let state = test_app_state();
    let id = seed_chat(&state).await;
    let body = Json(SendBody { text: CONVERSATION_STARTERS[0].text.into(), starter: true });
    let Json(exchange) = send_message(State(state), Path(id), body).await.unwrap();
    assert_eq!(exchange.user.text, CONVERSATION_STARTERS[0].text);
}

#[tokio::test]
async fn close_session_forgets_history() {
    let state = test_app_state();
    let id = seed_chat(&state).await;
    assert_eq!(close_session(State(state.clone()), Path(id)).await.unwrap(), StatusCode::NO_CONTENT);
    let err = list_messages(State(state.clone()), Path(id)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert!(close_session(State(state), Path(id)).await.is_err());
}

#[tokio::test]
async fn open_citation_resolves_file() {
    let state = test_app_state();
    let body = CitationBody { session_id: None, file_id: "3".into(), page: Some(7) };
    let Json(view) = open_citation(State(state), Json(body)).await.unwrap();
    assert_eq!(view.file.name, "MSFT Management Meeting Notes.pdf");
}

#[tokio::test]
async fn open_citation_for_missing_file_is_not_found() {
    let state = test_app_state();
    let body = CitationBody { session_id: None, file_id: "404".into(), page: None };
    let err = open_citation(State(state), Json(body)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reply_is_stamped_after_the_delay() {
    let config = PlaygroundConfig { chat_reply_delay: Duration::from_millis(30), ..PlaygroundConfig::for_tests() };
    let state = AppState::new(config);
    let id = seed_chat(&state).await;

    let Json(exchange) = send_message(State(state.clone()), Path(id), send_body("Any news on TSLA?")).await.unwrap();
    assert!(exchange.assistant.timestamp - exchange.user.timestamp >= 30);

    let Json(messages) = list_messages(State(state), Path(id)).await.unwrap();
    assert_eq!(messages[1].timestamp, exchange.assistant.timestamp);
}

#[tokio::test]
async fn closing_during_the_delay_drops_the_reply() {
    let config = PlaygroundConfig { chat_reply_delay: Duration::from_millis(200), ..PlaygroundConfig::for_tests() };
    let state = AppState::new(config);
    let id = seed_chat(&state).await;

    let pending = tokio::spawn(send_message(State(state.clone()), Path(id), send_body("hello")));
    while state.chats.read().await[&id].messages.is_empty() {
        tokio::task::yield_now().await;
    }
    close_session(State(state.clone()), Path(id)).await.unwrap();

    assert!(pending.await.unwrap().is_ok());
    assert!(!state.chats.read().await.contains_key(&id));
}

#[tokio::test]
async fn opening_a_session_drops_idle_ones() {
    let state = test_app_state();
    let stale = seed_chat(&state).await;
    let fresh = seed_chat(&state).await;
    state.chats.write().await.get_mut(&stale).unwrap().last_active = 0;

    let (_, Json(created)) = create_session(State(state.clone())).await;

    let chats = state.chats.read().await;
    assert!(!chats.contains_key(&stale));
    assert!(chats.contains_key(&fresh));
    assert!(chats.contains_key(&created.id));
}
