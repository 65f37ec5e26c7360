use super::*;

#[tokio::test]
async fn new_state_is_seeded() {
    let state = test_helpers::test_app_state();
    assert_eq!(state.catalog.read().await.len(), 9);
    assert!(!state.portal.read().await.departments.is_empty());
    assert!(state.chats.read().await.is_empty());
}

#[tokio::test]
async fn clones_share_the_same_catalog() {
    let state = test_helpers::test_app_state();
    let other = state.clone();
    let id = other.catalog.write().await.next_id(i64::MAX - 1);
    assert_eq!(state.catalog.write().await.next_id(0), (i64::MAX).to_string());
    assert_eq!(id, (i64::MAX - 1).to_string());
}

#[tokio::test]
async fn seed_chat_registers_session() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_chat(&state).await;
    let chats = state.chats.read().await;
    assert_eq!(chats.get(&id).map(|s| s.messages.len()), Some(0));
}

#[test]
fn rollback_policy_follows_config() {
    use crate::services::subscription::RollbackPolicy;
    let mut config = PlaygroundConfig::for_tests();
    config.subscriptions.rollback = RollbackPolicy::Keep;
    let state = AppState::new(config);
    assert_eq!(state.subscriptions.rollback_policy(), RollbackPolicy::Keep);
}
