use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::config::MockApiConfig;
use crate::services::subscription::MockSubscriptionApi;
use crate::state::test_helpers::{test_app_state, test_app_state_with_api};

fn toggle_path(user: &str, kind: &str, label: &str) -> Path<(String, String, String)> {
    Path((user.into(), kind.into(), label.into()))
}

fn kind_query(kind: Option<&str>) -> Query<KindQuery> {
    Query(KindQuery { kind: kind.map(str::to_string) })
}

#[test]
fn subscription_errors_map_to_statuses() {
    let kind = SubscriptionKind::Ticker;
    let label = String::from("AAPL");
    assert_eq!(
        subscription_error_to_status(&SubscriptionError::Network { kind, label: label.clone() }),
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
        subscription_error_to_status(&SubscriptionError::Unavailable { kind, label: label.clone() }),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        subscription_error_to_status(&SubscriptionError::InFlight { kind, label }),
        StatusCode::CONFLICT
    );
    assert_eq!(
        subscription_error_to_status(&SubscriptionError::UnknownKind("x".into())),
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn list_defaults_to_both_kinds_unsubscribed() {
    let state = test_app_state();
    let Json(view) = list_subscriptions(State(state), Path("u1".into()), kind_query(None)).await.unwrap();
    assert_eq!(view.lists.len(), 2);
    assert_eq!(view.lists[0].kind, SubscriptionKind::Ticker);
    assert_eq!(view.lists[0].subscriptions.len(), 7);
    assert_eq!(view.lists[0].subscribed_count, 0);
    assert_eq!(view.lists[1].kind, SubscriptionKind::Team);
}

#[tokio::test]
async fn list_single_kind() {
    let state = test_app_state();
    let Json(view) = list_subscriptions(State(state), Path("u1".into()), kind_query(Some("teams")))
        .await
        .unwrap();
    assert_eq!(view.lists.len(), 1);
    assert_eq!(view.lists[0].kind, SubscriptionKind::Team);
}

#[tokio::test]
async fn list_rejects_unknown_kind() {
    let state = test_app_state();
    let err = list_subscriptions(State(state), Path("u1".into()), kind_query(Some("sector")))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn toggle_then_list_shows_subscription() {
    let state = test_app_state();
    let Json(sub) = toggle_subscription(
        State(state.clone()),
        toggle_path("u1", "ticker", "NVDA"),
        Json(ToggleBody { subscribed: true }),
    )
    .await
    .unwrap();
    assert!(sub.subscribed);
    assert!(sub.last_update.is_some());

    let Json(view) = list_subscriptions(State(state), Path("u1".into()), kind_query(Some("ticker")))
        .await
        .unwrap();
    assert_eq!(view.lists[0].subscribed_count, 1);
}

#[tokio::test]
async fn toggle_unknown_label_is_not_found() {
    let state = test_app_state();
    let err = toggle_subscription(
        State(state),
        toggle_path("u1", "team", "Crypto"),
        Json(ToggleBody { subscribed: true }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.body.code, "E_SUBSCRIPTION_UNAVAILABLE");
}

#[tokio::test]
async fn failed_toggle_is_retryable_and_reverted() {
    let config = MockApiConfig { failure_rate: 1.0, ..MockApiConfig::reliable() };
    let api = Arc::new(MockSubscriptionApi::with_rng(config, StdRng::seed_from_u64(9)));
    let state = test_app_state_with_api(api);

    let err = toggle_subscription(
        State(state.clone()),
        toggle_path("u1", "ticker", "AAPL"),
        Json(ToggleBody { subscribed: true }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(err.body.retryable);

    let Json(view) = list_subscriptions(State(state), Path("u1".into()), kind_query(Some("ticker")))
        .await
        .unwrap();
    assert_eq!(view.lists[0].subscribed_count, 0);
}

#[tokio::test]
async fn sync_reloads_from_backend() {
    let api = Arc::new(MockSubscriptionApi::with_rng(MockApiConfig::reliable(), StdRng::seed_from_u64(9)));
    let writer = test_app_state_with_api(api.clone());
    toggle_subscription(State(writer), toggle_path("u1", "team", "Energy"), Json(ToggleBody { subscribed: true }))
        .await
        .unwrap();

    // A fresh manager over the same backend starts empty until it syncs.
    let reader = test_app_state_with_api(api);
    let Json(result) = sync_subscriptions(State(reader), Path("u1".into())).await.unwrap();
    assert_eq!(result.loaded, 1);
    let teams = &result.view.lists[1];
    assert_eq!(teams.kind, SubscriptionKind::Team);
    assert_eq!(teams.subscribed_count, 1);
}
