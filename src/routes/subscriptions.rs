//! Ticker and team subscription routes.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::services::catalog::Catalog;
use crate::services::subscription::{Subscription, SubscriptionError, SubscriptionKind, SubscriptionList};
use crate::state::AppState;

pub(crate) fn subscription_error_to_status(err: &SubscriptionError) -> StatusCode {
    match err {
        SubscriptionError::Network { .. } => StatusCode::SERVICE_UNAVAILABLE,
        SubscriptionError::Unavailable { .. } => StatusCode::NOT_FOUND,
        SubscriptionError::InFlight { .. } => StatusCode::CONFLICT,
        SubscriptionError::UnknownKind(_) => StatusCode::BAD_REQUEST,
    }
}

fn subscription_error(err: &SubscriptionError) -> ApiError {
    ApiError::from_err(subscription_error_to_status(err), err)
}

fn available(catalog: &Catalog, kind: SubscriptionKind) -> Vec<String> {
    match kind {
        SubscriptionKind::Ticker => catalog.available_tickers(),
        SubscriptionKind::Team => catalog.available_teams(),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct KindQuery {
    #[serde(default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleBody {
    pub subscribed: bool,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionsView {
    pub user_id: String,
    pub lists: Vec<SubscriptionList>,
}

#[derive(Debug, Serialize)]
pub struct SyncResult {
    pub loaded: usize,
    #[serde(flatten)]
    pub view: SubscriptionsView,
}

async fn view(state: &AppState, user_id: String, kinds: &[SubscriptionKind]) -> SubscriptionsView {
    let catalog = state.catalog.read().await;
    let lists = kinds
        .iter()
        .map(|&kind| state.subscriptions.list(&user_id, kind, &available(&catalog, kind)))
        .collect();
    SubscriptionsView { user_id, lists }
}

/// `GET /api/subscriptions/{user_id}?kind=`: one list per kind, or only the requested kind.
pub async fn list_subscriptions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<KindQuery>,
) -> ApiResult<SubscriptionsView> {
    let kinds = match query.kind.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        Some(raw) => vec![raw.parse::<SubscriptionKind>().map_err(|e| subscription_error(&e))?],
        None => SubscriptionKind::ALL.to_vec(),
    };
    Ok(Json(view(&state, user_id, &kinds).await))
}

/// `PUT /api/subscriptions/{user_id}/{kind}/{label}`: subscribe or unsubscribe.
pub async fn toggle_subscription(
    State(state): State<AppState>,
    Path((user_id, kind, label)): Path<(String, String, String)>,
    Json(body): Json<ToggleBody>,
) -> ApiResult<Subscription> {
    let kind: SubscriptionKind = kind.parse().map_err(|e| subscription_error(&e))?;
    let labels = available(&*state.catalog.read().await, kind);
    state
        .subscriptions
        .toggle(&user_id, kind, &label, body.subscribed, &labels)
        .await
        .map(Json)
        .map_err(|e| subscription_error(&e))
}

/// `POST /api/subscriptions/{user_id}/sync`: reload the local view from the backend.
pub async fn sync_subscriptions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<SyncResult> {
    let loaded = state
        .subscriptions
        .sync(&user_id)
        .await
        .map_err(|e| subscription_error(&e))?;
    let view = view(&state, user_id, &SubscriptionKind::ALL).await;
    Ok(Json(SyncResult { loaded, view }))
}

#[cfg(test)]
#[path = "subscriptions_test.rs"]
mod tests;
