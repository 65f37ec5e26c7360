//! Ticker and team subscriptions with optimistic updates.
//!
//! DESIGN
//! ======
//! [`SubscriptionApi`] is the seam a real backend would plug into. The only
//! implementation here is [`MockSubscriptionApi`], an injected in-memory
//! store that sleeps a random latency and fails at a configured rate.
//!
//! [`SubscriptionManager`] owns the local view. A toggle writes locally
//! first, then calls the API; on failure the [`RollbackPolicy`] decides
//! whether the optimistic write survives. A second toggle for the same
//! (user, kind, label) while one is outstanding is rejected.
//!
//! Locks are std mutexes and are never held across an await.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{LatencyWindow, MockApiConfig};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SubscriptionError {
    #[error("failed to update subscription for {kind} {label}: network error")]
    Network { kind: SubscriptionKind, label: String },
    #[error("{kind} {label} is not available for subscription")]
    Unavailable { kind: SubscriptionKind, label: String },
    #[error("an update for {kind} {label} is already in flight")]
    InFlight { kind: SubscriptionKind, label: String },
    #[error("unknown subscription kind: {0}")]
    UnknownKind(String),
}

impl crate::error::ErrorCode for SubscriptionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Network { .. } => "E_SUBSCRIPTION_NETWORK",
            Self::Unavailable { .. } => "E_SUBSCRIPTION_UNAVAILABLE",
            Self::InFlight { .. } => "E_SUBSCRIPTION_IN_FLIGHT",
            Self::UnknownKind(_) => "E_UNKNOWN_SUBSCRIPTION_KIND",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::InFlight { .. })
    }
}

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionKind {
    Ticker,
    Team,
}

impl SubscriptionKind {
    pub const ALL: [SubscriptionKind; 2] = [Self::Ticker, Self::Team];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ticker => "ticker",
            Self::Team => "team",
        }
    }
}

impl fmt::Display for SubscriptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionKind {
    type Err = SubscriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ticker" | "tickers" => Ok(Self::Ticker),
            "team" | "teams" => Ok(Self::Team),
            _ => Err(SubscriptionError::UnknownKind(s.to_string())),
        }
    }
}

/// What to do with an optimistic write when the API call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RollbackPolicy {
    /// Restore the record as it was before the toggle.
    #[default]
    Revert,
    /// Leave the optimistic value in place.
    Keep,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscription {
    pub kind: SubscriptionKind,
    pub label: String,
    pub subscribed: bool,
    /// Milliseconds since Unix epoch; `None` when never touched.
    pub last_update: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    pub user_id: String,
    pub kind: SubscriptionKind,
    pub label: String,
    pub subscribed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    pub success: bool,
    pub kind: SubscriptionKind,
    pub label: String,
    pub subscribed: bool,
    pub timestamp: i64,
}

/// One kind's subscriptions for a user.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionList {
    pub kind: SubscriptionKind,
    pub subscriptions: Vec<Subscription>,
    pub subscribed_count: usize,
}

// =============================================================================
// API
// =============================================================================

#[async_trait]
pub trait SubscriptionApi: Send + Sync {
    async fn update_subscription(
        &self,
        request: SubscriptionRequest,
    ) -> Result<SubscriptionResponse, SubscriptionError>;

    /// Label → subscribed for one user and kind.
    async fn get_subscriptions(
        &self,
        user_id: &str,
        kind: SubscriptionKind,
    ) -> Result<HashMap<String, bool>, SubscriptionError>;
}

type StoreKey = (String, SubscriptionKind, String);

/// In-memory stand-in for the subscription backend.
pub struct MockSubscriptionApi {
    config: MockApiConfig,
    store: Mutex<HashMap<StoreKey, bool>>,
    rng: Mutex<StdRng>,
}

impl MockSubscriptionApi {
    #[must_use]
    pub fn new(config: MockApiConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    #[must_use]
    pub fn with_rng(config: MockApiConfig, rng: StdRng) -> Self {
        Self { config, store: Mutex::new(HashMap::new()), rng: Mutex::new(rng) }
    }

    /// Pick a delay inside `window` and decide whether this call fails.
    fn roll(&self, window: LatencyWindow, can_fail: bool) -> (Duration, bool) {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let delay = Duration::from_millis(rng.random_range(window.min_ms..=window.max_ms));
        let fail = can_fail && self.config.failure_rate > 0.0 && rng.random::<f64>() < self.config.failure_rate;
        (delay, fail)
    }
}

async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl SubscriptionApi for MockSubscriptionApi {
    async fn update_subscription(
        &self,
        request: SubscriptionRequest,
    ) -> Result<SubscriptionResponse, SubscriptionError> {
        let (delay, fail) = self.roll(self.config.update_latency, true);
        simulate_latency(delay).await;

        if fail {
            return Err(SubscriptionError::Network { kind: request.kind, label: request.label });
        }

        self.store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((request.user_id, request.kind, request.label.clone()), request.subscribed);

        Ok(SubscriptionResponse {
            success: true,
            kind: request.kind,
            label: request.label,
            subscribed: request.subscribed,
            timestamp: super::now_ms(),
        })
    }

    async fn get_subscriptions(
        &self,
        user_id: &str,
        kind: SubscriptionKind,
    ) -> Result<HashMap<String, bool>, SubscriptionError> {
        let (delay, _) = self.roll(self.config.read_latency, false);
        simulate_latency(delay).await;

        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(store
            .iter()
            .filter(|((user, k, _), _)| user == user_id && *k == kind)
            .map(|((_, _, label), subscribed)| (label.clone(), *subscribed))
            .collect())
    }
}

// =============================================================================
// MANAGER
// =============================================================================

/// Local, optimistic view of every user's subscriptions.
pub struct SubscriptionManager {
    api: Arc<dyn SubscriptionApi>,
    rollback: RollbackPolicy,
    local: Mutex<HashMap<StoreKey, Subscription>>,
    in_flight: Mutex<HashSet<StoreKey>>,
}

/// An unconfirmed optimistic write. Dropping it without `confirm` applies
/// the rollback policy, so a failed or cancelled toggle is handled the same
/// way. The in-flight marker is always cleared.
struct PendingToggle<'a> {
    manager: &'a SubscriptionManager,
    key: StoreKey,
    previous: Option<Subscription>,
    confirmed: bool,
}

impl PendingToggle<'_> {
    fn confirm(mut self, record: Subscription) {
        self.manager
            .local
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(self.key.clone(), record);
        self.confirmed = true;
    }
}

impl Drop for PendingToggle<'_> {
    fn drop(&mut self) {
        if !self.confirmed && self.manager.rollback == RollbackPolicy::Revert {
            let mut local = self.manager.local.lock().unwrap_or_else(PoisonError::into_inner);
            match self.previous.take() {
                Some(prev) => {
                    local.insert(self.key.clone(), prev);
                }
                None => {
                    local.remove(&self.key);
                }
            }
        }
        self.manager
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

impl SubscriptionManager {
    #[must_use]
    pub fn new(api: Arc<dyn SubscriptionApi>, rollback: RollbackPolicy) -> Self {
        Self { api, rollback, local: Mutex::new(HashMap::new()), in_flight: Mutex::new(HashSet::new()) }
    }

    #[must_use]
    pub fn rollback_policy(&self) -> RollbackPolicy {
        self.rollback
    }

    /// Whether a toggle for this key is still waiting on the API.
    #[must_use]
    pub fn is_pending(&self, user_id: &str, kind: SubscriptionKind, label: &str) -> bool {
        let key = (user_id.to_string(), kind, label.to_string());
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner).contains(&key)
    }

    /// Current local record, if the label was ever touched.
    #[must_use]
    pub fn get(&self, user_id: &str, kind: SubscriptionKind, label: &str) -> Option<Subscription> {
        let key = (user_id.to_string(), kind, label.to_string());
        self.local.lock().unwrap_or_else(PoisonError::into_inner).get(&key).cloned()
    }

    /// Set a subscription, writing locally before the API confirms.
    ///
    /// `available` is the set of labels that may be subscribed to for `kind`.
    ///
    /// # Errors
    ///
    /// `Unavailable` for labels outside `available`, `InFlight` when a toggle
    /// for the same key is outstanding, and the API's error when the call
    /// fails (after the rollback policy has been applied).
    pub async fn toggle(
        &self,
        user_id: &str,
        kind: SubscriptionKind,
        label: &str,
        subscribed: bool,
        available: &[String],
    ) -> Result<Subscription, SubscriptionError> {
        if !available.iter().any(|a| a == label) {
            return Err(SubscriptionError::Unavailable { kind, label: label.to_string() });
        }

        let key: StoreKey = (user_id.to_string(), kind, label.to_string());
        let mut pending = {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            if !in_flight.insert(key.clone()) {
                return Err(SubscriptionError::InFlight { kind, label: label.to_string() });
            }
            PendingToggle { manager: self, key: key.clone(), previous: None, confirmed: false }
        };

        pending.previous = self.local.lock().unwrap_or_else(PoisonError::into_inner).insert(
            key,
            Subscription { kind, label: label.to_string(), subscribed, last_update: Some(super::now_ms()) },
        );

        let request = SubscriptionRequest { user_id: user_id.to_string(), kind, label: label.to_string(), subscribed };
        match self.api.update_subscription(request).await {
            Ok(response) => {
                let confirmed = Subscription {
                    kind,
                    label: label.to_string(),
                    subscribed: response.subscribed,
                    last_update: Some(response.timestamp),
                };
                pending.confirm(confirmed.clone());
                debug!(user_id, %kind, label, subscribed, "subscription updated");
                Ok(confirmed)
            }
            Err(e) => {
                warn!(user_id, %kind, label, subscribed, error = %e, rollback = ?self.rollback, "subscription update failed");
                drop(pending);
                Err(e)
            }
        }
    }

    /// One record per available label, unsubscribed when never touched.
    #[must_use]
    pub fn list(&self, user_id: &str, kind: SubscriptionKind, available: &[String]) -> SubscriptionList {
        let local = self.local.lock().unwrap_or_else(PoisonError::into_inner);
        let subscriptions: Vec<Subscription> = available
            .iter()
            .map(|label| {
                local
                    .get(&(user_id.to_string(), kind, label.clone()))
                    .cloned()
                    .unwrap_or_else(|| Subscription { kind, label: label.clone(), subscribed: false, last_update: None })
            })
            .collect();
        let subscribed_count = subscriptions.iter().filter(|s| s.subscribed).count();
        SubscriptionList { kind, subscriptions, subscribed_count }
    }

    /// Reload a user's local view from the API. Keys with a toggle in flight
    /// keep their optimistic value.
    ///
    /// Returns the number of records loaded.
    ///
    /// # Errors
    ///
    /// Returns the API's error; records already loaded for earlier kinds stay.
    pub async fn sync(&self, user_id: &str) -> Result<usize, SubscriptionError> {
        let mut loaded = 0;
        for kind in SubscriptionKind::ALL {
            let remote = self.api.get_subscriptions(user_id, kind).await?;
            let now = super::now_ms();
            let in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            let mut local = self.local.lock().unwrap_or_else(PoisonError::into_inner);
            for (label, subscribed) in remote {
                let key = (user_id.to_string(), kind, label);
                if in_flight.contains(&key) {
                    continue;
                }
                let label = key.2.clone();
                local.insert(key, Subscription { kind, label, subscribed, last_update: Some(now) });
                loaded += 1;
            }
        }
        debug!(user_id, loaded, "subscriptions synced");
        Ok(loaded)
    }
}

#[cfg(test)]
#[path = "subscription_test.rs"]
mod tests;
