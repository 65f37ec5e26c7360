//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Everything lives in memory: the file catalog, open chat sessions, the
//! AI portal content and the subscription manager. A restart reseeds the
//! mock content and forgets everything else.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::PlaygroundConfig;
use crate::services::catalog::Catalog;
use crate::services::chat::ChatSession;
use crate::services::portal::Portal;
use crate::services::seed::seed_files;
use crate::services::subscription::{MockSubscriptionApi, SubscriptionApi, SubscriptionManager};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PlaygroundConfig>,
    pub catalog: Arc<RwLock<Catalog>>,
    /// Open chat panels keyed by session id. Closed by `DELETE`, or dropped
    /// once idle past `config.chat_idle_timeout` when another session opens.
    pub chats: Arc<RwLock<HashMap<Uuid, ChatSession>>>,
    pub portal: Arc<RwLock<Portal>>,
    pub subscriptions: Arc<SubscriptionManager>,
}

impl AppState {
    /// State backed by the mock subscription API described by `config`.
    #[must_use]
    pub fn new(config: PlaygroundConfig) -> Self {
        let api = Arc::new(MockSubscriptionApi::new(config.subscriptions));
        Self::with_subscription_api(config, api)
    }

    #[must_use]
    pub fn with_subscription_api(config: PlaygroundConfig, api: Arc<dyn SubscriptionApi>) -> Self {
        let subscriptions = Arc::new(SubscriptionManager::new(api, config.subscriptions.rollback));
        Self {
            config: Arc::new(config),
            catalog: Arc::new(RwLock::new(Catalog::new(seed_files()))),
            chats: Arc::new(RwLock::new(HashMap::new())),
            portal: Arc::new(RwLock::new(Portal::seeded())),
            subscriptions,
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
