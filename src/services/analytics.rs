//! Analytics events for the chat panel.
//!
//! Events are structured `tracing` records under the `analytics` target, so
//! a subscriber filter (`RUST_LOG=analytics=info`) is all it takes to
//! collect them.

use serde::Serialize;
use serde_json::Value;
use tracing::info;

pub const CHAT_OPENED: &str = "chat_opened";
pub const CHAT_CLOSED: &str = "chat_closed";
pub const MESSAGE_SENT: &str = "message_sent";
pub const STARTER_SELECTED: &str = "starter_selected";
pub const CITATION_CLICKED: &str = "citation_clicked";

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsEvent {
    pub action: &'static str,
    /// Milliseconds since Unix epoch.
    pub timestamp: i64,
    pub data: Value,
}

/// Record an analytics event and return it.
pub fn track(action: &'static str, data: Value) -> AnalyticsEvent {
    let event = AnalyticsEvent { action, timestamp: super::now_ms(), data };
    info!(target: "analytics", action, timestamp = event.timestamp, data = %event.data, "analytics event");
    event
}

#[cfg(test)]
#[path = "analytics_test.rs"]
mod tests;
