//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the playground's behaviour (filtering, uploads, note
//! attributes, intent matching, subscriptions, portal content) so route
//! handlers can stay focused on request parsing and status mapping.

pub mod analytics;
pub mod catalog;
pub mod chat;
pub mod intent;
pub mod note;
pub mod portal;
pub mod seed;
pub mod subscription;
pub mod upload;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current time as milliseconds since Unix epoch.
pub(crate) fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(i64::MAX)
}
