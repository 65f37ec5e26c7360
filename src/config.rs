//! Playground configuration parsed from environment variables.
//!
//! Every knob has a default so `cargo run` works with no environment at all.
//! Enumerated values (rollback policy, failure rate) are validated and fail
//! start-up when malformed; plain numeric tuning knobs fall back to their
//! defaults the same way the rest of the server's `env_parse` helpers do.

use std::time::Duration;

use crate::services::subscription::RollbackPolicy;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_USER: &str = "Current User";
pub const DEFAULT_UPDATE_LATENCY_MIN_MS: u64 = 500;
pub const DEFAULT_UPDATE_LATENCY_MAX_MS: u64 = 1500;
pub const DEFAULT_READ_LATENCY_MIN_MS: u64 = 200;
pub const DEFAULT_READ_LATENCY_MAX_MS: u64 = 500;
pub const DEFAULT_FAILURE_RATE: f64 = 0.1;
pub const DEFAULT_CHAT_REPLY_DELAY_MS: u64 = 500;
pub const DEFAULT_NOTE_SAVE_DELAY_MS: u64 = 500;
pub const DEFAULT_CHAT_IDLE_TIMEOUT_MS: u64 = 30 * 60 * 1000;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid {key}: {value}")]
    Invalid { key: &'static str, value: String },
    #[error("{key} must be between 0 and 1, got {value}")]
    OutOfRange { key: &'static str, value: f64 },
}

impl crate::error::ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid { .. } => "E_CONFIG_INVALID",
            Self::OutOfRange { .. } => "E_CONFIG_OUT_OF_RANGE",
        }
    }
}

/// Inclusive latency window for a simulated network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyWindow {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl LatencyWindow {
    #[must_use]
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        // A reversed window is treated as the same window, not an error.
        Self { min_ms: min_ms.min(max_ms), max_ms: min_ms.max(max_ms) }
    }

    /// No delay at all. Used by tests.
    #[must_use]
    pub fn instant() -> Self {
        Self { min_ms: 0, max_ms: 0 }
    }
}

/// Behaviour of the simulated subscription backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockApiConfig {
    pub update_latency: LatencyWindow,
    pub read_latency: LatencyWindow,
    pub failure_rate: f64,
    pub rollback: RollbackPolicy,
}

impl MockApiConfig {
    /// Zero latency, never fails, reverts on failure.
    #[must_use]
    pub fn reliable() -> Self {
        Self {
            update_latency: LatencyWindow::instant(),
            read_latency: LatencyWindow::instant(),
            failure_rate: 0.0,
            rollback: RollbackPolicy::Revert,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaygroundConfig {
    pub port: u16,
    /// Author recorded on uploads and saved notes.
    pub user_name: String,
    pub subscriptions: MockApiConfig,
    pub chat_reply_delay: Duration,
    pub note_save_delay: Duration,
    /// Chat sessions with no activity for this long are dropped when a new one opens.
    pub chat_idle_timeout: Duration,
}

impl PlaygroundConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `PLAYGROUND_USER`: default `Current User`
    /// - `SUBSCRIPTION_LATENCY_MIN_MS` / `SUBSCRIPTION_LATENCY_MAX_MS`: default 500 / 1500
    /// - `SUBSCRIPTION_READ_LATENCY_MIN_MS` / `SUBSCRIPTION_READ_LATENCY_MAX_MS`: default 200 / 500
    /// - `SUBSCRIPTION_FAILURE_RATE`: default 0.1
    /// - `SUBSCRIPTION_ROLLBACK`: `revert` (default) or `keep`
    /// - `CHAT_REPLY_DELAY_MS`: default 500
    /// - `NOTE_SAVE_DELAY_MS`: default 500
    /// - `CHAT_IDLE_TIMEOUT_MS`: default 1800000 (30 minutes)
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT`, `SUBSCRIPTION_FAILURE_RATE` or
    /// `SUBSCRIPTION_ROLLBACK` is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`PlaygroundConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_port(lookup("PORT").as_deref())?;
        let user_name = lookup("PLAYGROUND_USER")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_USER.to_string());

        let update_latency = LatencyWindow::new(
            parse_u64(lookup("SUBSCRIPTION_LATENCY_MIN_MS").as_deref(), DEFAULT_UPDATE_LATENCY_MIN_MS),
            parse_u64(lookup("SUBSCRIPTION_LATENCY_MAX_MS").as_deref(), DEFAULT_UPDATE_LATENCY_MAX_MS),
        );
        let read_latency = LatencyWindow::new(
            parse_u64(lookup("SUBSCRIPTION_READ_LATENCY_MIN_MS").as_deref(), DEFAULT_READ_LATENCY_MIN_MS),
            parse_u64(lookup("SUBSCRIPTION_READ_LATENCY_MAX_MS").as_deref(), DEFAULT_READ_LATENCY_MAX_MS),
        );
        let failure_rate = parse_failure_rate(lookup("SUBSCRIPTION_FAILURE_RATE").as_deref())?;
        let rollback = parse_rollback(lookup("SUBSCRIPTION_ROLLBACK").as_deref())?;

        Ok(Self {
            port,
            user_name,
            subscriptions: MockApiConfig { update_latency, read_latency, failure_rate, rollback },
            chat_reply_delay: Duration::from_millis(parse_u64(
                lookup("CHAT_REPLY_DELAY_MS").as_deref(),
                DEFAULT_CHAT_REPLY_DELAY_MS,
            )),
            note_save_delay: Duration::from_millis(parse_u64(
                lookup("NOTE_SAVE_DELAY_MS").as_deref(),
                DEFAULT_NOTE_SAVE_DELAY_MS,
            )),
            chat_idle_timeout: Duration::from_millis(parse_u64(
                lookup("CHAT_IDLE_TIMEOUT_MS").as_deref(),
                DEFAULT_CHAT_IDLE_TIMEOUT_MS,
            )),
        })
    }

    /// Config with every simulated delay removed and no injected failures.
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            port: 0,
            user_name: DEFAULT_USER.to_string(),
            subscriptions: MockApiConfig::reliable(),
            chat_reply_delay: Duration::ZERO,
            note_save_delay: Duration::ZERO,
            chat_idle_timeout: Duration::from_millis(DEFAULT_CHAT_IDLE_TIMEOUT_MS),
        }
    }
}

fn parse_u64(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(v) => v
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::Invalid { key: "PORT", value: v.to_string() }),
    }
}

fn parse_failure_rate(raw: Option<&str>) -> Result<f64, ConfigError> {
    let Some(v) = raw else {
        return Ok(DEFAULT_FAILURE_RATE);
    };
    let rate = v
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::Invalid { key: "SUBSCRIPTION_FAILURE_RATE", value: v.to_string() })?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::OutOfRange { key: "SUBSCRIPTION_FAILURE_RATE", value: rate });
    }
    Ok(rate)
}

fn parse_rollback(raw: Option<&str>) -> Result<RollbackPolicy, ConfigError> {
    match raw.map(str::trim).unwrap_or("revert") {
        "revert" => Ok(RollbackPolicy::Revert),
        "keep" => Ok(RollbackPolicy::Keep),
        other => Err(ConfigError::Invalid { key: "SUBSCRIPTION_ROLLBACK", value: other.to_string() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
