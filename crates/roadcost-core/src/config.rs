//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::analysis::FailureDisplay;
use crate::format::IST_OFFSET_MINUTES;

/// Upstream used when nothing overrides it.
pub const DEFAULT_API_TARGET: &str = "http://localhost:8000";

/// Environment variable that selects the upstream target.
pub const API_TARGET_ENV: &str = "ROADCOST_API_TARGET";

/// Path prefix every service route lives under.
pub const API_PREFIX: &str = "/api";

/// Fixed per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings read from `config.toml`.
///
/// ```toml
/// api_target = "http://localhost:8000"
/// utc_offset_minutes = 330
/// summary_failure = "silent"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme, host and port of the service. [`API_PREFIX`] is appended.
    pub api_target: String,
    /// Offset used when rendering timestamps.
    pub utc_offset_minutes: i32,
    pub summary_failure: FailureDisplay,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_target: DEFAULT_API_TARGET.to_string(),
            utc_offset_minutes: IST_OFFSET_MINUTES,
            summary_failure: FailureDisplay::default(),
        }
    }
}

impl ClientConfig {
    pub fn with_api_target(mut self, target: impl Into<String>) -> Self {
        self.api_target = target.into();
        self
    }

    /// `api_target` joined with [`API_PREFIX`], without a trailing slash.
    pub fn api_base(&self) -> String {
        format!("{}{}", self.api_target.trim_end_matches('/'), API_PREFIX)
    }
}
