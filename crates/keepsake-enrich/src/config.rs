//! Enrichment configuration.

use std::time::Duration;

use keepsake_core::defaults::{FETCH_TIMEOUT_SECS, FETCH_USER_AGENT};

/// Environment variable overriding the fetch timeout, in seconds.
pub const FETCH_TIMEOUT_ENV: &str = "KEEPSAKE_FETCH_TIMEOUT_SECS";

/// Environment variable overriding the fetch User-Agent.
pub const FETCH_USER_AGENT_ENV: &str = "KEEPSAKE_FETCH_USER_AGENT";

/// Settings for outbound page fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichConfig {
    /// Whole-request timeout, covering connect and body read.
    pub timeout: Duration,
    /// User-Agent header sent with every fetch.
    pub user_agent: String,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            user_agent: FETCH_USER_AGENT.to_string(),
        }
    }
}

impl EnrichConfig {
    /// Create from environment variables, falling back to defaults for
    /// anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout: std::env::var(FETCH_TIMEOUT_ENV)
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            user_agent: std::env::var(FETCH_USER_AGENT_ENV)
                .ok()
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or(defaults.user_agent),
        }
    }

    /// Set the fetch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
