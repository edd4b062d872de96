//! Client configuration loaded from environment variables.
//!
//! Every setting has a default so the client runs with zero configuration
//! against the stock backend address.

use std::path::PathBuf;
use std::time::Duration;

use nasugview_shared::constants::{
    DEFAULT_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_REFRESH_INTERVAL_MS,
    DEFAULT_REFRESH_MAX_BACKOFF_MS,
};

use crate::refresh::RefreshPolicy;

pub const ENV_BASE_URL: &str = "NASUGVIEW_BASE_URL";
pub const ENV_REFRESH_MS: &str = "NASUGVIEW_REFRESH_MS";
pub const ENV_REFRESH_MAX_BACKOFF_MS: &str = "NASUGVIEW_REFRESH_MAX_BACKOFF_MS";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "NASUGVIEW_HTTP_TIMEOUT_SECS";
pub const ENV_DATA_DIR: &str = "NASUGVIEW_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Directory holding the PHP scripts.
    /// Env: `NASUGVIEW_BASE_URL`
    /// Default: `http://192.168.0.199/NasugView`
    pub base_url: String,

    /// Period of the silent review refresh.
    /// Env: `NASUGVIEW_REFRESH_MS`
    /// Default: 1000 ms
    pub refresh_interval: Duration,

    /// Upper bound on the refresh delay after repeated failures.
    /// Env: `NASUGVIEW_REFRESH_MAX_BACKOFF_MS`
    /// Default: 30000 ms
    pub refresh_max_backoff: Duration,

    /// Per-request timeout.
    /// Env: `NASUGVIEW_HTTP_TIMEOUT_SECS`
    /// Default: 15 s
    pub http_timeout: Duration,

    /// Where the session database lives. `None` means the platform data dir.
    /// Env: `NASUGVIEW_DATA_DIR`
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_interval: Duration::from_millis(DEFAULT_REFRESH_INTERVAL_MS),
            refresh_max_backoff: Duration::from_millis(DEFAULT_REFRESH_MAX_BACKOFF_MS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(ms) = parse_positive(&lookup, ENV_REFRESH_MS) {
            config.refresh_interval = Duration::from_millis(ms);
        }

        if let Some(ms) = parse_positive(&lookup, ENV_REFRESH_MAX_BACKOFF_MS) {
            config.refresh_max_backoff = Duration::from_millis(ms);
        }

        if let Some(secs) = parse_positive(&lookup, ENV_HTTP_TIMEOUT_SECS) {
            config.http_timeout = Duration::from_secs(secs);
        }

        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if config.refresh_max_backoff < config.refresh_interval {
            tracing::warn!(
                interval = ?config.refresh_interval,
                max_backoff = ?config.refresh_max_backoff,
                "Refresh backoff cap below the interval, raising it"
            );
            config.refresh_max_backoff = config.refresh_interval;
        }

        config
    }

    pub fn refresh_policy(&self) -> RefreshPolicy {
        RefreshPolicy {
            period: self.refresh_interval,
            max_backoff: self.refresh_max_backoff,
        }
    }
}

fn parse_positive(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            tracing::warn!(variable = key, value = %raw, "Invalid value, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_with(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]);
        assert_eq!(config.base_url, "http://192.168.0.199/NasugView");
        assert_eq!(config.refresh_interval, Duration::from_millis(1000));
        assert_eq!(config.refresh_max_backoff, Duration::from_secs(30));
        assert_eq!(config.http_timeout, Duration::from_secs(15));
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            (ENV_BASE_URL, "https://nasugview.example/api/"),
            (ENV_REFRESH_MS, "3000"),
            (ENV_HTTP_TIMEOUT_SECS, "5"),
            (ENV_DATA_DIR, "/var/lib/nasugview"),
        ]);
        assert_eq!(config.base_url, "https://nasugview.example/api");
        assert_eq!(config.refresh_interval, Duration::from_secs(3));
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/nasugview")));
    }

    #[test]
    fn test_garbage_falls_back() {
        let config = config_with(&[(ENV_REFRESH_MS, "soon"), (ENV_HTTP_TIMEOUT_SECS, "0")]);
        assert_eq!(config.refresh_interval, Duration::from_millis(1000));
        assert_eq!(config.http_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_backoff_cap_never_below_interval() {
        let config = config_with(&[
            (ENV_REFRESH_MS, "5000"),
            (ENV_REFRESH_MAX_BACKOFF_MS, "1000"),
        ]);
        let policy = config.refresh_policy();
        assert_eq!(policy.max_backoff, Duration::from_secs(5));
    }
}
