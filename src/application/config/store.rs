use std::env;
use std::time::Duration;

/// Default upper bound for a single store call
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Applied to every store call made by the invite service.
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        let secs = env::var("INVITELINK_STORE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_STORE_TIMEOUT_SECS);

        Self {
            timeout: Duration::from_secs(secs),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
        }
    }
}
