use std::time::Duration;

/// Short-lived key/value store shared by every request.
#[cfg_attr(test, mockall::automock)]
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Option<serde_json::Value>;

    fn put(&self, key: String, value: serde_json::Value, ttl: Duration);

    /// Returns the value and removes it, so it can be used only once.
    fn take(&self, key: &str) -> Option<serde_json::Value>;
}
