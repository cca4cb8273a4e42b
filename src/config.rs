//! # Decorator configuration.
//!
//! Provides [`TaskConfig`], the structured "extra configuration" bag that decorator
//! entry points forward verbatim to the factory and, from there, to the node.
//!
//! ## Sentinel values
//! - `task_id = None` → the callable's name is used
//! - `timeout = 0s` → no timeout (see [`TaskConfig::default_timeout`])
//!
//! Keys in `extra` are opaque: nothing in this crate validates or interprets them.

use std::time::Duration;

use serde_json::{Map, Value};

/// Node-level configuration carried alongside a wrapped callable.
///
/// ## Field semantics
/// - `task_id`: explicit node id (`None` = derive from the callable name)
/// - `timeout`: per-attempt execution timeout (`0s` = no timeout)
/// - `extra`: forward-compatible passthrough for settings owned by the surrounding system
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks across the codebase.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskConfig {
    /// Explicit task id; when unset the callable name is used.
    pub task_id: Option<String>,

    /// Per-attempt execution timeout.
    ///
    /// - `Duration::ZERO` = no timeout (callable runs until completion)
    /// - `> 0` = timeout applied to each execution
    pub timeout: Duration,

    /// Opaque settings forwarded untouched to the node.
    pub extra: Map<String, Value>,
}

impl TaskConfig {
    /// Creates an empty configuration (same as `Default`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the configured timeout as an `Option`.
    ///
    /// - `None` → no timeout
    /// - `Some(d)` → timeout applied per execution
    #[inline]
    pub fn default_timeout(&self) -> Option<Duration> {
        Self::resolve_timeout(self.timeout)
    }

    /// Applies the `0s` = no timeout sentinel to a raw duration.
    #[inline]
    pub(crate) fn resolve_timeout(timeout: Duration) -> Option<Duration> {
        (timeout != Duration::ZERO).then_some(timeout)
    }

    /// Returns a new config with an explicit task id.
    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    /// Returns a new config with updated timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns a new config with one more passthrough entry.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_means_none() {
        let cfg = TaskConfig::default();
        assert_eq!(cfg.default_timeout(), None);

        let cfg = cfg.with_timeout(Duration::from_secs(3));
        assert_eq!(cfg.default_timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_extra_entries_are_kept_verbatim() {
        let cfg = TaskConfig::new()
            .with_extra("pool", "default")
            .with_extra("priority_weight", 3);
        assert_eq!(cfg.extra["pool"], Value::from("default"));
        assert_eq!(cfg.extra["priority_weight"], Value::from(3));
    }
}
