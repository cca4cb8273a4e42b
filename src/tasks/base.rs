//! # Base of every decorated node.
//!
//! [`DecoratedBase`] holds what all decorated operators share regardless of how
//! they execute: the task id, the split-result flag, the timeout, and the opaque
//! passthrough configuration. It sees the captured call only to derive a default
//! task id.
//!
//! ## Task id rules
//! - derived from the callable name when not given explicitly;
//! - non-empty, at most [`MAX_TASK_ID_LEN`] characters;
//! - ASCII alphanumerics, `-`, `_` and `.` only.

use std::time::Duration;

use serde_json::{Map, Value};

use crate::{
    config::TaskConfig,
    error::DecorateError,
    tasks::kwargs::{OperatorKwargs, UpstreamKwargs},
};

/// Longest accepted task id.
pub const MAX_TASK_ID_LEN: usize = 250;

/// Shared state of a decorated node.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratedBase {
    task_id: String,
    multiple_outputs: bool,
    timeout: Option<Duration>,
    extra: Map<String, Value>,
}

impl DecoratedBase {
    /// Builds the base from the captured call and the rest of the keyword bag.
    pub fn new(upstream: &UpstreamKwargs, kwargs: OperatorKwargs) -> Result<Self, DecorateError> {
        let task_id = kwargs
            .task_id
            .unwrap_or_else(|| upstream.python_callable.name().to_string());
        validate_task_id(&task_id)?;

        Ok(Self {
            task_id,
            multiple_outputs: kwargs.multiple_outputs.unwrap_or(false),
            timeout: TaskConfig::resolve_timeout(kwargs.timeout),
            extra: kwargs.extra,
        })
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn multiple_outputs(&self) -> bool {
        self.multiple_outputs
    }

    /// Per-execution timeout; `None` when configured as `0s`.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// Checks `task_id` against the node naming rules.
pub fn validate_task_id(task_id: &str) -> Result<(), DecorateError> {
    let reject = |reason| DecorateError::InvalidTaskId {
        task_id: task_id.to_string(),
        reason,
    };
    if task_id.is_empty() {
        return Err(reject("must not be empty"));
    }
    if task_id.chars().count() > MAX_TASK_ID_LEN {
        return Err(reject("longer than 250 characters"));
    }
    if !task_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(reject("only ASCII alphanumerics, dashes, dots and underscores are allowed"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::callable::{CallArgs, CallableFn};

    fn upstream() -> UpstreamKwargs {
        let mut kwargs = OperatorKwargs::new()
            .with_callable(CallableFn::arc("noop", |_call: CallArgs| async move {
                Ok::<_, crate::error::TaskError>(Value::Null)
            }))
            .with_args(vec![])
            .with_kwargs(Map::new());
        UpstreamKwargs::take(&mut kwargs).unwrap()
    }

    #[test]
    fn test_timeout_follows_config_sentinel() {
        let up = upstream();
        let base = DecoratedBase::new(&up, OperatorKwargs::new()).unwrap();
        assert_eq!(base.timeout(), None);

        let cfg = TaskConfig::new().with_timeout(Duration::from_secs(2));
        let base = DecoratedBase::new(&up, OperatorKwargs::from_config(cfg.clone())).unwrap();
        assert_eq!(base.timeout(), cfg.default_timeout());
        assert_eq!(base.timeout(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_validate_task_id() {
        assert!(validate_task_id("extract_orders.v2-daily").is_ok());

        let err = validate_task_id("").unwrap_err();
        assert_eq!(err.as_label(), "decorate_invalid_task_id");

        assert!(validate_task_id("has space").is_err());
        assert!(validate_task_id(&"x".repeat(MAX_TASK_ID_LEN)).is_ok());
        assert!(validate_task_id(&"x".repeat(MAX_TASK_ID_LEN + 1)).is_err());
    }
}
