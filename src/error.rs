//! Error types used by decorators and decorated tasks.
//!
//! This module defines two main error enums:
//!
//! - [`DecorateError`] - errors raised while a callable is being turned into a task node
//!   (definition time).
//! - [`TaskError`] - errors raised while a task node runs its callable (execution time).
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced at decoration time.
///
/// Decoration happens while a workflow is being defined, so these errors are never
/// recovered locally: they propagate to the decoration call site and stop workflow
/// construction.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecorateError {
    /// A required captured field was absent from the operator keyword bag.
    #[error("missing required argument `{name}`")]
    MissingArgument {
        /// Name of the absent field (`python_callable`, `op_args` or `op_kwargs`).
        name: &'static str,
    },

    /// The resolved task id breaks the node naming rules.
    #[error("invalid task id {task_id:?}: {reason}")]
    InvalidTaskId {
        /// The rejected task id.
        task_id: String,
        /// Which rule was broken.
        reason: &'static str,
    },

    /// A duplication plan asked for a deep copy of an attribute that only supports sharing.
    #[error("attribute `{attr}` cannot be deep-copied")]
    NotDeepCopyable {
        /// Attribute name.
        attr: &'static str,
    },

    /// Template substitution of a declared field failed.
    #[error("failed to render template field `{field}`: {reason}")]
    Template {
        /// Declared template field being rendered.
        field: String,
        /// Renderer failure message.
        reason: String,
    },
}

impl DecorateError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use calltask::DecorateError;
    ///
    /// let err = DecorateError::MissingArgument { name: "op_args" };
    /// assert_eq!(err.as_label(), "decorate_missing_argument");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            DecorateError::MissingArgument { .. } => "decorate_missing_argument",
            DecorateError::InvalidTaskId { .. } => "decorate_invalid_task_id",
            DecorateError::NotDeepCopyable { .. } => "decorate_not_deep_copyable",
            DecorateError::Template { .. } => "decorate_template",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            DecorateError::MissingArgument { name } => format!("missing: {name}"),
            DecorateError::InvalidTaskId { task_id, reason } => {
                format!("task id {task_id:?} rejected: {reason}")
            }
            DecorateError::NotDeepCopyable { attr } => format!("not deep-copyable: {attr}"),
            DecorateError::Template { field, reason } => format!("template {field}: {reason}"),
        }
    }
}

/// # Errors produced by task execution.
///
/// These represent failures of a decorated task while it invokes its callable
/// or publishes its result. Retrying is left to the caller.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TaskError {
    /// Task execution exceeded its timeout duration.
    #[error("timed out after {timeout:?}")]
    Timeout {
        /// The timeout duration that was exceeded.
        timeout: Duration,
    },

    /// Non-recoverable fatal error (should not be retried).
    #[error("fatal error (no retry): {error}")]
    Fatal {
        /// The underlying error message.
        error: String,
    },

    /// Task execution failed but may succeed if retried.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// A captured argument could not be decoded into the type the callable expects.
    #[error("invalid argument: {error}")]
    InvalidArgument {
        /// What was wrong with the argument.
        error: String,
    },

    /// Split results were requested but the callable returned a scalar.
    #[error("cannot split a {kind} return value into multiple outputs")]
    UnsplittableOutput {
        /// JSON kind of the returned value (`string`, `number`, ...).
        kind: &'static str,
    },

    /// A split return value used the key reserved for the whole value.
    #[error("split output key `{key}` is reserved for the whole return value")]
    ReservedOutputKey {
        /// The reserved key.
        key: &'static str,
    },

    /// Task was cancelled due to parent context shutdown.
    #[error("context cancelled")]
    Canceled,
}

impl TaskError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use calltask::TaskError;
    /// use std::time::Duration;
    ///
    /// let err = TaskError::Timeout { timeout: Duration::from_secs(1) };
    /// assert_eq!(err.as_label(), "task_timeout");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Timeout { .. } => "task_timeout",
            TaskError::Fatal { .. } => "task_fatal",
            TaskError::Fail { .. } => "task_failed",
            TaskError::InvalidArgument { .. } => "task_invalid_argument",
            TaskError::UnsplittableOutput { .. } => "task_unsplittable_output",
            TaskError::ReservedOutputKey { .. } => "task_reserved_output_key",
            TaskError::Canceled => "task_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TaskError::Timeout { timeout } => format!("timeout: {timeout:?}"),
            TaskError::Fatal { error } => format!("fatal: {error}"),
            TaskError::Fail { error } => format!("error: {error}"),
            TaskError::InvalidArgument { error } => format!("invalid argument: {error}"),
            TaskError::UnsplittableOutput { kind } => format!("unsplittable output: {kind}"),
            TaskError::ReservedOutputKey { key } => format!("reserved output key: {key}"),
            TaskError::Canceled => "context cancelled".to_string(),
        }
    }
}
