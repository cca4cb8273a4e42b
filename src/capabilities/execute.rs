//! # Executable capability and single-attempt runner.
//!
//! [`Executable`] is the execution half of a decorated node: given a cancellation
//! token it invokes the wrapped callable and produces a [`TaskOutput`].
//! [`run_once`] runs one attempt with an optional timeout.
//!
//! ## Flow
//! ```text
//! Success:
//!   task.execute() → Ok(output)
//!
//! Failure:
//!   task.execute() → Err(Fail/Fatal/...) → returned unchanged
//!
//! Timeout:
//!   timeout exceeded → cancel child → Err(Timeout)
//! ```
//!
//! ## Rules
//! - Derives a **child token** per attempt (isolated cancellation)
//! - Child cancellation does **not** affect the parent
//! - A zero timeout is treated as "no timeout"

use std::time::Duration;

use async_trait::async_trait;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::{error::TaskError, tasks::TaskOutput};

/// # Something that can run a captured call.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use calltask::{Executable, TaskError, TaskOutput};
///
/// struct Constant;
///
/// #[async_trait]
/// impl Executable for Constant {
///     fn name(&self) -> &str { "constant" }
///
///     async fn execute(&self, _ctx: CancellationToken) -> Result<TaskOutput, TaskError> {
///         Ok(TaskOutput::single(serde_json::Value::from(7)))
///     }
/// }
/// ```
#[async_trait]
pub trait Executable: Send + Sync {
    /// Returns the name used in logs.
    fn name(&self) -> &str;

    /// Per-attempt timeout; `None` = unbounded.
    fn timeout(&self) -> Option<Duration> {
        None
    }

    /// Runs the call once.
    ///
    /// Implementations should check `ctx.is_cancelled()` and exit quickly to honor shutdown.
    async fn execute(&self, ctx: CancellationToken) -> Result<TaskOutput, TaskError>;
}

/// Executes a single attempt of `task` under its own timeout.
///
/// ### Timeout behavior
/// If [`Executable::timeout`] is `Some(dur)` and `dur > 0`:
/// - Wraps execution in `tokio::time::timeout`
/// - On timeout: cancels the child token and returns [`TaskError::Timeout`]
pub async fn run_once<T: Executable + ?Sized>(
    task: &T,
    parent: &CancellationToken,
) -> Result<TaskOutput, TaskError> {
    let child = parent.child_token();
    tracing::debug!(task = task.name(), "execution starting");

    let res = if let Some(dur) = task.timeout().filter(|d| *d > Duration::ZERO) {
        match time::timeout(dur, task.execute(child.clone())).await {
            Ok(r) => r,
            Err(_elapsed) => {
                child.cancel();
                tracing::warn!(task = task.name(), timeout = ?dur, "execution timed out");
                Err(TaskError::Timeout { timeout: dur })
            }
        }
    } else {
        task.execute(child.clone()).await
    };

    match &res {
        Ok(out) => tracing::debug!(
            task = task.name(),
            split = out.is_split(),
            "execution finished"
        ),
        Err(e) => tracing::debug!(task = task.name(), error = e.as_label(), "execution failed"),
    }
    res
}
