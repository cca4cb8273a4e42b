//! # Operator keyword bag.
//!
//! [`OperatorKwargs`] is what the factory hands to a decorated operator when it
//! builds a node: the captured call (callable + arguments), the split flag, and the
//! node configuration. The captured fields are `Option`s because a bag can be
//! assembled by hand; the operator decides which ones are required.
//!
//! [`UpstreamKwargs`] is the subset an adapter republishes to its execution side.

use std::time::Duration;

use serde_json::{Map, Value};

use crate::{config::TaskConfig, error::DecorateError, tasks::callable::CallableRef};

/// Keyword bag passed from the factory to
/// [`DecoratedOperator::construct`](crate::DecoratedOperator::construct).
#[derive(Debug, Clone, Default)]
pub struct OperatorKwargs {
    /// The wrapped callable.
    pub python_callable: Option<CallableRef>,
    /// Positional call arguments.
    pub op_args: Option<Vec<Value>>,
    /// Keyword call arguments.
    pub op_kwargs: Option<Map<String, Value>>,
    /// Split the return value into multiple named outputs (`None` = off).
    pub multiple_outputs: Option<bool>,
    /// Explicit task id (`None` = use the callable name).
    pub task_id: Option<String>,
    /// Per-execution timeout (`0s` = none).
    pub timeout: Duration,
    /// Opaque passthrough configuration.
    pub extra: Map<String, Value>,
}

impl OperatorKwargs {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bag from a configuration value; captured fields stay unset.
    pub fn from_config(config: TaskConfig) -> Self {
        Self {
            task_id: config.task_id,
            timeout: config.timeout,
            extra: config.extra,
            ..Self::default()
        }
    }

    /// Sets the wrapped callable.
    pub fn with_callable(mut self, callable: CallableRef) -> Self {
        self.python_callable = Some(callable);
        self
    }

    /// Sets the positional arguments.
    pub fn with_args(mut self, op_args: Vec<Value>) -> Self {
        self.op_args = Some(op_args);
        self
    }

    /// Sets the keyword arguments.
    pub fn with_kwargs(mut self, op_kwargs: Map<String, Value>) -> Self {
        self.op_kwargs = Some(op_kwargs);
        self
    }

    /// Sets the split flag.
    pub fn with_multiple_outputs(mut self, multiple_outputs: Option<bool>) -> Self {
        self.multiple_outputs = multiple_outputs;
        self
    }
}

/// The captured call: exactly the three values the execution side needs.
///
/// Values move through unchanged; nothing is reordered, renamed or dropped.
#[derive(Debug, Clone)]
pub struct UpstreamKwargs {
    pub python_callable: CallableRef,
    pub op_args: Vec<Value>,
    pub op_kwargs: Map<String, Value>,
}

impl UpstreamKwargs {
    /// Moves the captured call out of `kwargs`.
    ///
    /// Fails with [`DecorateError::MissingArgument`] naming the first absent field,
    /// checked in the order `python_callable`, `op_args`, `op_kwargs`.
    pub fn take(kwargs: &mut OperatorKwargs) -> Result<Self, DecorateError> {
        let python_callable = kwargs
            .python_callable
            .take()
            .ok_or(DecorateError::MissingArgument {
                name: "python_callable",
            })?;
        let op_args = kwargs
            .op_args
            .take()
            .ok_or(DecorateError::MissingArgument { name: "op_args" })?;
        let op_kwargs = kwargs
            .op_kwargs
            .take()
            .ok_or(DecorateError::MissingArgument { name: "op_kwargs" })?;

        Ok(Self {
            python_callable,
            op_args,
            op_kwargs,
        })
    }
}
