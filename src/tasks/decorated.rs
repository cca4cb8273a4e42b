//! # Decorated callable task (the adapter).
//!
//! [`DecoratedCallableTask`] is the node a function decorator builds. It is composed
//! of two halves instead of inheriting from both:
//! - [`DecoratedBase`] - task id, split flag, timeout, passthrough config;
//! - [`CallableOperator`] - the captured call (callable + arguments).
//!
//! ## Construction
//! ```text
//! OperatorKwargs ─► UpstreamKwargs::take ─► {python_callable, op_args, op_kwargs}
//!        │                                           │
//!        └─ remaining config ─► DecoratedBase::new ◄─┘ (default task id)
//!                                                    └─► CallableOperator::new
//! ```
//! Construction never invokes the callable and never inspects argument types.
//!
//! ## Declared metadata
//! | Declaration          | Value                            |
//! |----------------------|----------------------------------|
//! | template fields      | `op_args`, `op_kwargs`           |
//! | render hints         | both `py`                        |
//! | shallow-copy attrs   | `python_callable`                |

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::{
    capabilities::{
        CopyMode, CopyPlan, Duplicate, Executable, RenderHint, ShallowCopyAttrs,
        TemplateFieldMut, Templated, run_once,
    },
    decorators::DecoratedOperator,
    error::{DecorateError, TaskError},
    tasks::{
        base::DecoratedBase,
        callable::CallableRef,
        kwargs::{OperatorKwargs, UpstreamKwargs},
        operator::CallableOperator,
        output::TaskOutput,
    },
};

/// Wraps a callable and captures its call arguments for later execution.
///
/// # Example
/// ```
/// use calltask::{
///     CallArgs, CallableFn, CallableRef, DecoratedCallableTask, OperatorKwargs, TaskError,
/// };
/// use serde_json::{Map, Value, json};
///
/// let add: CallableRef = CallableFn::arc("add", |call: CallArgs| async move {
///     Ok::<_, TaskError>(Value::from(call.arg::<i64>(0)? + call.arg::<i64>(1)?))
/// });
///
/// let node = DecoratedCallableTask::new(
///     OperatorKwargs::new()
///         .with_callable(add)
///         .with_args(vec![json!(2), json!(3)])
///         .with_kwargs(Map::new()),
/// )
/// .unwrap();
///
/// assert_eq!(node.task_id(), "add");
/// assert_eq!(node.op_args(), &[json!(2), json!(3)]);
/// ```
#[derive(Debug)]
pub struct DecoratedCallableTask {
    base: DecoratedBase,
    operator: CallableOperator,
}

impl DecoratedCallableTask {
    /// Fields a templating engine may rewrite.
    pub const TEMPLATE_FIELDS: &'static [&'static str] = &["op_args", "op_kwargs"];

    pub const TEMPLATE_FIELDS_RENDERERS: &'static [(&'static str, RenderHint)] =
        &[("op_args", RenderHint::Py), ("op_kwargs", RenderHint::Py)];

    /// Attributes shared by reference when the node is duplicated.
    ///
    /// Callables may wrap handles with no meaningful deep copy; arguments are owned
    /// per node so clones can diverge after rendering.
    pub const SHALLOW_COPY_ATTRS: &'static [&'static str] = &["python_callable"];

    /// Builds a node from the keyword bag.
    ///
    /// Fails with [`DecorateError::MissingArgument`] when `python_callable`, `op_args`
    /// or `op_kwargs` is absent, and with [`DecorateError::InvalidTaskId`] when the
    /// resolved task id is rejected.
    pub fn new(mut kwargs: OperatorKwargs) -> Result<Self, DecorateError> {
        let upstream = UpstreamKwargs::take(&mut kwargs)?;
        let base = DecoratedBase::new(&upstream, kwargs)?;
        let operator = CallableOperator::new(upstream);

        tracing::debug!(
            task_id = base.task_id(),
            args = operator.op_args.len(),
            kwargs = operator.op_kwargs.len(),
            multiple_outputs = base.multiple_outputs(),
            "decorated task constructed"
        );
        Ok(Self { base, operator })
    }

    pub fn task_id(&self) -> &str {
        self.base.task_id()
    }

    /// The wrapped callable.
    pub fn python_callable(&self) -> &CallableRef {
        &self.operator.python_callable
    }

    /// Positional arguments, in call order.
    pub fn op_args(&self) -> &[Value] {
        &self.operator.op_args
    }

    pub fn op_kwargs(&self) -> &Map<String, Value> {
        &self.operator.op_kwargs
    }

    /// Whether the return value is split into multiple named outputs.
    pub fn multiple_outputs(&self) -> bool {
        self.base.multiple_outputs()
    }

    /// Passthrough configuration forwarded by the decorator.
    pub fn extra(&self) -> &Map<String, Value> {
        self.base.extra()
    }

    /// Runs the captured call once, honoring the configured timeout.
    pub async fn run(&self, ctx: &CancellationToken) -> Result<TaskOutput, TaskError> {
        run_once(self, ctx).await
    }
}

impl DecoratedOperator for DecoratedCallableTask {
    const NAME: &'static str = "callable";

    fn construct(kwargs: OperatorKwargs) -> Result<Self, DecorateError> {
        Self::new(kwargs)
    }
}

impl Templated for DecoratedCallableTask {
    fn template_fields(&self) -> &'static [&'static str] {
        Self::TEMPLATE_FIELDS
    }

    fn template_fields_renderers(&self) -> &'static [(&'static str, RenderHint)] {
        Self::TEMPLATE_FIELDS_RENDERERS
    }

    fn template_field_mut(&mut self, field: &str) -> Option<TemplateFieldMut<'_>> {
        match field {
            "op_args" => Some(TemplateFieldMut::Sequence(&mut self.operator.op_args)),
            "op_kwargs" => Some(TemplateFieldMut::Mapping(&mut self.operator.op_kwargs)),
            _ => None,
        }
    }
}

impl ShallowCopyAttrs for DecoratedCallableTask {
    fn shallow_copy_attrs(&self) -> &'static [&'static str] {
        Self::SHALLOW_COPY_ATTRS
    }
}

impl Duplicate for DecoratedCallableTask {
    fn duplicate_with(&self, plan: &CopyPlan) -> Result<Self, DecorateError> {
        let python_callable = match plan.mode("python_callable") {
            CopyMode::Shallow => Arc::clone(&self.operator.python_callable),
            CopyMode::Deep => {
                return Err(DecorateError::NotDeepCopyable {
                    attr: "python_callable",
                });
            }
        };
        // Owned JSON values: both modes give the clone its own copy.
        let op_args = self.operator.op_args.clone();
        let op_kwargs = self.operator.op_kwargs.clone();

        Ok(Self {
            base: self.base.clone(),
            operator: CallableOperator {
                python_callable,
                op_args,
                op_kwargs,
            },
        })
    }
}

#[async_trait]
impl Executable for DecoratedCallableTask {
    fn name(&self) -> &str {
        self.base.task_id()
    }

    fn timeout(&self) -> Option<Duration> {
        self.base.timeout()
    }

    async fn execute(&self, ctx: CancellationToken) -> Result<TaskOutput, TaskError> {
        let value = self.operator.call(ctx).await?;
        TaskOutput::from_return(value, self.base.multiple_outputs())
    }
}
