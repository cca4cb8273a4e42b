//! # Decorator factory.
//!
//! [`task_decorator_factory`] turns a callable (or its absence), a split flag, an
//! operator descriptor and a configuration value into a [`Decoration`]:
//!
//! ```text
//! callable given   ──► Decoration::Completed(TaskDecorator)
//! callable omitted ──► Decoration::Pending(PendingDecorator)
//!                           └─ decorate(callable) ──► TaskDecorator
//!
//! TaskDecorator::call(op_args, op_kwargs) ──► O::construct(OperatorKwargs) ──► node
//! ```
//!
//! ## Rules
//! - Every `call` builds exactly one new node; decorators hold no per-call state and
//!   can be reused any number of times.
//! - The callable, arguments, split flag and configuration are forwarded unmodified.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::{
    config::TaskConfig,
    error::DecorateError,
    tasks::{CallableRef, OperatorKwargs},
};

/// # Operator type a decorator builds.
///
/// The factory only ever talks to an operator through [`construct`](Self::construct).
pub trait DecoratedOperator: Sized + Send + Sync + 'static {
    /// Descriptor name, used in logs.
    const NAME: &'static str;

    /// Builds a node from the keyword bag.
    fn construct(kwargs: OperatorKwargs) -> Result<Self, DecorateError>;
}

/// Type descriptor for a [`DecoratedOperator`].
pub struct OperatorClass<O> {
    _op: PhantomData<fn() -> O>,
}

impl<O: DecoratedOperator> OperatorClass<O> {
    pub fn new() -> Self {
        Self { _op: PhantomData }
    }

    pub fn name(&self) -> &'static str {
        O::NAME
    }
}

impl<O: DecoratedOperator> Default for OperatorClass<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> Clone for OperatorClass<O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O> Copy for OperatorClass<O> {}

impl<O: DecoratedOperator> fmt::Debug for OperatorClass<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OperatorClass").field(&O::NAME).finish()
    }
}

/// Result of a decoration request.
#[derive(Debug)]
pub enum Decoration<O: DecoratedOperator> {
    /// The callable was supplied; ready to build nodes.
    Completed(TaskDecorator<O>),
    /// The callable was omitted; waiting for one.
    Pending(PendingDecorator<O>),
}

impl<O: DecoratedOperator> Decoration<O> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Decoration::Pending(_))
    }

    /// Returns the completed decorator, if any.
    pub fn into_completed(self) -> Option<TaskDecorator<O>> {
        match self {
            Decoration::Completed(d) => Some(d),
            Decoration::Pending(_) => None,
        }
    }

    /// Returns the pending decorator, if any.
    pub fn into_pending(self) -> Option<PendingDecorator<O>> {
        match self {
            Decoration::Pending(p) => Some(p),
            Decoration::Completed(_) => None,
        }
    }
}

/// A callable wrapped as a task factory.
pub struct TaskDecorator<O> {
    python_callable: CallableRef,
    multiple_outputs: Option<bool>,
    config: TaskConfig,
    class: OperatorClass<O>,
}

impl<O: DecoratedOperator> TaskDecorator<O> {
    pub fn python_callable(&self) -> &CallableRef {
        &self.python_callable
    }

    pub fn multiple_outputs(&self) -> Option<bool> {
        self.multiple_outputs
    }

    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// Builds one node that will invoke the callable with these arguments.
    ///
    /// # Example
    /// ```
    /// use calltask::{CallArgs, CallableFn, CallableRef, TaskConfig, TaskError, function_task};
    /// use serde_json::{Map, Value, json};
    ///
    /// let add: CallableRef = CallableFn::arc("add", |call: CallArgs| async move {
    ///     Ok::<_, TaskError>(Value::from(call.arg::<i64>(0)? + call.arg::<i64>(1)?))
    /// });
    ///
    /// let decorator = function_task(Some(add), None, TaskConfig::default())
    ///     .into_completed()
    ///     .unwrap();
    /// let node = decorator.call(vec![json!(2), json!(3)], Map::new()).unwrap();
    ///
    /// assert_eq!(node.op_args(), &[json!(2), json!(3)]);
    /// assert!(!node.multiple_outputs());
    /// ```
    pub fn call(
        &self,
        op_args: Vec<Value>,
        op_kwargs: Map<String, Value>,
    ) -> Result<O, DecorateError> {
        tracing::debug!(
            operator = self.class.name(),
            callable = self.python_callable.name(),
            args = op_args.len(),
            kwargs = op_kwargs.len(),
            "building decorated task"
        );
        let kwargs = OperatorKwargs::from_config(self.config.clone())
            .with_callable(Arc::clone(&self.python_callable))
            .with_args(op_args)
            .with_kwargs(op_kwargs)
            .with_multiple_outputs(self.multiple_outputs);
        O::construct(kwargs)
    }
}

impl<O> Clone for TaskDecorator<O> {
    fn clone(&self) -> Self {
        Self {
            python_callable: Arc::clone(&self.python_callable),
            multiple_outputs: self.multiple_outputs,
            config: self.config.clone(),
            class: self.class,
        }
    }
}

impl<O: DecoratedOperator> fmt::Debug for TaskDecorator<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskDecorator")
            .field("operator", &self.class)
            .field("python_callable", &self.python_callable.name())
            .field("multiple_outputs", &self.multiple_outputs)
            .field("config", &self.config)
            .finish()
    }
}

/// Decorator configured without a callable yet.
pub struct PendingDecorator<O> {
    multiple_outputs: Option<bool>,
    config: TaskConfig,
    class: OperatorClass<O>,
}

impl<O: DecoratedOperator> PendingDecorator<O> {
    /// Completes the wrapping; identical to passing the callable to the factory directly.
    pub fn decorate(&self, python_callable: CallableRef) -> TaskDecorator<O> {
        TaskDecorator {
            python_callable,
            multiple_outputs: self.multiple_outputs,
            config: self.config.clone(),
            class: self.class,
        }
    }

    pub fn multiple_outputs(&self) -> Option<bool> {
        self.multiple_outputs
    }

    pub fn config(&self) -> &TaskConfig {
        &self.config
    }
}

impl<O> Clone for PendingDecorator<O> {
    fn clone(&self) -> Self {
        Self {
            multiple_outputs: self.multiple_outputs,
            config: self.config.clone(),
            class: self.class,
        }
    }
}

impl<O: DecoratedOperator> fmt::Debug for PendingDecorator<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingDecorator")
            .field("operator", &self.class)
            .field("multiple_outputs", &self.multiple_outputs)
            .field("config", &self.config)
            .finish()
    }
}

/// Wraps `python_callable` as a factory of `decorated_operator_class` nodes.
///
/// Returns [`Decoration::Pending`] when `python_callable` is `None`.
pub fn task_decorator_factory<O: DecoratedOperator>(
    python_callable: Option<CallableRef>,
    multiple_outputs: Option<bool>,
    decorated_operator_class: OperatorClass<O>,
    config: TaskConfig,
) -> Decoration<O> {
    let pending = PendingDecorator {
        multiple_outputs,
        config,
        class: decorated_operator_class,
    };
    match python_callable {
        Some(f) => {
            tracing::trace!(operator = O::NAME, callable = f.name(), "decorating callable");
            Decoration::Completed(pending.decorate(f))
        }
        None => {
            tracing::trace!(operator = O::NAME, "decorator awaiting a callable");
            Decoration::Pending(pending)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::TaskError,
        tasks::{CallArgs, CallableFn},
    };
    use serde_json::json;

    /// Operator that just keeps the bag it was built from.
    #[derive(Debug)]
    struct Recorded(OperatorKwargs);

    impl DecoratedOperator for Recorded {
        const NAME: &'static str = "recorded";

        fn construct(kwargs: OperatorKwargs) -> Result<Self, DecorateError> {
            Ok(Self(kwargs))
        }
    }

    fn echo() -> CallableRef {
        CallableFn::arc("echo", |call: CallArgs| async move {
            Ok::<_, TaskError>(Value::Array(call.args))
        })
    }

    #[test]
    fn test_factory_forwards_everything_unmodified() {
        let f = echo();
        let cfg = TaskConfig::new().with_task_id("t1").with_extra("queue", "fast");
        let decorator = task_decorator_factory(
            Some(Arc::clone(&f)),
            Some(true),
            OperatorClass::<Recorded>::new(),
            cfg,
        )
        .into_completed()
        .unwrap();

        let mut kwargs = Map::new();
        kwargs.insert("k".into(), json!("v"));
        let Recorded(bag) = decorator.call(vec![json!(1), json!(2)], kwargs.clone()).unwrap();

        assert!(Arc::ptr_eq(bag.python_callable.as_ref().unwrap(), &f));
        assert_eq!(bag.op_args, Some(vec![json!(1), json!(2)]));
        assert_eq!(bag.op_kwargs, Some(kwargs));
        assert_eq!(bag.multiple_outputs, Some(true));
        assert_eq!(bag.task_id.as_deref(), Some("t1"));
        assert_eq!(bag.extra["queue"], json!("fast"));
    }

    #[test]
    fn test_pending_then_decorate_matches_direct() {
        let f = echo();
        let cfg = TaskConfig::new().with_extra("retries", 2);

        let class = OperatorClass::<Recorded>::new();
        let pending = task_decorator_factory(None, Some(false), class, cfg.clone());
        assert!(pending.is_pending());
        let deferred = pending.into_pending().unwrap().decorate(Arc::clone(&f));

        let direct = task_decorator_factory(Some(Arc::clone(&f)), Some(false), class, cfg)
            .into_completed()
            .unwrap();

        assert!(Arc::ptr_eq(deferred.python_callable(), direct.python_callable()));
        assert_eq!(deferred.multiple_outputs(), direct.multiple_outputs());
        assert_eq!(deferred.config(), direct.config());
    }

    #[test]
    fn test_operator_class_name() {
        let class = OperatorClass::<Recorded>::new();
        assert_eq!(class.name(), "recorded");
        assert_eq!(format!("{class:?}"), "OperatorClass(\"recorded\")");
    }
}
