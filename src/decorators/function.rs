//! # Function decorator entry points.
//!
//! Two call styles with identical behavior:
//! - [`function_task`] - free function;
//! - [`FunctionDecoratorMixin::function`] (and its alias [`FunctionDecoratorMixin::call`]) -
//!   for decorator collections such as [`TaskDecorators`].
//!
//! Both only assemble a call to [`task_decorator_factory`] with the
//! [`DecoratedCallableTask`] descriptor. The returned decorators may be reused
//! within one workflow: every call builds an independent node.
//!
//! ## Example
//! ```rust
//! use calltask::{
//!     CallArgs, CallableFn, CallableRef, FunctionDecoratorMixin, TaskConfig, TaskDecorators,
//!     TaskError,
//! };
//! use serde_json::{Map, Value, json};
//!
//! let stats: CallableRef = CallableFn::arc("stats", |call: CallArgs| async move {
//!     let xs: Vec<f64> = call.arg(0)?;
//!     let sum: f64 = xs.iter().sum();
//!     Ok::<_, TaskError>(json!({"sum": sum, "count": xs.len()}))
//! });
//!
//! let task = TaskDecorators;
//! let pending = task.function(None, Some(true), TaskConfig::default().with_task_id("stats"));
//! let decorator = pending.into_pending().unwrap().decorate(stats);
//!
//! let node = decorator.call(vec![json!([1.0, 2.0])], Map::new()).unwrap();
//! assert!(node.multiple_outputs());
//! ```

use crate::{
    config::TaskConfig,
    decorators::factory::{Decoration, OperatorClass, task_decorator_factory},
    tasks::{CallableRef, DecoratedCallableTask},
};

/// Wraps a function into a [`DecoratedCallableTask`] factory.
///
/// Accepts node configuration through `config`. Without `python_callable` the
/// result is a [`Decoration::Pending`] decorator awaiting one.
///
/// `multiple_outputs`: when set, the return value is unrolled into multiple
/// results. Objects unroll by key, arrays by index. Defaults to off.
pub fn function_task(
    python_callable: Option<CallableRef>,
    multiple_outputs: Option<bool>,
    config: TaskConfig,
) -> Decoration<DecoratedCallableTask> {
    task_decorator_factory(
        python_callable,
        multiple_outputs,
        OperatorClass::<DecoratedCallableTask>::new(),
        config,
    )
}

/// Function decorator as a composable capability.
///
/// Implement it (no methods required) on a decorator collection to expose
/// `function` and `call`.
pub trait FunctionDecoratorMixin {
    /// Same as [`function_task`].
    fn function(
        &self,
        python_callable: Option<CallableRef>,
        multiple_outputs: Option<bool>,
        config: TaskConfig,
    ) -> Decoration<DecoratedCallableTask> {
        task_decorator_factory(
            python_callable,
            multiple_outputs,
            OperatorClass::<DecoratedCallableTask>::new(),
            config,
        )
    }

    /// Calling the collection itself: alias of [`function`](Self::function).
    fn call(
        &self,
        python_callable: Option<CallableRef>,
        multiple_outputs: Option<bool>,
        config: TaskConfig,
    ) -> Decoration<DecoratedCallableTask> {
        self.function(python_callable, multiple_outputs, config)
    }
}

/// Stateless collection of the built-in decorators.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskDecorators;

impl FunctionDecoratorMixin for TaskDecorators {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        capabilities::{Render, render_template_fields},
        error::TaskError,
        tasks::{CallArgs, CallableFn},
    };
    use serde_json::{Map, Value, json};
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    fn add() -> CallableRef {
        CallableFn::arc("add", |call: CallArgs| async move {
            Ok::<_, TaskError>(Value::from(call.arg::<i64>(0)? + call.arg::<i64>(1)?))
        })
    }

    fn build(decoration: Decoration<DecoratedCallableTask>) -> DecoratedCallableTask {
        decoration
            .into_completed()
            .unwrap()
            .call(vec![json!(2), json!(3)], Map::new())
            .unwrap()
    }

    fn assert_same_node(a: &DecoratedCallableTask, b: &DecoratedCallableTask) {
        assert_eq!(a.op_args(), b.op_args());
        assert_eq!(a.op_kwargs(), b.op_kwargs());
        assert!(Arc::ptr_eq(a.python_callable(), b.python_callable()));
        assert_eq!(a.multiple_outputs(), b.multiple_outputs());
        assert_eq!(a.task_id(), b.task_id());
        assert_eq!(a.extra(), b.extra());
    }

    #[test]
    fn test_entry_points_are_equivalent() {
        let f = add();
        let cfg = TaskConfig::new().with_extra("owner", "data-eng");
        let mixin = TaskDecorators;

        let free = build(function_task(Some(Arc::clone(&f)), Some(true), cfg.clone()));
        let method = build(mixin.function(Some(Arc::clone(&f)), Some(true), cfg.clone()));
        let alias = build(mixin.call(Some(Arc::clone(&f)), Some(true), cfg));

        assert_same_node(&free, &method);
        assert_same_node(&free, &alias);
        assert!(free.multiple_outputs());
        assert_eq!(free.extra()["owner"], json!("data-eng"));
    }

    #[test]
    fn test_deferred_application_matches_direct() {
        let f = add();
        let pending = function_task(None, None, TaskConfig::default());
        assert!(pending.is_pending());
        let deferred = pending
            .into_pending()
            .unwrap()
            .decorate(Arc::clone(&f))
            .call(vec![json!(2), json!(3)], Map::new())
            .unwrap();

        let direct = build(function_task(Some(f), None, TaskConfig::default()));
        assert_same_node(&deferred, &direct);
    }

    #[test]
    fn test_add_example_with_and_without_split() {
        let f = add();
        let plain = build(function_task(
            Some(Arc::clone(&f)),
            Some(false),
            TaskConfig::default(),
        ));
        assert_eq!(plain.op_args(), &[json!(2), json!(3)]);
        assert!(plain.op_kwargs().is_empty());
        assert!(!plain.multiple_outputs());

        let split = build(function_task(Some(f), Some(true), TaskConfig::default()));
        assert_eq!(split.op_args(), plain.op_args());
        assert_eq!(split.op_kwargs(), plain.op_kwargs());
        assert!(Arc::ptr_eq(split.python_callable(), plain.python_callable()));
        assert!(split.multiple_outputs());
    }

    #[test]
    fn test_reused_decorator_builds_independent_nodes() {
        struct Suffix;

        impl Render for Suffix {
            fn render_str(&self, template: &str, _: &Map<String, Value>) -> Result<String, String> {
                Ok(format!("{template}!"))
            }
        }

        let echo: CallableRef = CallableFn::arc("echo", |call: CallArgs| async move {
            Ok::<_, TaskError>(Value::Array(call.args))
        });
        let decorator = function_task(Some(echo), None, TaskConfig::default())
            .into_completed()
            .unwrap();

        let mut first = decorator.call(vec![json!("a")], Map::new()).unwrap();
        let second = decorator.call(vec![json!("a")], Map::new()).unwrap();
        let third = decorator.call(vec![json!("b")], Map::new()).unwrap();

        render_template_fields(&mut first, &Suffix, &Map::new()).unwrap();
        assert_eq!(first.op_args(), &[json!("a!")]);
        assert_eq!(second.op_args(), &[json!("a")]);
        assert_eq!(third.op_args(), &[json!("b")]);
    }

    #[tokio::test]
    async fn test_decorated_node_runs_the_callable() {
        let node = build(function_task(Some(add()), None, TaskConfig::default()));
        let out = node.run(&CancellationToken::new()).await.unwrap();
        assert_eq!(out.into_value(), json!(5));
    }

    #[test]
    fn test_missing_callable_in_hand_built_bag_propagates() {
        use crate::{DecoratedOperator, DecorateError, OperatorKwargs};

        let err = DecoratedCallableTask::construct(
            OperatorKwargs::new().with_args(vec![]).with_kwargs(Map::new()),
        )
        .unwrap_err();
        assert_eq!(err.as_label(), "decorate_missing_argument");
        assert!(matches!(err, DecorateError::MissingArgument { name: "python_callable" }));
    }
}
