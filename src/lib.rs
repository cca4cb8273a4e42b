//! # calltask
//!
//! **calltask** turns plain callables into schedulable task nodes for pipeline
//! orchestrators.
//!
//! A decorator captures a callable together with the positional and keyword
//! arguments of one call. The resulting node exposes those arguments as
//! template-eligible fields, declares which attributes are shared rather than
//! duplicated when the node is cloned, and can optionally split the callable's
//! return value into multiple named results.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  function_task(..)   TaskDecorators.function(..)   TaskDecorators.call(..)
//!          │                       │                          │
//!          └───────────────────────┼──────────────────────────┘
//!                                  ▼
//!        task_decorator_factory(callable?, multiple_outputs?, OperatorClass, TaskConfig)
//!                                  │
//!                 ┌────────────────┴────────────────┐
//!                 ▼                                 ▼
//!     Decoration::Completed(TaskDecorator)   Decoration::Pending(PendingDecorator)
//!                 │                                 │ decorate(callable)
//!                 │◄────────────────────────────────┘
//!                 ▼
//!     TaskDecorator::call(op_args, op_kwargs)
//!                 │  OperatorKwargs
//!                 ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  DecoratedCallableTask                                            │
//! │  - DecoratedBase     (task_id, multiple_outputs, timeout, extra)  │
//! │  - CallableOperator  (python_callable, op_args, op_kwargs)        │
//! │                                                                   │
//! │  Templated        op_args, op_kwargs (render hint: py)            │
//! │  ShallowCopyAttrs python_callable                                 │
//! │  Executable       call → TaskOutput (split or single)             │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! decorate ──► call(args) ──► node
//!                              ├─► render_template_fields(node, renderer, ctx)   (optional)
//!                              ├─► duplicate(&node)                              (optional)
//!                              └─► node.run(&token) ──► TaskOutput
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                          |
//! |-------------------|---------------------------------------------------------------|---------------------------------------------|
//! | **Decorators**    | Wrap callables; free function, mixin method and call alias.   | [`function_task`], [`FunctionDecoratorMixin`] |
//! | **Factory**       | Generic dispatch to any decorated operator type.              | [`task_decorator_factory`], [`Decoration`]  |
//! | **Nodes**         | Captured call + declared metadata.                            | [`DecoratedCallableTask`]                   |
//! | **Templating**    | Substitute strings inside declared fields.                    | [`Templated`], [`Render`]                   |
//! | **Duplication**   | Clone nodes, sharing declared attributes.                     | [`Duplicate`], [`duplicate`]                |
//! | **Execution**     | Run one attempt with timeout; split results.                  | [`Executable`], [`TaskOutput`]              |
//! | **Errors**        | Typed errors for definition time and execution time.          | [`DecorateError`], [`TaskError`]            |
//! | **Configuration** | Task id, timeout and opaque passthrough settings.             | [`TaskConfig`]                              |
//!
//! ## Optional features
//! - `minijinja` (default): exports [`JinjaRenderer`], a [`Render`] backed by minijinja.
//!
//! ## Example
//! ```rust
//! use calltask::{CallArgs, CallableFn, CallableRef, TaskConfig, TaskError, function_task};
//! use serde_json::{Map, Value, json};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let add: CallableRef = CallableFn::arc("add", |call: CallArgs| async move {
//!         let a: i64 = call.arg(0)?;
//!         let b: i64 = call.arg(1)?;
//!         Ok::<_, TaskError>(Value::from(a + b))
//!     });
//!
//!     let decoration = function_task(Some(add), None, TaskConfig::default());
//!     let Some(add_task) = decoration.into_completed() else {
//!         unreachable!("a callable was supplied");
//!     };
//!
//!     // The same decorator can build any number of independent nodes.
//!     let first = add_task.call(vec![json!(2), json!(3)], Map::new())?;
//!     let second = add_task.call(vec![json!(10), json!(20)], Map::new())?;
//!
//!     assert_eq!(first.run(&CancellationToken::new()).await?.into_value(), json!(5));
//!     assert_eq!(second.run(&CancellationToken::new()).await?.into_value(), json!(30));
//!     Ok(())
//! }
//! ```
mod capabilities;
mod config;
mod decorators;
mod error;
mod tasks;

// ---- Public re-exports ----

pub use capabilities::{
    CopyMode, CopyPlan, Duplicate, Executable, Render, RenderHint, ShallowCopyAttrs,
    TemplateFieldMut, Templated, duplicate, render_template_fields, render_value, run_once,
};
pub use config::TaskConfig;
pub use decorators::{
    DecoratedOperator, Decoration, FunctionDecoratorMixin, OperatorClass, PendingDecorator,
    TaskDecorator, TaskDecorators, function_task, task_decorator_factory,
};
pub use error::{DecorateError, TaskError};
pub use tasks::{
    BoxCallFuture, CallArgs, Callable, CallableFn, CallableOperator, CallableRef,
    DecoratedBase, DecoratedCallableTask, MAX_TASK_ID_LEN, OperatorKwargs, RETURN_VALUE_KEY,
    TaskOutput, UpstreamKwargs, validate_task_id,
};

// Optional: a minijinja-backed renderer.
// Enabled by default; opt out with `default-features = false`.
#[cfg(feature = "minijinja")]
pub use capabilities::JinjaRenderer;
