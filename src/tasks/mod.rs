//! # Callables and the task nodes built from them.
//!
//! This module provides the core task-related types:
//! - [`Callable`] - trait for anything a decorator can wrap
//! - [`CallableFn`] - closure-backed callable
//! - [`CallableRef`] - shared reference to a callable (`Arc<dyn Callable>`)
//! - [`OperatorKwargs`] / [`UpstreamKwargs`] - the keyword bag and the captured call
//! - [`DecoratedCallableTask`] - the node a function decorator produces
//! - [`TaskOutput`] - named results of one execution

mod base;
mod callable;
mod decorated;
mod kwargs;
mod operator;
mod output;

pub use base::{DecoratedBase, MAX_TASK_ID_LEN, validate_task_id};
pub use callable::{BoxCallFuture, CallArgs, Callable, CallableFn, CallableRef};
pub use decorated::DecoratedCallableTask;
pub use kwargs::{OperatorKwargs, UpstreamKwargs};
pub use operator::CallableOperator;
pub use output::{RETURN_VALUE_KEY, TaskOutput};
