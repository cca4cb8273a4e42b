//! # Decorators: from callables to task nodes.
//!
//! - [`task_decorator_factory`] - generic dispatch over any [`DecoratedOperator`]
//! - [`function_task`] / [`FunctionDecoratorMixin`] - function decorator entry points

mod factory;
mod function;

pub use factory::{
    DecoratedOperator, Decoration, OperatorClass, PendingDecorator, TaskDecorator,
    task_decorator_factory,
};
pub use function::{FunctionDecoratorMixin, TaskDecorators, function_task};
