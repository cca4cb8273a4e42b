//! # Function-backed callable (`CallableFn`)
//!
//! [`Callable`] is the unit a decorator wraps: something with a name that can be
//! invoked with positional and keyword arguments and returns a JSON value.
//! [`CallableFn`] wraps a closure `F: Fn(CallArgs) -> Fut`, producing a fresh
//! future per call.
//!
//! ## Concurrency semantics
//! - Every [`Callable::call`] creates a **new** future that owns its arguments.
//! - No hidden mutation between calls; if shared state is needed, capture an
//!   `Arc<...>` explicitly inside the closure.
//!
//! ## Example
//! ```rust
//! use calltask::{CallArgs, CallableFn, CallableRef, TaskError};
//! use serde_json::Value;
//!
//! let add: CallableRef = CallableFn::arc("add", |call: CallArgs| async move {
//!     let a: i64 = call.arg(0)?;
//!     let b: i64 = call.arg(1)?;
//!     Ok::<_, TaskError>(Value::from(a + b))
//! });
//!
//! assert_eq!(add.name(), "add");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// Boxed future returned by [`Callable::call`].
pub type BoxCallFuture = Pin<Box<dyn Future<Output = Result<Value, TaskError>> + Send + 'static>>;

/// Shared handle to a callable.
///
/// Cloning the handle never clones the callable itself; clones compare equal
/// under [`Arc::ptr_eq`].
pub type CallableRef = Arc<dyn Callable>;

/// # Invocable unit wrapped by decorators.
///
/// Implementors receive exactly the arguments captured at decoration time (after
/// template substitution). Type and arity checking happens here, at call time.
pub trait Callable: Send + Sync + 'static {
    /// Returns a stable, human-readable name; used as the default task id.
    fn name(&self) -> &str;

    /// Invokes the callable.
    fn call(&self, call: CallArgs) -> BoxCallFuture;
}

impl fmt::Debug for dyn Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable").field("name", &self.name()).finish()
    }
}

/// Arguments handed to a callable for one invocation.
#[derive(Debug, Clone)]
pub struct CallArgs {
    /// Cancellation token for cooperative shutdown.
    pub ctx: CancellationToken,
    /// Positional arguments, in call order.
    pub args: Vec<Value>,
    /// Keyword arguments.
    pub kwargs: Map<String, Value>,
}

impl CallArgs {
    /// Bundles arguments for a call.
    pub fn new(ctx: CancellationToken, args: Vec<Value>, kwargs: Map<String, Value>) -> Self {
        Self { ctx, args, kwargs }
    }

    /// Decodes positional argument `index` into `T`.
    pub fn arg<T: DeserializeOwned>(&self, index: usize) -> Result<T, TaskError> {
        let raw = self.args.get(index).ok_or_else(|| TaskError::InvalidArgument {
            error: format!("missing positional argument {index} (got {})", self.args.len()),
        })?;
        T::deserialize(raw).map_err(|e| TaskError::InvalidArgument {
            error: format!("positional argument {index}: {e}"),
        })
    }

    /// Decodes keyword argument `name` into `T`.
    pub fn kwarg<T: DeserializeOwned>(&self, name: &str) -> Result<T, TaskError> {
        let raw = self.kwargs.get(name).ok_or_else(|| TaskError::InvalidArgument {
            error: format!("missing keyword argument `{name}`"),
        })?;
        T::deserialize(raw).map_err(|e| TaskError::InvalidArgument {
            error: format!("keyword argument `{name}`: {e}"),
        })
    }

    /// Decodes keyword argument `name` into `T`, or `None` when absent.
    pub fn kwarg_opt<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, TaskError> {
        match self.kwargs.get(name) {
            None => Ok(None),
            Some(_) => self.kwarg(name).map(Some),
        }
    }
}

/// Function-backed callable implementation.
///
/// Wraps a closure that *creates* a new future per call.
pub struct CallableFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> CallableFn<F> {
    /// Creates a new function-backed callable.
    ///
    /// Prefer [`CallableFn::arc`] when you immediately need a [`CallableRef`].
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self { name: name.into(), f }
    }

    /// Creates the callable and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<F> fmt::Debug for CallableFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallableFn").field("name", &self.name).finish()
    }
}

impl<F, Fut> Callable for CallableFn<F>
where
    F: Fn(CallArgs) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<Value, TaskError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, call: CallArgs) -> BoxCallFuture {
        Box::pin((self.f)(call))
    }
}
