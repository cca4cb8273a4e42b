//! # Callable operator.
//!
//! [`CallableOperator`] owns a captured call and knows how to run it: it hands the
//! callable exactly the positional and keyword arguments it holds, in order and
//! under their original names. It does no type or arity checking; that is the
//! callable's job when it decodes its [`CallArgs`].

use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::{
    error::TaskError,
    tasks::{
        callable::{CallArgs, CallableRef},
        kwargs::UpstreamKwargs,
    },
};

/// Captured call ready to be invoked.
#[derive(Debug)]
pub struct CallableOperator {
    pub(crate) python_callable: CallableRef,
    pub(crate) op_args: Vec<Value>,
    pub(crate) op_kwargs: Map<String, Value>,
}

impl CallableOperator {
    pub fn new(upstream: UpstreamKwargs) -> Self {
        Self {
            python_callable: upstream.python_callable,
            op_args: upstream.op_args,
            op_kwargs: upstream.op_kwargs,
        }
    }

    /// Invokes the callable once with the current (possibly rendered) arguments.
    pub async fn call(&self, ctx: CancellationToken) -> Result<Value, TaskError> {
        if ctx.is_cancelled() {
            return Err(TaskError::Canceled);
        }
        let call = CallArgs::new(ctx, self.op_args.clone(), self.op_kwargs.clone());
        self.python_callable.call(call).await
    }
}
