//! # Example: add_task
//!
//! Minimal example of decorating a function and running the node it builds.
//!
//! Demonstrates how to:
//! - Wrap an async closure with [`CallableFn`].
//! - Turn it into a decorator with [`function_task`].
//! - Build two nodes from the same decorator and run each once.
//!
//! ## Flow
//! ```text
//! CallableFn ──► function_task() ──► TaskDecorator
//!                                       ├─► call([2, 3])   ──► node ──► run() ──► 5
//!                                       └─► call([10, 20]) ──► node ──► run() ──► 30
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example add_task
//! ```

use std::time::Duration;

use calltask::{CallArgs, CallableFn, CallableRef, TaskConfig, TaskError, function_task};
use serde_json::{Map, Value, json};
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Define the function to wrap
    let add: CallableRef = CallableFn::arc("add", |call: CallArgs| async move {
        let a: i64 = call.arg(0)?;
        let b: i64 = call.arg(1)?;
        Ok::<_, TaskError>(Value::from(a + b))
    });

    // 2. Decorate it; a callable was given, so the decorator is complete
    let cfg = TaskConfig::new().with_timeout(Duration::from_secs(5));
    let Some(add_task) = function_task(Some(add), None, cfg).into_completed() else {
        return Err("decorator is waiting for a callable".into());
    };

    // 3. Each call captures its own arguments into a new node
    let first = add_task.call(vec![json!(2), json!(3)], Map::new())?;
    let second = add_task.call(vec![json!(10), json!(20)], Map::new())?;

    // 4. Run both
    let token = CancellationToken::new();
    for node in [&first, &second] {
        let out = node.run(&token).await?;
        println!("[{}] {:?} -> {}", node.task_id(), node.op_args(), out.value());
    }
    Ok(())
}
