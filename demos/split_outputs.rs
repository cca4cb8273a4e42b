//! # Example: split_outputs
//!
//! Shows split results and deferred decoration.
//!
//! Demonstrates how to:
//! - Configure a decorator without a callable and apply it later.
//! - Enable `multiple_outputs` so an object result is published per key.
//! - Render template fields before running.
//!
//! ## Flow
//! ```text
//! function_task(None, Some(true)) ──► PendingDecorator
//!     └─► decorate(stats) ──► call(["{{ label }}"], {values}) ──► node
//!           ├─► render_template_fields(node)   "{{ label }}" ──► "daily"
//!           └─► run() ──► return_value, label, sum, count
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example split_outputs
//! ```

use calltask::{
    CallArgs, CallableFn, CallableRef, JinjaRenderer, TaskConfig, TaskError, function_task,
    render_template_fields,
};
use serde_json::{Map, json};
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let stats: CallableRef = CallableFn::arc("stats", |call: CallArgs| async move {
        let label: String = call.arg(0)?;
        let values: Vec<f64> = call.kwarg("values")?;
        let sum: f64 = values.iter().sum();
        Ok::<_, TaskError>(json!({"label": label, "sum": sum, "count": values.len()}))
    });

    // 1. Configure first, decorate later
    let cfg = TaskConfig::new().with_task_id("daily_stats");
    let Some(pending) = function_task(None, Some(true), cfg).into_pending() else {
        return Err("expected a pending decorator".into());
    };
    let decorator = pending.decorate(stats);

    // 2. Capture one call
    let mut kwargs = Map::new();
    kwargs.insert("values".into(), json!([1.5, 2.5, 4.0]));
    let mut node = decorator.call(vec![json!("{{ label }}")], kwargs)?;

    // 3. Render template fields
    let mut ctx = Map::new();
    ctx.insert("label".into(), json!("daily"));
    render_template_fields(&mut node, &JinjaRenderer::new(), &ctx)?;

    // 4. Run and print every published entry
    let out = node.run(&CancellationToken::new()).await?;
    for (key, value) in out.entries() {
        println!("[{}] {key} = {value}", node.task_id());
    }
    Ok(())
}
