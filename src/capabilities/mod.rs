//! # Node capabilities.
//!
//! Narrow interfaces that generic routines use to work with task nodes without
//! knowing their concrete type:
//! - [`Templated`] - which fields a templating engine may rewrite (+ render hints)
//! - [`ShallowCopyAttrs`] / [`Duplicate`] - how a node is cloned
//! - [`Executable`] - how a node runs its captured call

mod copy;
mod execute;
mod template;

pub use copy::{CopyMode, CopyPlan, Duplicate, ShallowCopyAttrs, duplicate};
pub use execute::{Executable, run_once};
#[cfg(feature = "minijinja")]
pub use template::JinjaRenderer;
pub use template::{
    Render, RenderHint, TemplateFieldMut, Templated, render_template_fields, render_value,
};
